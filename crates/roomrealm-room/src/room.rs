//! Room types: the data structures that represent the active room.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use roomrealm_session::SessionHandle;

use crate::RoomError;

/// Locks a room slot, recovering from a poisoned mutex.
///
/// Critical sections contain no code that can panic, so the data behind a
/// poisoned lock is still consistent.
pub(crate) fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// RoomRole
// ---------------------------------------------------------------------------

/// How the session entered the room.
///
/// The role is informational for the calling layer (a host might render
/// differently); no operation in this crate behaves differently for hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomRole {
    /// This session created the room.
    Host,
    /// This session joined a room someone else created.
    Member,
}

impl fmt::Display for RoomRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomRole::Host => write!(f, "host"),
            RoomRole::Member => write!(f, "member"),
        }
    }
}

// ---------------------------------------------------------------------------
// ActiveRoom
// ---------------------------------------------------------------------------

/// The room this session currently occupies.
///
/// At most one exists per session. It is tagged with the session generation
/// it was entered under: if the session has since transitioned (logout, or
/// a later login), the tag is stale and the room is dead — this is how
/// "room membership does not persist across logout" is enforced without
/// the session layer ever touching room state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoom {
    /// The room's name, as used on the wire.
    pub name: String,
    /// Whether this session hosts the room or joined it.
    pub role: RoomRole,
    /// The session generation this room was entered under.
    pub(crate) session_generation: u64,
}

/// The room slot: the active room (if any) plus the epoch it is at.
///
/// `epoch` increments on every room change (host, join, leave). The
/// message buffer and presence snapshot tag themselves with the epoch they
/// were filled at; a mismatch means their content belongs to a previous
/// room and must not be surfaced.
pub(crate) struct Slot {
    pub(crate) room: Option<ActiveRoom>,
    pub(crate) epoch: u64,
}

// ---------------------------------------------------------------------------
// RoomHandle
// ---------------------------------------------------------------------------

/// Everything needed to address an operation at the current room.
///
/// Produced by [`RoomHandle::current`] under a single pair of locks, so
/// the fields are consistent with each other at the moment of the call.
#[derive(Debug, Clone)]
pub(crate) struct RoomContext {
    pub(crate) username: String,
    pub(crate) room_name: String,
    pub(crate) epoch: u64,
}

/// A read-only view of the room slot, for the message and presence
/// components.
///
/// Like the session handle it wraps, this cannot mutate anything — the
/// room slot has exactly one writer, the [`RoomClient`](crate::RoomClient).
#[derive(Clone)]
pub struct RoomHandle {
    pub(crate) session: SessionHandle,
    pub(crate) slot: Arc<Mutex<Slot>>,
}

impl RoomHandle {
    /// Resolves the current room, enforcing the two state guards every
    /// room-scoped operation shares.
    ///
    /// # Errors
    /// - [`RoomError::NotAuthenticated`] — no user is logged in
    /// - [`RoomError::NoRoom`] — no room, or the room belongs to an ended
    ///   session
    ///
    /// Both fire before any network call is made.
    pub(crate) fn current(&self) -> Result<RoomContext, RoomError> {
        let (username, generation) = self
            .session
            .authenticated()
            .ok_or(RoomError::NotAuthenticated)?;
        let slot = lock(&self.slot);
        match &slot.room {
            Some(room) if room.session_generation == generation => {
                Ok(RoomContext {
                    username,
                    room_name: room.name.clone(),
                    epoch: slot.epoch,
                })
            }
            _ => Err(RoomError::NoRoom),
        }
    }

    /// The current room epoch. Used by the buffer and snapshot to decide
    /// whether their content is still about this room.
    pub(crate) fn epoch(&self) -> u64 {
        lock(&self.slot).epoch
    }
}
