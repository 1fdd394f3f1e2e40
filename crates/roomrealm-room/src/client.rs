//! The room client: owner of room-membership state.
//!
//! State machine, per session:
//!
//! ```text
//!   NoRoom ──(host)──→ Hosting ─┐
//!     │                         ├──(leave / logout)──→ NoRoom
//!     └──(join)──→ Joined ──────┘
//! ```
//!
//! `host` or `join` while already in a room is a **room switch**, not an
//! error: the previous membership is implicitly abandoned (a session never
//! occupies two rooms), and the epoch bump kills the old room's message
//! buffer and presence snapshot.
//!
//! # Concurrency note
//!
//! Same discipline as the session manager: state behind a plain mutex that
//! is never held across an await, transitions applied compare-and-set
//! against the epoch (and session generation) observed at call issuance.
//! Two overlapping `host` calls are a well-defined
//! [`RoomError::ConcurrentModification`] for the loser, not a race.

use std::sync::{Arc, Mutex};

use roomrealm_gateway::Gateway;
use roomrealm_protocol::{HostRoomRequest, JoinRoomRequest};
use roomrealm_session::SessionHandle;

use crate::room::{lock, ActiveRoom, RoomRole, Slot};
use crate::{RoomError, RoomHandle};

/// Manages which room (if any) the session is in.
///
/// Cheap to share: all fields are `Arc`s.
pub struct RoomClient<G> {
    gateway: Arc<G>,
    session: SessionHandle,
    slot: Arc<Mutex<Slot>>,
}

impl<G> Clone for RoomClient<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            session: self.session.clone(),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<G: Gateway> RoomClient<G> {
    /// Creates a room client with no active room, bound to the session.
    pub fn new(gateway: Arc<G>, session: SessionHandle) -> Self {
        Self {
            gateway,
            session,
            slot: Arc::new(Mutex::new(Slot {
                room: None,
                epoch: 0,
            })),
        }
    }

    /// Returns a read-only handle for the message and presence components.
    pub fn handle(&self) -> RoomHandle {
        RoomHandle {
            session: self.session.clone(),
            slot: Arc::clone(&self.slot),
        }
    }

    /// Returns the live room, or `None` if there is none — including the
    /// case where a room exists but belongs to an ended session.
    pub fn current_room(&self) -> Option<ActiveRoom> {
        let (_, generation) = self.session.authenticated()?;
        let slot = lock(&self.slot);
        slot.room
            .clone()
            .filter(|room| room.session_generation == generation)
    }

    /// Hosts a new room and enters it.
    ///
    /// Requires an authenticated session — checked before any network
    /// call. If already in a room, this switches to the new one.
    ///
    /// # Errors
    /// - [`RoomError::NotAuthenticated`] — no user logged in (no network
    ///   call made)
    /// - [`RoomError::Rejected`] — the service refused to create the room
    /// - [`RoomError::ConcurrentModification`] — the room or session
    ///   changed while the request was in flight
    /// - [`RoomError::Gateway`] — transport failure, state unchanged
    pub async fn host(&self, room_name: &str) -> Result<(), RoomError> {
        let (username, generation, epoch) = self.observe()?;

        let resp = self
            .gateway
            .host_room(HostRoomRequest {
                username,
                room_name: room_name.to_string(),
            })
            .await?;
        if !resp.success {
            return Err(RoomError::Rejected(
                resp.rejection()?.to_string(),
            ));
        }

        self.commit(room_name, RoomRole::Host, generation, epoch)
    }

    /// Joins an existing room.
    ///
    /// Same guards and switch semantics as [`host`](Self::host).
    ///
    /// # Errors
    /// As [`host`](Self::host), except a service rejection maps to
    /// [`RoomError::NotFound`] — the only way the service refuses a join.
    pub async fn join(&self, room_name: &str) -> Result<(), RoomError> {
        let (username, generation, epoch) = self.observe()?;

        let resp = self
            .gateway
            .join_room(JoinRoomRequest {
                username,
                room_name: room_name.to_string(),
            })
            .await?;
        if !resp.success {
            return Err(RoomError::NotFound {
                room: room_name.to_string(),
                reason: resp.rejection()?.to_string(),
            });
        }

        self.commit(room_name, RoomRole::Member, generation, epoch)
    }

    /// Leaves the current room. Purely local: the service has no leave
    /// verb, and abandoning a room needs no acknowledgement.
    ///
    /// Bumps the epoch, which invalidates the inbound buffer and the
    /// presence snapshot. Leaving with no active room is a no-op.
    pub fn leave(&self) {
        let mut slot = lock(&self.slot);
        if let Some(room) = slot.room.take() {
            slot.epoch += 1;
            tracing::info!(room = %room.name, role = %room.role, "left room");
        }
    }

    /// Phase 1 of host/join: the authentication guard plus the snapshot
    /// the compare-and-set validates against.
    fn observe(&self) -> Result<(String, u64, u64), RoomError> {
        let (username, generation) = self
            .session
            .authenticated()
            .ok_or(RoomError::NotAuthenticated)?;
        let epoch = lock(&self.slot).epoch;
        Ok((username, generation, epoch))
    }

    /// Phase 3 of host/join: apply the transition if nothing moved while
    /// the exchange was in flight.
    fn commit(
        &self,
        room_name: &str,
        role: RoomRole,
        generation: u64,
        observed_epoch: u64,
    ) -> Result<(), RoomError> {
        if self.session.generation() != generation {
            return Err(RoomError::ConcurrentModification);
        }
        let mut slot = lock(&self.slot);
        if slot.epoch != observed_epoch {
            return Err(RoomError::ConcurrentModification);
        }
        let switched = slot.room.is_some();
        slot.room = Some(ActiveRoom {
            name: room_name.to_string(),
            role,
            session_generation: generation,
        });
        slot.epoch += 1;
        tracing::info!(room = room_name, %role, switched, "entered room");
        Ok(())
    }
}
