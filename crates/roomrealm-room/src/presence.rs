//! The presence tracker: a cached view of who is in the room.
//!
//! `list()` asks the service for the current member list. By default every
//! call is a fresh request; an optional TTL
//! ([`PresenceConfig::cache_ttl`](crate::PresenceConfig)) lets a recent
//! snapshot answer instead, for callers that poll aggressively.
//!
//! The member list is surfaced exactly as the service supplied it: same
//! order, duplicates included. Interpreting it is the calling layer's
//! business.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use roomrealm_gateway::Gateway;
use roomrealm_protocol::ListUsersRequest;

use crate::{PresenceConfig, RoomError, RoomHandle};

/// The member list as last observed, with when and for which room.
///
/// Tagged with the room epoch it was fetched at: once the room changes,
/// the snapshot is stale and is never served or returned again.
#[derive(Debug, Clone)]
pub struct PresenceSnapshot {
    /// Member usernames, in service order, duplicates preserved.
    pub members: Vec<String>,
    /// When the snapshot was fetched.
    pub fetched_at: Instant,
    /// The room epoch the snapshot belongs to.
    pub(crate) room_epoch: u64,
}

fn lock(
    snapshot: &Mutex<Option<PresenceSnapshot>>,
) -> MutexGuard<'_, Option<PresenceSnapshot>> {
    snapshot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tracks room membership as last observed.
pub struct PresenceTracker<G> {
    gateway: Arc<G>,
    room: RoomHandle,
    snapshot: Arc<Mutex<Option<PresenceSnapshot>>>,
    config: PresenceConfig,
}

impl<G> Clone for PresenceTracker<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            room: self.room.clone(),
            snapshot: Arc::clone(&self.snapshot),
            config: self.config.clone(),
        }
    }
}

impl<G: Gateway> PresenceTracker<G> {
    /// Creates a tracker with the default config (no caching).
    pub fn new(gateway: Arc<G>, room: RoomHandle) -> Self {
        Self::with_config(gateway, room, PresenceConfig::default())
    }

    /// Creates a tracker with an explicit config.
    pub fn with_config(
        gateway: Arc<G>,
        room: RoomHandle,
        config: PresenceConfig,
    ) -> Self {
        Self {
            gateway,
            room,
            snapshot: Arc::new(Mutex::new(None)),
            config,
        }
    }

    /// Returns the current members of the room, in service order.
    ///
    /// Issues a fresh `listUsers` request unless a snapshot for this room
    /// is younger than the configured TTL.
    ///
    /// # Errors
    /// - [`RoomError::NotAuthenticated`] / [`RoomError::NoRoom`] — state
    ///   guards, raised before any network call
    /// - [`RoomError::ConcurrentModification`] — the room changed while
    ///   the fetch was in flight; the stale member list is not returned
    /// - [`RoomError::Gateway`] — transport failure; an expired or
    ///   stale snapshot is never substituted for a failed fetch
    pub async fn list(&self) -> Result<Vec<String>, RoomError> {
        let ctx = self.room.current()?;

        if let Some(ttl) = self.config.cache_ttl {
            let snapshot = lock(&self.snapshot);
            if let Some(snap) = snapshot.as_ref() {
                if snap.room_epoch == ctx.epoch
                    && snap.fetched_at.elapsed() < ttl
                {
                    tracing::debug!(
                        room = %ctx.room_name,
                        "presence served from snapshot"
                    );
                    return Ok(snap.members.clone());
                }
            }
        }

        let resp = self
            .gateway
            .list_users(ListUsersRequest {
                room_name: ctx.room_name,
            })
            .await?;
        // Same re-validation as host/join: a member list fetched for a
        // room that has since been left is not the current room's.
        if self.room.epoch() != ctx.epoch {
            return Err(RoomError::ConcurrentModification);
        }

        *lock(&self.snapshot) = Some(PresenceSnapshot {
            members: resp.users.clone(),
            fetched_at: Instant::now(),
            room_epoch: ctx.epoch,
        });
        Ok(resp.users)
    }

    /// The last fetched snapshot, if it is still about the current room.
    pub fn snapshot(&self) -> Option<PresenceSnapshot> {
        let epoch = self.room.epoch();
        lock(&self.snapshot)
            .clone()
            .filter(|snap| snap.room_epoch == epoch)
    }
}
