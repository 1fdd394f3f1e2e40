//! Room membership, messaging, and presence for RoomRealm.
//!
//! Three components live here, all scoped to the one room a session can
//! occupy at a time:
//!
//! 1. **Membership** — [`RoomClient`]: host, join, or leave a room
//!    (`NoRoom → Hosting/Joined → NoRoom`)
//! 2. **Messaging** — [`MessageChannel`]: fire-and-forget send plus a
//!    polled, de-duplicated inbound buffer
//! 3. **Presence** — [`PresenceTracker`]: who is in the room, as last
//!    observed
//!
//! # How it fits in the stack
//!
//! ```text
//! Application (above)  ← calls host/join/send/receive/list
//!     ↕
//! Room Layer (this crate)  ← owns room state, buffer, presence snapshot
//!     ↕
//! Session Layer (below)  ← consulted before every operation
//!     ↕
//! Gateway Layer  ← performs the remote exchanges
//! ```
//!
//! # Invalidation by tagging
//!
//! Nothing here is ever cleared by another component. Instead, the active
//! room is tagged with the session generation it was entered under, and the
//! message buffer and presence snapshot are tagged with the room epoch they
//! were filled at. Logout bumps the generation; entering or leaving a room
//! bumps the epoch; state carrying a stale tag is simply dead. Each value
//! keeps exactly one writer, and the cascade (logout kills the room, a room
//! switch kills the buffer and snapshot) happens lazily and totally.

mod client;
mod config;
mod error;
mod messages;
mod presence;
mod room;

pub use client::RoomClient;
pub use config::{ChannelConfig, PresenceConfig};
pub use error::RoomError;
pub use messages::MessageChannel;
pub use presence::{PresenceSnapshot, PresenceTracker};
pub use room::{ActiveRoom, RoomHandle, RoomRole};
