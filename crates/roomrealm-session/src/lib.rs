//! Session lifecycle for RoomRealm.
//!
//! This crate owns the client's authentication identity:
//!
//! 1. **Account creation** — registering a username/password pair
//!    (which deliberately does NOT log you in)
//! 2. **Login** — transitioning `Unauthenticated → Authenticated`
//! 3. **Logout** — tearing the identity down again, which also invalidates
//!    everything built on top of it (room membership, buffered messages,
//!    presence)
//!
//! # How it fits in the stack
//!
//! ```text
//! Room Layer (above)  ← consults the session before any room operation
//!     ↕
//! Session Layer (this crate)  ← owns SessionState, the only writer
//!     ↕
//! Gateway Layer (below)  ← performs the actual remote exchanges
//! ```

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::{SessionHandle, SessionManager};
pub use session::{Identity, SessionState};
