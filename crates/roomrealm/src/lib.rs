//! # RoomRealm
//!
//! Client library for the RoomRealm chat service.
//!
//! RoomRealm wraps the service's HTTP verbs in a stateful client: log in
//! once, host or join a single room, then send messages, poll for new
//! ones, and list who is present. Every operation checks local state
//! first, so a call that cannot possibly succeed (not logged in, no room)
//! fails immediately without touching the network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roomrealm::RoomRealmClient;
//!
//! # async fn run() -> Result<(), roomrealm::RoomRealmError> {
//! let client = RoomRealmClient::connect("https://roomrealm.example")?;
//! client.login("alice").await?;
//! client.host("my-room").await?;
//! client.send("hello").await?;
//! if let Some(msg) = client.receive().await? {
//!     println!("<{}> {}", msg.sender, msg.body);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The facade is a thin wrapper: each layer (gateway, session, room,
//! messages, presence) is its own crate and can be used directly.

mod client;
mod error;

pub use client::{ClientConfig, RoomRealmClient};
pub use error::RoomRealmError;

pub use roomrealm_gateway::{Gateway, GatewayError};
#[cfg(feature = "http")]
pub use roomrealm_gateway::{HttpGateway, HttpGatewayConfig};
pub use roomrealm_protocol::{Message, ProtocolError};
pub use roomrealm_room::{
    ActiveRoom, ChannelConfig, MessageChannel, PresenceConfig,
    PresenceSnapshot, PresenceTracker, RoomClient, RoomError, RoomRole,
};
pub use roomrealm_session::{
    SessionError, SessionManager, SessionState,
};

/// Installs a `tracing` subscriber reading its filter from `RUST_LOG`,
/// defaulting to `info`.
///
/// Convenience for binaries and examples; libraries embedding RoomRealm
/// should configure their own subscriber instead. Does nothing if a
/// global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
