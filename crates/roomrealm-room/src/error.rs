//! Error types for the room layer.

use roomrealm_gateway::GatewayError;
use roomrealm_protocol::ProtocolError;

/// Errors that can occur during room, message, and presence operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No user is logged in. Raised before any network call is made.
    #[error("not authenticated")]
    NotAuthenticated,

    /// There is no active room (never entered one, left it, or the
    /// session it belonged to ended). Raised before any network call.
    #[error("no active room")]
    NoRoom,

    /// The service doesn't know the requested room.
    #[error("room {room} not found: {reason}")]
    NotFound { room: String, reason: String },

    /// The service rejected the request for some other reason. The string
    /// is the service's explanation.
    #[error("service rejected the request: {0}")]
    Rejected(String),

    /// The room or session changed while the request was in flight — for
    /// example, two overlapping `host` calls raced, or a logout landed
    /// mid-exchange. The losing transition is rejected rather than applied
    /// over stale state.
    #[error("room state changed while the request was in flight")]
    ConcurrentModification,

    /// A network-level failure. Local state is unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The service's response violated the protocol schema.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
