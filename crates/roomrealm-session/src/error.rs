//! Error types for the session layer.

use roomrealm_gateway::GatewayError;
use roomrealm_protocol::ProtocolError;

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The service rejected the credentials: unknown user, invalid
    /// password, or username collision on account creation. The string is
    /// the service's explanation.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A different user is already logged in. Log out first.
    #[error("already authenticated as {0}")]
    AlreadyAuthenticated(String),

    /// The session changed while the request was in flight — for example,
    /// two overlapping logins raced and the other one won. The losing
    /// transition is rejected rather than applied over stale state.
    #[error("session changed while the request was in flight")]
    ConcurrentModification,

    /// A network-level failure. Local state is unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The service's response violated the protocol schema.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
