//! Unified error type for the RoomRealm client.

use roomrealm_gateway::GatewayError;
use roomrealm_protocol::ProtocolError;
use roomrealm_room::RoomError;
use roomrealm_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `roomrealm` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RoomRealmError {
    /// A gateway-level error (unreachable, timeout, bad status, malformed).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A protocol-level error (encode, decode, missing field).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (auth rejection, wrong state).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A room-level error (no room, not found, rejected).
    #[error(transparent)]
    Room(#[from] RoomError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_gateway_error() {
        let err = GatewayError::Unreachable("gone".into());
        let realm_err: RoomRealmError = err.into();
        assert!(matches!(realm_err, RoomRealmError::Gateway(_)));
        assert!(realm_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::MissingField("message");
        let realm_err: RoomRealmError = err.into();
        assert!(matches!(realm_err, RoomRealmError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::Auth("nope".into());
        let realm_err: RoomRealmError = err.into();
        assert!(matches!(realm_err, RoomRealmError::Session(_)));
    }

    #[test]
    fn test_from_room_error() {
        let err = RoomError::NoRoom;
        let realm_err: RoomRealmError = err.into();
        assert!(matches!(realm_err, RoomRealmError::Room(_)));
    }
}
