//! Error types for the gateway layer.

use roomrealm_protocol::ProtocolError;

/// Errors that can occur while performing a remote operation.
///
/// These are deliberately transport-agnostic: the trait (and everything
/// above it) compiles without any HTTP dependency, and a different gateway
/// implementation maps its own failures into the same variants.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The service could not be reached (DNS, connect, TLS, broken pipe).
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The exchange did not complete within the gateway's timeout.
    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success HTTP status.
    #[error("service returned status {0}")]
    Status(u16),

    /// The response body could not be decoded into the expected record.
    #[error("malformed response: {0}")]
    Malformed(#[source] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_code() {
        let err = GatewayError::Status(503);
        assert_eq!(err.to_string(), "service returned status 503");
    }

    #[test]
    fn test_malformed_carries_protocol_source() {
        use std::error::Error;
        let err = GatewayError::Malformed(ProtocolError::MissingField(
            "message",
        ));
        assert!(err.source().is_some());
    }
}
