//! Codec trait and implementations for serializing/deserializing records.
//!
//! A "codec" converts between Rust types and raw bytes. The protocol layer
//! doesn't care HOW records are serialized — it just needs something that
//! implements the [`Codec`] trait, so the wire encoding can be swapped
//! without touching any other code.
//!
//! Currently we provide [`JsonCodec`] — JSON is the reference encoding the
//! coordination service speaks, and it's human-readable, which makes
//! debugging a failed exchange straightforward.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the codec is held by the gateway, which
/// may be shared across async tasks for the lifetime of the client.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected record.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use roomrealm_protocol::{Codec, JsonCodec, StatusResponse};
///
/// let codec = JsonCodec;
/// let resp = StatusResponse::rejected("username taken");
///
/// let bytes = codec.encode(&resp).unwrap();
/// let decoded: StatusResponse = codec.decode(&bytes).unwrap();
/// assert_eq!(resp, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{ReceiveMessageResponse, StatusResponse};

    #[test]
    fn test_decode_truncated_body_returns_decode_error() {
        let codec = JsonCodec;
        let result: Result<StatusResponse, _> =
            codec.decode(br#"{"success":tr"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_wrong_shape_returns_decode_error() {
        let codec = JsonCodec;
        // An array where a record is expected.
        let result: Result<ReceiveMessageResponse, _> =
            codec.decode(b"[1,2,3]");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_then_decode_preserves_optional_message() {
        let codec = JsonCodec;
        let resp = StatusResponse::ok();
        let bytes = codec.encode(&resp).unwrap();
        // `message: None` is skipped entirely, not serialized as null.
        assert_eq!(bytes, br#"{"success":true}"#);
        let decoded: StatusResponse = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, resp);
    }
}
