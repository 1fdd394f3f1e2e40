//! Error types for the protocol layer.
//!
//! Each crate in RoomRealm defines its own error enum. This keeps errors
//! specific and meaningful — when you see a `ProtocolError`, you know the
//! problem is with the shape of the data, not with networking or client
//! state.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a record into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a record).
    ///
    /// Common causes: malformed JSON, missing required fields, wrong data
    /// types, or a truncated body.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The response parsed fine but fails the protocol schema — a field the
    /// contract requires in this situation is absent. For example, a
    /// rejection with no explanation.
    #[error("response missing expected field: {0}")]
    MissingField(&'static str),
}
