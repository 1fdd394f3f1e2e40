//! Request and response records for the RoomRealm wire protocol.
//!
//! Each remote verb is one request/response exchange. These are the exact
//! structures that get serialized, sent to the coordination service, and
//! deserialized on the way back.
//!
//! Field names are serialized in camelCase (`roomName`, `lastMessage`) to
//! match the service's JSON convention.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A chat message as observed by a client.
///
/// `sequence` is a per-room counter assigned by the service, monotonically
/// non-decreasing in the order messages were accepted. Clients use it to
/// detect and drop duplicate deliveries across repeated polls — the service
/// returns "the latest message", so two polls in a row usually see the same
/// one.
///
/// `timestamp` is service time in milliseconds since the Unix epoch. It is
/// informational; ordering decisions use `sequence` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Username of the member who sent the message.
    pub sender: String,
    /// The message text.
    pub body: String,
    /// Per-room monotonic sequence number, assigned by the service.
    pub sequence: u64,
    /// Service-side send time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Requests (one per verb)
// ---------------------------------------------------------------------------

/// `createAccount` — register a new account.
///
/// This is the only exchange that carries a password. Logging in later uses
/// [`ConnectAccountRequest`], which carries the username alone — the service
/// keeps that asymmetry, and so does this protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
}

/// `connectAccount` — authenticate an existing account by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectAccountRequest {
    pub username: String,
}

/// `hostRoom` — create a room and enter it as its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRoomRequest {
    pub username: String,
    pub room_name: String,
}

/// `joinRoom` — enter an existing room as a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub username: String,
    pub room_name: String,
}

/// `sendMessage` — post a message to the sender's current room.
///
/// The room is implicit: the service routes by the sender's membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub username: String,
    pub message: String,
}

/// `receiveMessage` — poll for the latest message in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveMessageRequest {
    pub username: String,
    pub room_name: String,
}

/// `listUsers` — fetch the current member list of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    pub room_name: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Outcome of a command-style exchange (createAccount, connectAccount,
/// hostRoom, joinRoom, sendMessage).
///
/// `success` says whether the service accepted the request. `message` is the
/// service's human-readable explanation — always present on rejection
/// (a rejection without one is a schema violation, see
/// [`StatusResponse::rejection`]), optional on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    /// A successful response with no message. Handy in tests.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A rejection with the given explanation. Handy in tests.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Returns the explanation for a rejected request.
    ///
    /// # Errors
    /// Returns [`ProtocolError::MissingField`] if the service rejected the
    /// request without saying why — the response parsed fine, but it fails
    /// the schema, which requires `message` alongside `success: false`.
    pub fn rejection(&self) -> Result<&str, crate::ProtocolError> {
        debug_assert!(!self.success, "rejection() called on a success");
        self.message
            .as_deref()
            .ok_or(crate::ProtocolError::MissingField("message"))
    }
}

/// Response to `receiveMessage`.
///
/// `last_message: None` is the "no messages yet" marker — a valid success
/// outcome, not a failure. The distinction from a transport error is made by
/// the gateway (an error never produces a response record at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveMessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
}

/// Response to `listUsers`.
///
/// `users` is in whatever order the service supplied. The protocol layer
/// does not sort it and does not filter duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<String>,
}
