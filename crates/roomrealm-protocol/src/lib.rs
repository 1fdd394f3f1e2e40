//! Wire protocol for RoomRealm.
//!
//! This crate defines the "language" spoken between the client core and the
//! remote coordination service:
//!
//! - **Types** ([`Message`], the request/response records) — the structured
//!   records that travel on the wire, one pair per remote verb.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those records are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding, and schema violations in otherwise well-formed
//!   responses.
//!
//! # Architecture
//!
//! The protocol layer sits between the gateway (raw HTTP exchanges) and the
//! session/room layers (client state). It doesn't know about URLs, rooms, or
//! who is logged in — it only knows the shape of each exchange.
//!
//! ```text
//! Gateway (bytes) → Protocol (records) → Session / Room (client state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ConnectAccountRequest, CreateAccountRequest, HostRoomRequest,
    JoinRoomRequest, ListUsersRequest, ListUsersResponse, Message,
    ReceiveMessageRequest, ReceiveMessageResponse, SendMessageRequest,
    StatusResponse,
};
