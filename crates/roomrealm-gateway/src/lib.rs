//! Transport gateway for RoomRealm.
//!
//! Provides the [`Gateway`] trait that abstracts the request/response
//! exchange with the remote coordination service — one async method per
//! remote verb, typed with the records from `roomrealm-protocol`.
//!
//! The session and room layers only ever talk to a `Gateway`. Everything
//! network-shaped — URLs, headers, TLS, timeouts — lives behind this trait
//! and never leaks into client state logic. That also makes the upper layers
//! trivially testable: a scripted in-memory gateway is a complete stand-in.
//!
//! # Feature Flags
//!
//! - `http` (default) — JSON-over-HTTPS gateway via `reqwest`
//!   ([`HttpGateway`]), the reference encoding of the coordination service.

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::GatewayError;
#[cfg(feature = "http")]
pub use http::{HttpGateway, HttpGatewayConfig};

use roomrealm_protocol::{
    ConnectAccountRequest, CreateAccountRequest, HostRoomRequest,
    JoinRoomRequest, ListUsersRequest, ListUsersResponse,
    ReceiveMessageRequest, ReceiveMessageResponse, SendMessageRequest,
    StatusResponse,
};

/// Performs named remote operations against the coordination service.
///
/// One method per verb in the service contract. Each is a single
/// request/response exchange: the gateway owns the network-level policy
/// (connection reuse, timeout), the caller owns all client state.
///
/// The gateway is stateless from the core's perspective — no call here
/// depends on an earlier call having happened.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` so one gateway instance can be shared (via `Arc`)
/// by the session, room, message, and presence components across tasks.
pub trait Gateway: Send + Sync + 'static {
    /// Registers a new account.
    async fn create_account(
        &self,
        req: CreateAccountRequest,
    ) -> Result<StatusResponse, GatewayError>;

    /// Authenticates an existing account by username.
    async fn connect_account(
        &self,
        req: ConnectAccountRequest,
    ) -> Result<StatusResponse, GatewayError>;

    /// Creates a room with the caller as host.
    async fn host_room(
        &self,
        req: HostRoomRequest,
    ) -> Result<StatusResponse, GatewayError>;

    /// Joins an existing room.
    async fn join_room(
        &self,
        req: JoinRoomRequest,
    ) -> Result<StatusResponse, GatewayError>;

    /// Posts a message to the sender's current room.
    async fn send_message(
        &self,
        req: SendMessageRequest,
    ) -> Result<StatusResponse, GatewayError>;

    /// Polls for the latest message in a room.
    ///
    /// An empty room is a successful response with no message — never an
    /// error.
    async fn receive_message(
        &self,
        req: ReceiveMessageRequest,
    ) -> Result<ReceiveMessageResponse, GatewayError>;

    /// Fetches the member list of a room, in service order.
    async fn list_users(
        &self,
        req: ListUsersRequest,
    ) -> Result<ListUsersResponse, GatewayError>;
}

/// A shared gateway is itself a gateway: every verb delegates to the
/// wrapped instance.
impl<G: Gateway> Gateway for std::sync::Arc<G> {
    async fn create_account(
        &self,
        req: CreateAccountRequest,
    ) -> Result<StatusResponse, GatewayError> {
        (**self).create_account(req).await
    }

    async fn connect_account(
        &self,
        req: ConnectAccountRequest,
    ) -> Result<StatusResponse, GatewayError> {
        (**self).connect_account(req).await
    }

    async fn host_room(
        &self,
        req: HostRoomRequest,
    ) -> Result<StatusResponse, GatewayError> {
        (**self).host_room(req).await
    }

    async fn join_room(
        &self,
        req: JoinRoomRequest,
    ) -> Result<StatusResponse, GatewayError> {
        (**self).join_room(req).await
    }

    async fn send_message(
        &self,
        req: SendMessageRequest,
    ) -> Result<StatusResponse, GatewayError> {
        (**self).send_message(req).await
    }

    async fn receive_message(
        &self,
        req: ReceiveMessageRequest,
    ) -> Result<ReceiveMessageResponse, GatewayError> {
        (**self).receive_message(req).await
    }

    async fn list_users(
        &self,
        req: ListUsersRequest,
    ) -> Result<ListUsersResponse, GatewayError> {
        (**self).list_users(req).await
    }
}
