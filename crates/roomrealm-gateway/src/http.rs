//! HTTP gateway implementation using `reqwest`.
//!
//! JSON-over-HTTPS is the reference encoding of the coordination service:
//! command verbs (createAccount, connectAccount, hostRoom, joinRoom,
//! sendMessage) are POSTs with a JSON body; the polling verbs
//! (receiveMessage, listUsers) are GETs with query parameters. The verb name
//! is the path segment: `{base_url}/createAccount` and so on.

use std::time::Duration;

use roomrealm_protocol::{
    Codec, ConnectAccountRequest, CreateAccountRequest, HostRoomRequest,
    JoinRoomRequest, JsonCodec, ListUsersRequest, ListUsersResponse,
    ReceiveMessageRequest, ReceiveMessageResponse, SendMessageRequest,
    StatusResponse,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{Gateway, GatewayError};

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Base URL of the coordination service, without a trailing slash
    /// (one is stripped if present).
    pub base_url: String,

    /// Per-request deadline. A request that exceeds it surfaces as
    /// [`GatewayError::Timeout`] and leaves all client state unchanged.
    ///
    /// Default: 10 seconds.
    pub timeout: Duration,
}

impl HttpGatewayConfig {
    /// Creates a config for the given service URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A [`Gateway`] that speaks JSON-over-HTTPS to the coordination service.
///
/// Cheap to share: `reqwest::Client` is an `Arc` around a connection pool
/// internally, and the codec is a zero-sized type.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    codec: JsonCodec,
}

impl HttpGateway {
    /// Creates a gateway for the given service URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_config(HttpGatewayConfig::new(base_url))
    }

    /// Creates a gateway from an explicit config.
    pub fn with_config(
        config: HttpGatewayConfig,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        let base_url =
            config.base_url.trim_end_matches('/').to_string();
        tracing::debug!(%base_url, "HTTP gateway created");

        Ok(Self {
            client,
            base_url,
            codec: JsonCodec,
        })
    }

    fn endpoint(&self, verb: &str) -> String {
        format!("{}/{}", self.base_url, verb)
    }

    /// Sends a POST with a JSON body and decodes the JSON response.
    async fn post<Req, Resp>(
        &self,
        verb: &str,
        req: &Req,
    ) -> Result<Resp, GatewayError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body =
            self.codec.encode(req).map_err(GatewayError::Malformed)?;
        let response = self
            .client
            .post(self.endpoint(verb))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.decode_response(verb, response).await
    }

    /// Sends a GET with the request encoded as query parameters.
    async fn get<Req, Resp>(
        &self,
        verb: &str,
        req: &Req,
    ) -> Result<Resp, GatewayError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.endpoint(verb))
            .query(req)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.decode_response(verb, response).await
    }

    async fn decode_response<Resp: DeserializeOwned>(
        &self,
        verb: &str,
        response: reqwest::Response,
    ) -> Result<Resp, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(verb, status = status.as_u16(), "service error");
            return Err(GatewayError::Status(status.as_u16()));
        }
        let bytes =
            response.bytes().await.map_err(map_reqwest_error)?;
        self.codec.decode(&bytes).map_err(GatewayError::Malformed)
    }
}

/// Maps a `reqwest` failure into the transport-agnostic error variants.
fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Unreachable(e.to_string())
    }
}

impl Gateway for HttpGateway {
    async fn create_account(
        &self,
        req: CreateAccountRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.post("createAccount", &req).await
    }

    async fn connect_account(
        &self,
        req: ConnectAccountRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.post("connectAccount", &req).await
    }

    async fn host_room(
        &self,
        req: HostRoomRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.post("hostRoom", &req).await
    }

    async fn join_room(
        &self,
        req: JoinRoomRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.post("joinRoom", &req).await
    }

    async fn send_message(
        &self,
        req: SendMessageRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.post("sendMessage", &req).await
    }

    async fn receive_message(
        &self,
        req: ReceiveMessageRequest,
    ) -> Result<ReceiveMessageResponse, GatewayError> {
        self.get("receiveMessage", &req).await
    }

    async fn list_users(
        &self,
        req: ListUsersRequest,
    ) -> Result<ListUsersResponse, GatewayError> {
        self.get("listUsers", &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_verb_to_base_url() {
        let gw = HttpGateway::new("https://svc.example.com/api").unwrap();
        assert_eq!(
            gw.endpoint("createAccount"),
            "https://svc.example.com/api/createAccount"
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash_from_base_url() {
        let gw = HttpGateway::new("https://svc.example.com/").unwrap();
        assert_eq!(
            gw.endpoint("listUsers"),
            "https://svc.example.com/listUsers"
        );
    }

    #[test]
    fn test_config_timeout_override() {
        let config = HttpGatewayConfig::new("https://svc.example.com")
            .timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_unreachable_service_returns_unreachable_error() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let gw = HttpGateway::with_config(
            HttpGatewayConfig::new("http://192.0.2.1:9")
                .timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let result = gw
            .connect_account(ConnectAccountRequest {
                username: "alice".into(),
            })
            .await;

        assert!(matches!(
            result,
            Err(GatewayError::Unreachable(_) | GatewayError::Timeout)
        ));
    }
}
