//! End-to-end scenarios through the facade, over a scripted gateway.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use roomrealm::{
    Gateway, GatewayError, RoomError, RoomRealmClient, RoomRealmError,
    SessionError, SessionState,
};
use roomrealm_protocol::{
    ConnectAccountRequest, CreateAccountRequest, HostRoomRequest,
    JoinRoomRequest, ListUsersRequest, ListUsersResponse,
    ReceiveMessageRequest, ReceiveMessageResponse, SendMessageRequest,
    StatusResponse,
};

// =========================================================================
// Scripted fake gateway
// =========================================================================

/// Responses are scripted as raw JSON, the same bytes the real service
/// would produce, and decoded through serde on the way out.
#[derive(Default)]
struct FakeGateway {
    responses: Mutex<VecDeque<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeGateway {
    fn scripted(responses: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().copied().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T: serde::de::DeserializeOwned>(
        &self,
        verb: &'static str,
    ) -> Result<T, GatewayError> {
        self.calls.lock().unwrap().push(verb);
        let raw = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted {verb} call"));
        Ok(serde_json::from_str(raw).expect("scripted JSON must decode"))
    }
}

impl Gateway for FakeGateway {
    async fn create_account(
        &self,
        _req: CreateAccountRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.next("createAccount")
    }

    async fn connect_account(
        &self,
        _req: ConnectAccountRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.next("connectAccount")
    }

    async fn host_room(
        &self,
        _req: HostRoomRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.next("hostRoom")
    }

    async fn join_room(
        &self,
        _req: JoinRoomRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.next("joinRoom")
    }

    async fn send_message(
        &self,
        _req: SendMessageRequest,
    ) -> Result<StatusResponse, GatewayError> {
        self.next("sendMessage")
    }

    async fn receive_message(
        &self,
        _req: ReceiveMessageRequest,
    ) -> Result<ReceiveMessageResponse, GatewayError> {
        self.next("receiveMessage")
    }

    async fn list_users(
        &self,
        _req: ListUsersRequest,
    ) -> Result<ListUsersResponse, GatewayError> {
        self.next("listUsers")
    }
}

fn client_over(
    gw: &Arc<FakeGateway>,
) -> RoomRealmClient<Arc<FakeGateway>> {
    roomrealm::init_tracing();
    RoomRealmClient::new(Arc::clone(gw))
}

const OK: &str = r#"{"success":true}"#;

// =========================================================================
// Scenarios
// =========================================================================

#[tokio::test]
async fn test_fresh_user_hosts_a_room_and_chats() {
    let gw = FakeGateway::scripted(&[
        OK, // createAccount
        OK, // connectAccount
        OK, // hostRoom
        OK, // sendMessage
        r#"{}"#, // receiveMessage: nothing yet
        r#"{"lastMessage":{"sender":"bob","body":"hi alice","sequence":1,"timestamp":1700000000000}}"#,
        r#"{"users":["alice","bob"]}"#,
    ]);
    let client = client_over(&gw);

    client.create_account("alice", "hunter2").await.unwrap();
    client.login("alice").await.unwrap();
    client.host("alice-place").await.unwrap();
    client.send("hello").await.unwrap();

    // First poll: empty room is a success, not an error.
    assert!(client.receive().await.unwrap().is_none());

    // Second poll: bob has spoken.
    let msg = client.receive().await.unwrap().expect("a new message");
    assert_eq!(msg.sender, "bob");
    assert_eq!(msg.body, "hi alice");
    assert_eq!(client.last_message().unwrap().sequence, 1);

    let members = client.list_users().await.unwrap();
    assert_eq!(members, vec!["alice", "bob"]);

    assert_eq!(
        gw.calls(),
        vec![
            "createAccount",
            "connectAccount",
            "hostRoom",
            "sendMessage",
            "receiveMessage",
            "receiveMessage",
            "listUsers",
        ]
    );
}

#[tokio::test]
async fn test_guarded_actions_fail_locally_when_logged_out() {
    let gw = FakeGateway::scripted(&[]);
    let client = client_over(&gw);

    assert!(matches!(
        client.host("x").await,
        Err(RoomRealmError::Room(RoomError::NotAuthenticated))
    ));
    assert!(matches!(
        client.join("x").await,
        Err(RoomRealmError::Room(RoomError::NotAuthenticated))
    ));
    assert!(matches!(
        client.send("hi").await,
        Err(RoomRealmError::Room(RoomError::NotAuthenticated))
    ));
    assert!(matches!(
        client.receive().await,
        Err(RoomRealmError::Room(RoomError::NotAuthenticated))
    ));
    assert!(matches!(
        client.list_users().await,
        Err(RoomRealmError::Room(RoomError::NotAuthenticated))
    ));

    assert!(gw.calls().is_empty(), "guards fire before the transport");
}

#[tokio::test]
async fn test_rejected_login_leaves_client_unauthenticated() {
    let gw = FakeGateway::scripted(&[
        r#"{"success":false,"message":"unknown user"}"#,
    ]);
    let client = client_over(&gw);

    let result = client.login("mallory").await;

    assert!(matches!(
        result,
        Err(RoomRealmError::Session(SessionError::Auth(m)))
            if m == "unknown user"
    ));
    assert!(matches!(
        client.session_state(),
        SessionState::Unauthenticated
    ));

    // Still guarded: the failed login unlocked nothing.
    assert!(matches!(
        client.host("x").await,
        Err(RoomRealmError::Room(RoomError::NotAuthenticated))
    ));
    assert_eq!(gw.calls(), vec!["connectAccount"]);
}

#[tokio::test]
async fn test_logout_ends_room_membership() {
    let gw = FakeGateway::scripted(&[OK, OK]);
    let client = client_over(&gw);

    client.login("alice").await.unwrap();
    client.join("somewhere").await.unwrap();
    assert!(client.current_room().is_some());

    client.logout();

    assert!(matches!(
        client.session_state(),
        SessionState::Unauthenticated
    ));
    assert!(client.current_room().is_none());
    assert!(matches!(
        client.send("hi").await,
        Err(RoomRealmError::Room(RoomError::NotAuthenticated))
    ));
}

#[tokio::test]
async fn test_clones_share_state() {
    let gw = FakeGateway::scripted(&[OK, OK]);
    let client = client_over(&gw);
    let observer = client.clone();

    client.login("alice").await.unwrap();
    client.host("shared").await.unwrap();

    let room = observer.current_room().expect("clone sees the room");
    assert_eq!(room.name, "shared");
}
