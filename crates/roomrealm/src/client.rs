//! The facade: one client wrapping every layer.
//!
//! [`RoomRealmClient`] wires a gateway into the session manager, the room
//! client, the message channel, and the presence tracker, and re-exposes
//! their operations behind the single [`RoomRealmError`] type. Callers who
//! need a component directly (for example, to clone a channel into a
//! polling task) can reach each one through the accessors.

use std::sync::Arc;

use roomrealm_gateway::Gateway;
use roomrealm_protocol::Message;
use roomrealm_room::{
    ActiveRoom, ChannelConfig, MessageChannel, PresenceConfig,
    PresenceTracker, RoomClient,
};
use roomrealm_session::{SessionManager, SessionState};

use crate::RoomRealmError;

/// Configuration for the whole client, one section per component.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Message buffering.
    pub channel: ChannelConfig,
    /// Presence caching.
    pub presence: PresenceConfig,
}

/// A complete RoomRealm client: account, room, messages, and presence
/// over one gateway.
///
/// Cheap to clone; clones share all state.
pub struct RoomRealmClient<G> {
    session: SessionManager<G>,
    rooms: RoomClient<G>,
    channel: MessageChannel<G>,
    presence: PresenceTracker<G>,
}

impl<G> Clone for RoomRealmClient<G> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            rooms: self.rooms.clone(),
            channel: self.channel.clone(),
            presence: self.presence.clone(),
        }
    }
}

impl<G: Gateway> RoomRealmClient<G> {
    /// Creates a client over `gateway` with default configuration.
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, ClientConfig::default())
    }

    /// Creates a client over `gateway` with explicit configuration.
    pub fn with_config(gateway: G, config: ClientConfig) -> Self {
        let gateway = Arc::new(gateway);
        let session = SessionManager::new(Arc::clone(&gateway));
        let rooms = RoomClient::new(Arc::clone(&gateway), session.handle());
        let channel = MessageChannel::with_config(
            Arc::clone(&gateway),
            rooms.handle(),
            config.channel,
        );
        let presence = PresenceTracker::with_config(
            gateway,
            rooms.handle(),
            config.presence,
        );
        Self {
            session,
            rooms,
            channel,
            presence,
        }
    }

    // -- accounts ---------------------------------------------------------

    /// Registers a new account. Does not log in; call
    /// [`login`](Self::login) afterwards.
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), RoomRealmError> {
        self.session.create_account(username, password).await?;
        Ok(())
    }

    /// Logs in as `username`.
    pub async fn login(&self, username: &str) -> Result<(), RoomRealmError> {
        self.session.login(username).await?;
        Ok(())
    }

    /// Logs out, leaving the current room (if any) on the way.
    pub fn logout(&self) {
        self.rooms.leave();
        self.session.logout();
    }

    /// The current session state.
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    // -- rooms ------------------------------------------------------------

    /// Hosts a new room and enters it.
    pub async fn host(&self, room_name: &str) -> Result<(), RoomRealmError> {
        self.rooms.host(room_name).await?;
        Ok(())
    }

    /// Joins an existing room.
    pub async fn join(&self, room_name: &str) -> Result<(), RoomRealmError> {
        self.rooms.join(room_name).await?;
        Ok(())
    }

    /// Leaves the current room. No-op when not in one.
    pub fn leave(&self) {
        self.rooms.leave();
    }

    /// The room this client currently occupies, if any.
    pub fn current_room(&self) -> Option<ActiveRoom> {
        self.rooms.current_room()
    }

    // -- messages ---------------------------------------------------------

    /// Sends `text` to the current room.
    pub async fn send(&self, text: &str) -> Result<(), RoomRealmError> {
        self.channel.send(text).await?;
        Ok(())
    }

    /// Polls for the latest message in the current room.
    ///
    /// `Ok(None)` means no new message — an empty room, or a poll that
    /// returned something already surfaced.
    pub async fn receive(&self) -> Result<Option<Message>, RoomRealmError> {
        Ok(self.channel.receive().await?)
    }

    /// The most recent message received in the current room, if any.
    pub fn last_message(&self) -> Option<Message> {
        self.channel.last_message()
    }

    // -- presence ---------------------------------------------------------

    /// The current members of the room, in service order.
    pub async fn list_users(&self) -> Result<Vec<String>, RoomRealmError> {
        Ok(self.presence.list().await?)
    }

    // -- component access -------------------------------------------------

    /// The session manager.
    pub fn session(&self) -> &SessionManager<G> {
        &self.session
    }

    /// The room client.
    pub fn rooms(&self) -> &RoomClient<G> {
        &self.rooms
    }

    /// The message channel.
    pub fn channel(&self) -> &MessageChannel<G> {
        &self.channel
    }

    /// The presence tracker.
    pub fn presence(&self) -> &PresenceTracker<G> {
        &self.presence
    }
}

#[cfg(feature = "http")]
impl RoomRealmClient<roomrealm_gateway::HttpGateway> {
    /// Creates a client over an HTTP gateway talking to `base_url`.
    pub fn connect(
        base_url: impl Into<String>,
    ) -> Result<Self, RoomRealmError> {
        let gateway = roomrealm_gateway::HttpGateway::new(base_url)?;
        Ok(Self::new(gateway))
    }
}
