//! The message channel: outbound send and buffered inbound receive.
//!
//! Sending is fire-and-forget, at-most-once: a transport failure is
//! reported to the caller and never retried here, because a duplicated
//! chat line in front of users is judged worse than a silently lost one.
//! (If the service ever accepts a client-supplied idempotency token, that
//! judgement should be revisited.)
//!
//! Receiving is a poll: the service reports "the latest message", so the
//! same message shows up on consecutive polls. The channel de-duplicates
//! by sequence number — anything at or below the highest sequence already
//! seen is dropped — and keeps a bounded buffer of what it surfaced, with
//! the most recent always available as "last message".

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use roomrealm_gateway::Gateway;
use roomrealm_protocol::{
    Message, ReceiveMessageRequest, SendMessageRequest,
};

use crate::{ChannelConfig, RoomError, RoomHandle};

/// Received messages for the current room, in the order they were
/// surfaced.
///
/// Tagged with the room epoch it was filled at: when the room changes the
/// content is dead, and the next receive starts the buffer (and the
/// de-dup watermark) over.
struct InboundBuffer {
    messages: VecDeque<Message>,
    /// Highest sequence number surfaced so far. The de-dup watermark.
    last_seq: Option<u64>,
    /// The room epoch this buffer's content belongs to.
    room_epoch: u64,
}

impl InboundBuffer {
    fn reset_for(&mut self, epoch: u64) {
        self.messages.clear();
        self.last_seq = None;
        self.room_epoch = epoch;
    }
}

fn lock(buffer: &Mutex<InboundBuffer>) -> MutexGuard<'_, InboundBuffer> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sends and receives chat messages scoped to the current room.
///
/// Built from a [`RoomClient`](crate::RoomClient)'s
/// [`handle`](crate::RoomClient::handle); every operation consults the
/// session and room state first and fails with a state error — before any
/// network call — when there is no live room.
pub struct MessageChannel<G> {
    gateway: Arc<G>,
    room: RoomHandle,
    buffer: Arc<Mutex<InboundBuffer>>,
    capacity: usize,
}

impl<G> Clone for MessageChannel<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            room: self.room.clone(),
            buffer: Arc::clone(&self.buffer),
            capacity: self.capacity,
        }
    }
}

impl<G: Gateway> MessageChannel<G> {
    /// Creates a channel with the default buffer capacity.
    pub fn new(gateway: Arc<G>, room: RoomHandle) -> Self {
        Self::with_config(gateway, room, ChannelConfig::default())
    }

    /// Creates a channel with an explicit config.
    pub fn with_config(
        gateway: Arc<G>,
        room: RoomHandle,
        config: ChannelConfig,
    ) -> Self {
        // A zero-capacity buffer couldn't answer "last message".
        let capacity = config.capacity.max(1);
        Self {
            gateway,
            room,
            buffer: Arc::new(Mutex::new(InboundBuffer {
                messages: VecDeque::new(),
                last_seq: None,
                room_epoch: 0,
            })),
            capacity,
        }
    }

    /// Sends `text` to the current room. At-most-once: not retried.
    ///
    /// # Errors
    /// - [`RoomError::NotAuthenticated`] / [`RoomError::NoRoom`] — state
    ///   guards, raised before any network call
    /// - [`RoomError::Rejected`] — the service refused the message
    /// - [`RoomError::Gateway`] — transport failure; the message may or
    ///   may not have been delivered, and is NOT resent
    pub async fn send(&self, text: &str) -> Result<(), RoomError> {
        let ctx = self.room.current()?;
        let resp = self
            .gateway
            .send_message(SendMessageRequest {
                username: ctx.username,
                message: text.to_string(),
            })
            .await?;
        if !resp.success {
            return Err(RoomError::Rejected(
                resp.rejection()?.to_string(),
            ));
        }
        tracing::debug!(room = %ctx.room_name, "message sent");
        Ok(())
    }

    /// Polls for the latest message in the current room.
    ///
    /// Returns `Ok(None)` when the room has no messages yet — a valid
    /// outcome, not a failure — and also when the poll returned a message
    /// already surfaced (the service repeats its latest; duplicates are
    /// dropped by sequence number). A transport failure is an `Err`,
    /// distinguishable from absence.
    ///
    /// The epoch observed at call issuance is re-validated after the
    /// exchange: if the room changed while the poll was in flight, the
    /// response belongs to the old room and is discarded as `Ok(None)`.
    ///
    /// # Errors
    /// - [`RoomError::NotAuthenticated`] / [`RoomError::NoRoom`] — state
    ///   guards, raised before any network call
    /// - [`RoomError::Gateway`] — transport failure
    pub async fn receive(&self) -> Result<Option<Message>, RoomError> {
        let ctx = self.room.current()?;
        let resp = self
            .gateway
            .receive_message(ReceiveMessageRequest {
                username: ctx.username,
                room_name: ctx.room_name.clone(),
            })
            .await?;
        if self.room.epoch() != ctx.epoch {
            tracing::debug!(
                room = %ctx.room_name,
                "room changed mid-poll, response discarded"
            );
            return Ok(None);
        }
        let Some(msg) = resp.last_message else {
            return Ok(None);
        };

        let mut buffer = lock(&self.buffer);
        if buffer.room_epoch != ctx.epoch {
            buffer.reset_for(ctx.epoch);
        }
        if buffer.last_seq.is_some_and(|last| msg.sequence <= last) {
            tracing::debug!(
                sequence = msg.sequence,
                "duplicate message dropped"
            );
            return Ok(None);
        }
        buffer.last_seq = Some(msg.sequence);
        buffer.messages.push_back(msg.clone());
        if buffer.messages.len() > self.capacity {
            buffer.messages.pop_front();
        }
        Ok(Some(msg))
    }

    /// The most recent message received in the current room, if any.
    ///
    /// `None` if nothing has been received, there is no live room, or the
    /// room changed since the buffer was filled.
    pub fn last_message(&self) -> Option<Message> {
        let ctx = self.room.current().ok()?;
        let buffer = lock(&self.buffer);
        if buffer.room_epoch != ctx.epoch {
            return None;
        }
        buffer.messages.back().cloned()
    }

    /// All buffered messages for the current room, oldest first.
    ///
    /// Empty under the same conditions [`last_message`](Self::last_message)
    /// returns `None`. Sequence numbers are strictly increasing across the
    /// returned slice.
    pub fn buffered(&self) -> Vec<Message> {
        let Ok(ctx) = self.room.current() else {
            return Vec::new();
        };
        let buffer = lock(&self.buffer);
        if buffer.room_epoch != ctx.epoch {
            return Vec::new();
        }
        buffer.messages.iter().cloned().collect()
    }
}
