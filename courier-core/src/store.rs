//! Ordered in-memory message store.
//!
//! Append-only sequence of message records, mutable by id. Each record may
//! move to a terminal status exactly once; later transitions are rejected so
//! callers never double-count statistics.

use std::collections::HashMap;

use chrono::Utc;

use crate::message::{ChannelKind, Message, MessageId, MessageStatus};

/// Errors from message store transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown message: {id}")]
    UnknownMessage { id: MessageId },

    #[error("Message {id} is already {status}")]
    AlreadyTerminal { id: MessageId, status: MessageStatus },
}

/// Ordered store of every submitted message across both channels.
#[derive(Debug)]
pub struct MessageStore {
    messages: Vec<Message>,
    index: HashMap<MessageId, usize>,
    next_id: u64,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    /// Creates an empty store. Identifiers start at 1.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Appends a new message with a fresh identifier and initial status.
    ///
    /// Reliable messages start `Pending` and unacknowledged, unreliable
    /// messages start `Sent`.
    pub fn submit(
        &mut self,
        content: impl Into<String>,
        channel: ChannelKind,
        sequence_number: Option<u64>,
    ) -> &Message {
        let id = MessageId::new(self.next_id);
        self.next_id += 1;

        let (status, acknowledged) = match channel {
            ChannelKind::Reliable => (MessageStatus::Pending, Some(false)),
            ChannelKind::Unreliable => (MessageStatus::Sent, None),
        };

        let position = self.messages.len();
        self.messages.push(Message {
            id,
            content: content.into(),
            created_at: Utc::now(),
            channel,
            status,
            sequence_number,
            acknowledged,
        });
        self.index.insert(id, position);

        &self.messages[position]
    }

    /// Moves a message to `Delivered`, optionally setting its acknowledgment.
    ///
    /// # Errors
    /// - `StoreError::UnknownMessage` - No record with this id
    /// - `StoreError::AlreadyTerminal` - Record was already delivered or failed
    pub fn mark_delivered(
        &mut self,
        id: MessageId,
        acknowledged: bool,
    ) -> Result<&Message, StoreError> {
        let message = self.transition(id, MessageStatus::Delivered)?;
        if acknowledged {
            message.acknowledged = Some(true);
        }
        Ok(&*message)
    }

    /// Moves a message to `Failed`.
    ///
    /// # Errors
    /// - `StoreError::UnknownMessage` - No record with this id
    /// - `StoreError::AlreadyTerminal` - Record was already delivered or failed
    pub fn mark_failed(&mut self, id: MessageId) -> Result<&Message, StoreError> {
        let message = self.transition(id, MessageStatus::Failed)?;
        Ok(&*message)
    }

    fn transition(
        &mut self,
        id: MessageId,
        status: MessageStatus,
    ) -> Result<&mut Message, StoreError> {
        let position = *self
            .index
            .get(&id)
            .ok_or(StoreError::UnknownMessage { id })?;
        let message = &mut self.messages[position];

        if message.status.is_terminal() {
            return Err(StoreError::AlreadyTerminal {
                id,
                status: message.status,
            });
        }

        message.status = status;
        Ok(message)
    }

    /// Returns the message with the given id.
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.index.get(&id).map(|&position| &self.messages[position])
    }

    /// Returns a channel's messages in submission order.
    pub fn list_by_channel(&self, channel: ChannelKind) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(move |message| message.channel == channel)
    }

    /// Counts a channel's messages that have not reached a terminal status.
    pub fn in_flight(&self, channel: ChannelKind) -> usize {
        self.list_by_channel(channel)
            .filter(|message| !message.is_terminal())
            .count()
    }

    /// Total number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no messages are stored.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Removes every message. Identifiers keep increasing afterwards.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.index.clear();
    }
}
