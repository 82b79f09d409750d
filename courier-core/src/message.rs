//! Message records tracked by the delivery simulation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique message identifier.
///
/// Assigned monotonically by the message store and never reused, including
/// across a global clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// Creates identifier from raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery channel a message was submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Guaranteed, ordered delivery (TCP analog).
    #[serde(alias = "tcp")]
    Reliable,
    /// Best-effort delivery (UDP analog).
    #[serde(alias = "udp")]
    Unreliable,
}

impl ChannelKind {
    /// Both channels in display order.
    pub const ALL: [ChannelKind; 2] = [ChannelKind::Reliable, ChannelKind::Unreliable];

    /// Returns the lowercase channel name.
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::Reliable => "reliable",
            ChannelKind::Unreliable => "unreliable",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reliable" | "tcp" => Ok(ChannelKind::Reliable),
            "unreliable" | "udp" => Ok(ChannelKind::Unreliable),
            _ => Err(format!("Invalid channel kind: {s}")),
        }
    }
}

/// Lifecycle state of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Submitted to the reliable channel, awaiting acknowledgment.
    Pending,
    /// Submitted to the unreliable channel, outcome unknown.
    Sent,
    /// Reached the receiver.
    Delivered,
    /// Lost in transit.
    Failed,
}

impl MessageStatus {
    /// Returns true if the status never changes again.
    pub fn is_terminal(self) -> bool {
        matches!(self, MessageStatus::Delivered | MessageStatus::Failed)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Sent => "sent",
            MessageStatus::Delivered => "delivered",
            MessageStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A submitted message and its current delivery state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub channel: ChannelKind,
    pub status: MessageStatus,
    /// Per-channel sequence number, reliable channel only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,
    /// Acknowledgment flag, reliable channel only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<bool>,
}

impl Message {
    /// Returns true once the message has been delivered or lost.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!MessageStatus::Pending.is_terminal());
        assert!(!MessageStatus::Sent.is_terminal());
        assert!(MessageStatus::Delivered.is_terminal());
        assert!(MessageStatus::Failed.is_terminal());
    }

    #[test]
    fn test_channel_kind_parsing_accepts_protocol_aliases() {
        assert_eq!("tcp".parse::<ChannelKind>(), Ok(ChannelKind::Reliable));
        assert_eq!("UDP".parse::<ChannelKind>(), Ok(ChannelKind::Unreliable));
        assert_eq!("reliable".parse::<ChannelKind>(), Ok(ChannelKind::Reliable));
        assert!("sctp".parse::<ChannelKind>().is_err());
    }

    #[test]
    fn test_channel_kind_serde_names() {
        let json = serde_json::to_string(&ChannelKind::Unreliable).unwrap();
        assert_eq!(json, "\"unreliable\"");

        let parsed: ChannelKind = serde_json::from_str("\"tcp\"").unwrap();
        assert_eq!(parsed, ChannelKind::Reliable);
    }

    #[test]
    fn test_unreliable_message_omits_reliable_fields() {
        let message = Message {
            id: MessageId::new(7),
            content: "hello".to_string(),
            created_at: Utc::now(),
            channel: ChannelKind::Unreliable,
            status: MessageStatus::Sent,
            sequence_number: None,
            acknowledged: None,
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["status"], "sent");
        assert!(value.get("sequence_number").is_none());
        assert!(value.get("acknowledged").is_none());
    }
}
