//! Simulated delivery channels.
//!
//! Each simulator admits a message into the store, draws when (and, for the
//! unreliable channel, whether) it completes, and later applies that
//! completion exactly once.

mod reliable;
mod unreliable;

use std::time::Duration;

use courier_core::{ChannelKind, MessageId};
pub use reliable::ReliableChannel;
pub use unreliable::UnreliableChannel;

/// Outcome decided for a message when it is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The message reaches the receiver.
    Deliver,
    /// The message is lost in transit.
    Drop,
}

/// A deferred terminal transition for one message.
///
/// Produced on submission and handed back to the owning simulator once
/// `delay` has elapsed. Completions are never cancelled; one that outlives
/// its record (after a global clear) is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledCompletion {
    /// Message the completion applies to
    pub id: MessageId,
    /// Channel that owns the message
    pub channel: ChannelKind,
    /// Time from submission until the completion fires
    pub delay: Duration,
    /// Delivery outcome drawn at submission
    pub outcome: DeliveryOutcome,
}
