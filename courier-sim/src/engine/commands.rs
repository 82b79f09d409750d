//! Command definitions for the delivery engine actor.

use courier_core::{ChannelKind, ChannelView, MessageId};
use tokio::sync::oneshot;

use crate::channels::ScheduledCompletion;

/// Commands that can be sent to the delivery engine actor.
///
/// Each request carries a response channel. The actor applies commands one
/// at a time, so the store and both stats objects are never mutated
/// concurrently.
pub enum DeliveryEngineCommand {
    /// Submit content to a channel; responds with the new id, or `None` for
    /// blank content.
    Submit {
        /// Target channel
        channel: ChannelKind,
        /// Message body, stored verbatim
        content: String,
        /// Receives the new message id
        responder: oneshot::Sender<Option<MessageId>>,
    },
    /// Empty the store and reset both channels.
    ClearAll {
        /// Signalled once the clear is applied
        responder: oneshot::Sender<()>,
    },
    /// Snapshot one channel's messages and stats.
    GetChannelView {
        /// Channel to snapshot
        channel: ChannelKind,
        /// Receives the snapshot
        responder: oneshot::Sender<ChannelView>,
    },
    /// Shutdown the engine actor gracefully.
    Shutdown {
        /// Signalled before the actor stops
        responder: oneshot::Sender<()>,
    },
    /// Internal notification that a scheduled delay has elapsed.
    Complete {
        /// Transition to apply
        completion: ScheduledCompletion,
    },
}
