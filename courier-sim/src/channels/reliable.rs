//! Reliable (TCP-like) channel simulator.

use courier_core::config::ReliableChannelConfig;
use courier_core::{ChannelKind, ChannelStats, MessageStatus, MessageStore};

use super::{DeliveryOutcome, ScheduledCompletion};
use crate::rng::DeterministicRng;

/// Delivery-guaranteed, ordered channel.
///
/// Every admitted message gets the next sequence number and is always
/// delivered and acknowledged after a random delay. Reported latency is
/// drawn independently of that delay to model a varying round trip.
#[derive(Debug)]
pub struct ReliableChannel {
    config: ReliableChannelConfig,
    stats: ChannelStats,
    last_sequence: u64,
}

impl ReliableChannel {
    /// Creates channel with zeroed stats and sequence numbering from 1.
    pub fn new(config: ReliableChannelConfig) -> Self {
        let stats = ChannelStats::with_initial_rate(config.initial_delivery_rate);
        Self {
            config,
            stats,
            last_sequence: 0,
        }
    }

    /// Appends a pending message and schedules its delivery.
    pub fn admit(
        &mut self,
        store: &mut MessageStore,
        rng: &mut DeterministicRng,
        content: &str,
    ) -> ScheduledCompletion {
        self.last_sequence += 1;
        let message = store.submit(content, ChannelKind::Reliable, Some(self.last_sequence));
        let delay = rng.random_delay(&self.config.delay_ms);

        tracing::debug!(
            "Reliable message {} admitted: seq={}, delay={:?}",
            message.id,
            self.last_sequence,
            delay
        );

        ScheduledCompletion {
            id: message.id,
            channel: ChannelKind::Reliable,
            delay,
            outcome: DeliveryOutcome::Deliver,
        }
    }

    /// Delivers and acknowledges the message, then updates stats.
    ///
    /// Returns `None` without touching stats if the message no longer
    /// exists or has already completed.
    pub fn complete(
        &mut self,
        store: &mut MessageStore,
        rng: &mut DeterministicRng,
        completion: &ScheduledCompletion,
    ) -> Option<MessageStatus> {
        if let Err(e) = store.mark_delivered(completion.id, true) {
            tracing::warn!("Ignoring reliable completion: {e}");
            return None;
        }

        let latency_ms = rng.random_in(&self.config.latency_ms);
        self.stats.record_delivery(latency_ms);
        self.stats.pin_delivery_rate(100);

        tracing::debug!(
            "Reliable message {} delivered: latency={:.1}ms",
            completion.id,
            latency_ms
        );
        Some(MessageStatus::Delivered)
    }

    /// Current channel statistics.
    pub fn stats(&self) -> &ChannelStats {
        &self.stats
    }

    /// Sequence number the next admitted message will receive.
    pub fn next_sequence(&self) -> u64 {
        self.last_sequence + 1
    }

    /// Restores start-up stats and restarts sequence numbering at 1.
    pub fn reset(&mut self) {
        self.stats.reset(self.config.initial_delivery_rate);
        self.last_sequence = 0;
    }
}
