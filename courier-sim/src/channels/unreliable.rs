//! Unreliable (UDP-like) channel simulator.

use courier_core::config::UnreliableChannelConfig;
use courier_core::{ChannelKind, ChannelStats, MessageStatus, MessageStore};

use super::{DeliveryOutcome, ScheduledCompletion};
use crate::rng::DeterministicRng;

/// Best-effort channel with probabilistic loss.
///
/// Messages carry no sequence number or acknowledgment. Whether a message
/// arrives is drawn once on admission; its completion fires after a delay
/// from a shorter range than the reliable channel.
#[derive(Debug)]
pub struct UnreliableChannel {
    config: UnreliableChannelConfig,
    stats: ChannelStats,
}

impl UnreliableChannel {
    /// Creates channel reporting the configured initial delivery rate.
    pub fn new(config: UnreliableChannelConfig) -> Self {
        let stats = ChannelStats::with_initial_rate(config.initial_delivery_rate);
        Self { config, stats }
    }

    /// Appends a sent message and schedules its delivery or loss.
    pub fn admit(
        &mut self,
        store: &mut MessageStore,
        rng: &mut DeterministicRng,
        content: &str,
    ) -> ScheduledCompletion {
        let message = store.submit(content, ChannelKind::Unreliable, None);
        let outcome = if rng.random_bool(self.config.success_probability) {
            DeliveryOutcome::Deliver
        } else {
            DeliveryOutcome::Drop
        };
        let delay = rng.random_delay(&self.config.delay_ms);

        tracing::debug!(
            "Unreliable message {} admitted: outcome={:?}, delay={:?}",
            message.id,
            outcome,
            delay
        );

        ScheduledCompletion {
            id: message.id,
            channel: ChannelKind::Unreliable,
            delay,
            outcome,
        }
    }

    /// Applies the drawn outcome and updates stats.
    ///
    /// A delivery records a fresh latency sample; a loss only moves the
    /// counters. Returns `None` without touching stats if the message no
    /// longer exists or has already completed.
    pub fn complete(
        &mut self,
        store: &mut MessageStore,
        rng: &mut DeterministicRng,
        completion: &ScheduledCompletion,
    ) -> Option<MessageStatus> {
        match completion.outcome {
            DeliveryOutcome::Deliver => {
                if let Err(e) = store.mark_delivered(completion.id, false) {
                    tracing::warn!("Ignoring unreliable completion: {e}");
                    return None;
                }
                let latency_ms = rng.random_in(&self.config.latency_ms);
                self.stats.record_delivery(latency_ms);
                tracing::debug!(
                    "Unreliable message {} delivered: latency={:.1}ms, rate={}%",
                    completion.id,
                    latency_ms,
                    self.stats.delivery_rate
                );
                Some(MessageStatus::Delivered)
            }
            DeliveryOutcome::Drop => {
                if let Err(e) = store.mark_failed(completion.id) {
                    tracing::warn!("Ignoring unreliable completion: {e}");
                    return None;
                }
                self.stats.record_loss();
                tracing::debug!(
                    "Unreliable message {} lost: rate={}%",
                    completion.id,
                    self.stats.delivery_rate
                );
                Some(MessageStatus::Failed)
            }
        }
    }

    /// Current channel statistics.
    pub fn stats(&self) -> &ChannelStats {
        &self.stats
    }

    /// Restores start-up stats.
    pub fn reset(&mut self) {
        self.stats.reset(self.config.initial_delivery_rate);
    }
}
