//! Per-channel delivery statistics.

use serde::Serialize;

use crate::message::Message;

/// Initial delivery rate reported by the reliable channel.
pub const RELIABLE_INITIAL_DELIVERY_RATE: u32 = 100;

/// Initial delivery rate reported by the unreliable channel.
pub const UNRELIABLE_INITIAL_DELIVERY_RATE: u32 = 85;

/// Running counters for one delivery channel.
///
/// Updated only when a message reaches a terminal status, never on
/// submission. `messages_sent` therefore counts completed attempts and
/// always equals `messages_delivered + messages_lost`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelStats {
    pub messages_sent: u64,
    pub messages_delivered: u64,
    pub messages_lost: u64,
    /// Most recent measured latency in milliseconds
    pub average_latency_ms: f64,
    /// Delivered share of completed attempts as a rounded percentage
    pub delivery_rate: u32,
}

impl ChannelStats {
    /// Creates zeroed stats reporting the given initial delivery rate.
    pub fn with_initial_rate(delivery_rate: u32) -> Self {
        Self {
            messages_sent: 0,
            messages_delivered: 0,
            messages_lost: 0,
            average_latency_ms: 0.0,
            delivery_rate,
        }
    }

    /// Start-up stats for the reliable channel.
    pub fn reliable_default() -> Self {
        Self::with_initial_rate(RELIABLE_INITIAL_DELIVERY_RATE)
    }

    /// Start-up stats for the unreliable channel.
    pub fn unreliable_default() -> Self {
        Self::with_initial_rate(UNRELIABLE_INITIAL_DELIVERY_RATE)
    }

    /// Records a delivered message with its measured latency.
    ///
    /// The delivery rate is recomputed from the post-increment counts.
    pub fn record_delivery(&mut self, latency_ms: f64) {
        self.messages_sent += 1;
        self.messages_delivered += 1;
        self.average_latency_ms = latency_ms;
        self.delivery_rate = self.computed_delivery_rate();
    }

    /// Records a lost message. Latency is left untouched.
    pub fn record_loss(&mut self) {
        self.messages_sent += 1;
        self.messages_lost += 1;
        self.delivery_rate = self.computed_delivery_rate();
    }

    /// Pins the delivery rate regardless of the counters.
    ///
    /// The reliable channel reports 100% on every completion.
    pub fn pin_delivery_rate(&mut self, delivery_rate: u32) {
        self.delivery_rate = delivery_rate;
    }

    /// Resets all counters and restores the initial delivery rate.
    pub fn reset(&mut self, initial_rate: u32) {
        *self = Self::with_initial_rate(initial_rate);
    }

    /// Delivered share of sent messages, rounded to the nearest percent.
    ///
    /// Returns the current rate unchanged when nothing has been sent.
    pub fn computed_delivery_rate(&self) -> u32 {
        if self.messages_sent == 0 {
            return self.delivery_rate;
        }
        (self.messages_delivered as f64 / self.messages_sent as f64 * 100.0).round() as u32
    }
}

/// Snapshot of one channel: its messages in submission order plus stats.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelView {
    pub messages: Vec<Message>,
    pub stats: ChannelStats,
    /// Messages still waiting for their completion
    pub in_flight: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_defaults() {
        let reliable = ChannelStats::reliable_default();
        assert_eq!(reliable.messages_sent, 0);
        assert_eq!(reliable.delivery_rate, 100);

        let unreliable = ChannelStats::unreliable_default();
        assert_eq!(unreliable.messages_sent, 0);
        assert_eq!(unreliable.average_latency_ms, 0.0);
        assert_eq!(unreliable.delivery_rate, 85);
    }

    #[test]
    fn test_empty_stats_keep_initial_rate() {
        let stats = ChannelStats::unreliable_default();
        assert_eq!(stats.computed_delivery_rate(), 85);
    }

    #[test]
    fn test_loss_depresses_rate_without_counting_as_delivered() {
        let mut stats = ChannelStats::unreliable_default();
        stats.record_delivery(12.0);
        stats.record_delivery(20.0);
        stats.record_loss();

        assert_eq!(stats.messages_sent, 3);
        assert_eq!(stats.messages_delivered, 2);
        assert_eq!(stats.messages_lost, 1);
        // round(2 / 3 * 100)
        assert_eq!(stats.delivery_rate, 67);
        assert_eq!(stats.average_latency_ms, 20.0);
    }

    #[test]
    fn test_first_attempt_lost_reports_zero() {
        let mut stats = ChannelStats::unreliable_default();
        stats.record_loss();
        assert_eq!(stats.delivery_rate, 0);
    }

    #[test]
    fn test_reset_restores_initial_rate() {
        let mut stats = ChannelStats::reliable_default();
        stats.record_delivery(30.0);
        stats.pin_delivery_rate(100);
        stats.reset(100);

        assert_eq!(stats, ChannelStats::reliable_default());
    }
}
