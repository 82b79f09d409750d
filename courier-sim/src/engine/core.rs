//! Synchronous delivery engine state machine.

use courier_core::{
    ChannelKind, ChannelStats, ChannelView, CourierConfig, MessageId, MessageStatus, MessageStore,
};

use crate::channels::{ReliableChannel, ScheduledCompletion, UnreliableChannel};
use crate::errors::EngineError;
use crate::rng::DeterministicRng;

/// Owns the message store, both channel simulators and the RNG.
///
/// The engine never waits: submission returns the completion to schedule and
/// the caller decides how time passes (the async actor sleeps on a timer,
/// the deterministic driver advances a virtual clock).
#[derive(Debug)]
pub struct DeliveryEngine {
    store: MessageStore,
    reliable: ReliableChannel,
    unreliable: UnreliableChannel,
    rng: DeterministicRng,
}

impl DeliveryEngine {
    /// Creates engine from configuration.
    ///
    /// Uses the configured seed, or draws one when none is set.
    ///
    /// # Errors
    /// - `EngineError::Configuration` - Configuration failed validation
    pub fn new(config: &CourierConfig) -> Result<Self, EngineError> {
        let rng = match config.simulation.seed {
            Some(seed) => DeterministicRng::from_seed(seed),
            None => DeterministicRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates engine driven by the given RNG.
    ///
    /// # Errors
    /// - `EngineError::Configuration` - Configuration failed validation
    pub fn with_rng(config: &CourierConfig, rng: DeterministicRng) -> Result<Self, EngineError> {
        config.validate()?;
        tracing::debug!("Delivery engine created with seed {}", rng.seed());

        Ok(Self {
            store: MessageStore::new(),
            reliable: ReliableChannel::new(config.reliable.clone()),
            unreliable: UnreliableChannel::new(config.unreliable.clone()),
            rng,
        })
    }

    /// Seed driving this engine's randomness.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Submits content to a channel.
    ///
    /// Blank content is ignored and yields `None`.
    pub fn submit(&mut self, channel: ChannelKind, content: &str) -> Option<ScheduledCompletion> {
        if content.trim().is_empty() {
            tracing::debug!("Ignoring blank {channel} submission");
            return None;
        }

        let completion = match channel {
            ChannelKind::Reliable => self.reliable.admit(&mut self.store, &mut self.rng, content),
            ChannelKind::Unreliable => {
                self.unreliable.admit(&mut self.store, &mut self.rng, content)
            }
        };
        Some(completion)
    }

    /// Submits content to the reliable channel.
    pub fn submit_reliable(&mut self, content: &str) -> Option<ScheduledCompletion> {
        self.submit(ChannelKind::Reliable, content)
    }

    /// Submits content to the unreliable channel.
    pub fn submit_unreliable(&mut self, content: &str) -> Option<ScheduledCompletion> {
        self.submit(ChannelKind::Unreliable, content)
    }

    /// Applies a scheduled completion through its owning channel.
    ///
    /// Returns the terminal status reached, or `None` when the completion
    /// was a no-op (record cleared or already terminal).
    pub fn complete(&mut self, completion: &ScheduledCompletion) -> Option<MessageStatus> {
        match completion.channel {
            ChannelKind::Reliable => {
                self.reliable
                    .complete(&mut self.store, &mut self.rng, completion)
            }
            ChannelKind::Unreliable => {
                self.unreliable
                    .complete(&mut self.store, &mut self.rng, completion)
            }
        }
    }

    /// Empties the store and resets both channels together.
    ///
    /// Completions already scheduled still fire but find no record.
    pub fn clear_all(&mut self) {
        let cleared = self.store.len();
        self.store.clear();
        self.reliable.reset();
        self.unreliable.reset();
        tracing::info!("Cleared {cleared} messages and reset channel stats");
    }

    /// Statistics for one channel.
    pub fn stats(&self, channel: ChannelKind) -> &ChannelStats {
        match channel {
            ChannelKind::Reliable => self.reliable.stats(),
            ChannelKind::Unreliable => self.unreliable.stats(),
        }
    }

    /// Snapshot of one channel's messages and stats.
    pub fn channel_view(&self, channel: ChannelKind) -> ChannelView {
        ChannelView {
            messages: self.store.list_by_channel(channel).cloned().collect(),
            stats: self.stats(channel).clone(),
            in_flight: self.store.in_flight(channel),
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Current status of a message, if it is still stored.
    pub fn status(&self, id: MessageId) -> Option<MessageStatus> {
        self.store.get(id).map(|message| message.status)
    }
}
