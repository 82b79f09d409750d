//! Virtual-time driver for reproducible delivery runs.
//!
//! Replaces wall-clock timers with a simulated clock and a queue of pending
//! completions, so a seeded run produces identical results every time and
//! completes instantly.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use courier_core::{ChannelKind, ChannelStats, ChannelView, CourierConfig, MessageId};
use serde::Serialize;

use crate::channels::ScheduledCompletion;
use crate::engine::DeliveryEngine;
use crate::errors::EngineError;
use crate::rng::DeterministicRng;

/// Completion waiting for the virtual clock to reach `due`.
#[derive(Debug)]
struct QueuedCompletion {
    due: Duration,
    order: u64,
    completion: ScheduledCompletion,
}

impl PartialEq for QueuedCompletion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedCompletion {}

impl PartialOrd for QueuedCompletion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedCompletion {
    // Ties on due time fire in scheduling order
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// Summary of a deterministic run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Seed that reproduces this run
    pub seed: u64,
    /// Virtual time elapsed
    pub elapsed: Duration,
    /// Completions fired, including no-ops after a clear
    pub completions_fired: u64,
    /// Reliable channel stats at the end of the run
    pub reliable: ChannelStats,
    /// Unreliable channel stats at the end of the run
    pub unreliable: ChannelStats,
}

/// Delivery engine driven by a virtual clock.
///
/// Each submission queues its completion at `now + delay`. Completions fire
/// only when time is advanced, ordered by due time. A global clear leaves
/// queued completions in place; they fire later as no-ops.
#[derive(Debug)]
pub struct DeterministicSimulation {
    engine: DeliveryEngine,
    now: Duration,
    queue: BinaryHeap<Reverse<QueuedCompletion>>,
    next_order: u64,
    completions_fired: u64,
}

impl DeterministicSimulation {
    /// Creates simulation from configuration.
    ///
    /// # Errors
    /// - `EngineError::Configuration` - Configuration failed validation
    pub fn new(config: &CourierConfig) -> Result<Self, EngineError> {
        Ok(Self::from_engine(DeliveryEngine::new(config)?))
    }

    /// Creates simulation with default channel settings and a fixed seed.
    ///
    /// # Errors
    /// - `EngineError::Configuration` - Default configuration failed validation
    pub fn from_seed(seed: u64) -> Result<Self, EngineError> {
        let engine =
            DeliveryEngine::with_rng(&CourierConfig::default(), DeterministicRng::from_seed(seed))?;
        Ok(Self::from_engine(engine))
    }

    /// Wraps an existing engine, starting the clock at zero.
    pub fn from_engine(engine: DeliveryEngine) -> Self {
        Self {
            engine,
            now: Duration::ZERO,
            queue: BinaryHeap::new(),
            next_order: 0,
            completions_fired: 0,
        }
    }

    /// Submits content to the reliable channel.
    pub fn submit_reliable(&mut self, content: &str) -> Option<MessageId> {
        self.submit(ChannelKind::Reliable, content)
    }

    /// Submits content to the unreliable channel.
    pub fn submit_unreliable(&mut self, content: &str) -> Option<MessageId> {
        self.submit(ChannelKind::Unreliable, content)
    }

    /// Submits content and queues its completion.
    ///
    /// Returns `None` for blank content.
    pub fn submit(&mut self, channel: ChannelKind, content: &str) -> Option<MessageId> {
        let completion = self.engine.submit(channel, content)?;
        let id = completion.id;

        self.queue.push(Reverse(QueuedCompletion {
            due: self.now + completion.delay,
            order: self.next_order,
            completion,
        }));
        self.next_order += 1;

        Some(id)
    }

    /// Empties the store and resets both channels.
    pub fn clear_all(&mut self) {
        self.engine.clear_all();
    }

    /// Advances the clock, firing every completion due by the new time.
    ///
    /// Returns the number of completions fired, including no-ops.
    pub fn advance(&mut self, duration: Duration) -> usize {
        let target = self.now + duration;
        let mut fired = 0;

        while self
            .queue
            .peek()
            .is_some_and(|Reverse(queued)| queued.due <= target)
        {
            let Some(Reverse(queued)) = self.queue.pop() else {
                break;
            };
            self.now = queued.due;
            self.engine.complete(&queued.completion);
            fired += 1;
        }

        self.now = target;
        self.completions_fired += fired as u64;
        fired
    }

    /// Fires every queued completion, advancing the clock to the last one.
    ///
    /// Returns the number of completions fired.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(Reverse(queued)) = self.queue.pop() {
            self.now = self.now.max(queued.due);
            self.engine.complete(&queued.completion);
            fired += 1;
        }
        self.completions_fired += fired as u64;
        fired
    }

    /// Number of completions still queued.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Current virtual time since the simulation started.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Snapshot of one channel's messages and stats.
    pub fn channel_view(&self, channel: ChannelKind) -> ChannelView {
        self.engine.channel_view(channel)
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &DeliveryEngine {
        &self.engine
    }

    /// Summarizes the run so far.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            seed: self.engine.seed(),
            elapsed: self.now,
            completions_fired: self.completions_fired,
            reliable: self.engine.stats(ChannelKind::Reliable).clone(),
            unreliable: self.engine.stats(ChannelKind::Unreliable).clone(),
        }
    }
}
