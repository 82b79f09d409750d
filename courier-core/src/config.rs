//! Centralized configuration for Courier.
//!
//! All tunable simulation parameters live here so channel behavior is never
//! hard-coded in the simulators themselves.

use std::ops::Range;

use crate::CourierError;
use crate::stats::{RELIABLE_INITIAL_DELIVERY_RATE, UNRELIABLE_INITIAL_DELIVERY_RATE};

/// Central configuration for all Courier components.
#[derive(Debug, Clone, Default)]
pub struct CourierConfig {
    pub reliable: ReliableChannelConfig,
    pub unreliable: UnreliableChannelConfig,
    pub simulation: SimulationConfig,
    pub server: ServerConfig,
}

/// Reliable (TCP-like) channel parameters.
///
/// Every message is delivered; only the timing varies.
#[derive(Debug, Clone)]
pub struct ReliableChannelConfig {
    /// Completion delay range in milliseconds
    pub delay_ms: Range<f64>,
    /// Reported latency range in milliseconds
    pub latency_ms: Range<f64>,
    /// Delivery rate reported before any completion
    pub initial_delivery_rate: u32,
}

impl Default for ReliableChannelConfig {
    fn default() -> Self {
        Self {
            delay_ms: 50.0..150.0,
            latency_ms: 20.0..70.0,
            initial_delivery_rate: RELIABLE_INITIAL_DELIVERY_RATE,
        }
    }
}

/// Unreliable (UDP-like) channel parameters.
#[derive(Debug, Clone)]
pub struct UnreliableChannelConfig {
    /// Completion delay range in milliseconds
    pub delay_ms: Range<f64>,
    /// Reported latency range in milliseconds
    pub latency_ms: Range<f64>,
    /// Probability (0.0 to 1.0) that a message is delivered
    pub success_probability: f64,
    /// Delivery rate reported before any completion
    pub initial_delivery_rate: u32,
}

impl Default for UnreliableChannelConfig {
    fn default() -> Self {
        Self {
            delay_ms: 5.0..35.0,
            latency_ms: 5.0..35.0,
            success_probability: 0.85,
            initial_delivery_rate: UNRELIABLE_INITIAL_DELIVERY_RATE,
        }
    }
}

/// Randomness control.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    /// Seed for reproducible runs; a random seed is drawn when unset
    pub seed: Option<u64>,
}

/// HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl CourierConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(seed) = std::env::var("COURIER_SEED") {
            if let Ok(seed_value) = seed.parse::<u64>() {
                config.simulation.seed = Some(seed_value);
            }
        }

        if let Ok(probability) = std::env::var("COURIER_SUCCESS_PROBABILITY") {
            if let Ok(value) = probability.parse::<f64>() {
                config.unreliable.success_probability = value;
            }
        }

        if let Ok(host) = std::env::var("COURIER_HOST") {
            if !host.trim().is_empty() {
                config.server.host = host;
            }
        }

        if let Ok(port) = std::env::var("COURIER_PORT") {
            if let Ok(port_value) = port.parse::<u16>() {
                config.server.port = port_value;
            }
        }

        config
    }

    /// Creates a configuration with a fixed seed for reproducible tests.
    pub fn for_testing() -> Self {
        Self {
            simulation: SimulationConfig { seed: Some(42) },
            ..Default::default()
        }
    }

    /// Returns a copy using the given seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    /// Checks that every range is non-empty and the probability is valid.
    ///
    /// # Errors
    /// - `CourierError::Configuration` - A range is empty or inverted, or the
    ///   success probability lies outside 0.0 to 1.0
    pub fn validate(&self) -> Result<(), CourierError> {
        check_range("reliable.delay_ms", &self.reliable.delay_ms)?;
        check_range("reliable.latency_ms", &self.reliable.latency_ms)?;
        check_range("unreliable.delay_ms", &self.unreliable.delay_ms)?;
        check_range("unreliable.latency_ms", &self.unreliable.latency_ms)?;

        let probability = self.unreliable.success_probability;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(CourierError::Configuration {
                reason: format!("unreliable.success_probability {probability} outside 0.0..=1.0"),
            });
        }

        Ok(())
    }
}

fn check_range(name: &str, range: &Range<f64>) -> Result<(), CourierError> {
    // NaN fails every comparison, so finiteness is checked first
    if !range.start.is_finite()
        || !range.end.is_finite()
        || range.start < 0.0
        || range.start >= range.end
    {
        return Err(CourierError::Configuration {
            reason: format!("{name} must be a finite, non-empty, non-negative range"),
        });
    }
    Ok(())
}
