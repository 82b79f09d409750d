//! Courier Core - Message model, store, and statistics
//!
//! This crate provides the in-memory building blocks shared by the delivery
//! simulators and the API server: message records, the ordered message
//! store, per-channel statistics, configuration and tracing setup.

pub mod config;
pub mod message;
pub mod stats;
pub mod store;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::CourierConfig;
pub use message::{ChannelKind, Message, MessageId, MessageStatus};
pub use stats::{ChannelStats, ChannelView};
pub use store::{MessageStore, StoreError};

/// Core errors that can bubble up from any Courier subsystem.
#[derive(Debug, thiserror::Error)]
pub enum CourierError {
    /// Invalid configuration value.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// What was wrong
        reason: String,
    },

    /// Filesystem or socket failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
