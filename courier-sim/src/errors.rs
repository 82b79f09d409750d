//! Error types for the delivery simulation.

use courier_core::CourierError;

/// Errors from the delivery engine and its actor handle.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine actor has stopped and no longer accepts commands.
    #[error("Delivery engine has shut down")]
    Shutdown,

    /// The engine could not be built from the supplied configuration.
    #[error("Invalid engine configuration: {0}")]
    Configuration(#[from] CourierError),
}
