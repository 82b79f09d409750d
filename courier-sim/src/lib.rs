//! Courier Simulation - Seeded reliable and unreliable delivery channels.

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! Models the observable difference between a guaranteed, ordered transport
//! and a best-effort one without touching a socket. Randomness comes from an
//! injectable seeded generator, so every run can be replayed.
//!
//! # Example
//!
//! ```rust
//! use courier_core::ChannelKind;
//! use courier_sim::DeterministicSimulation;
//!
//! # fn main() -> Result<(), courier_sim::EngineError> {
//! let mut sim = DeterministicSimulation::from_seed(12345)?;
//! sim.submit_reliable("ping");
//! sim.submit_unreliable("datagram");
//! sim.run_until_idle();
//!
//! let view = sim.channel_view(ChannelKind::Reliable);
//! assert_eq!(view.stats.delivery_rate, 100);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Channels**: `ReliableChannel` and `UnreliableChannel` admit messages
//!   and apply their single terminal transition
//! - **Engine**: `DeliveryEngine` owns the store, channels and RNG; the actor
//!   wraps it for async callers with real timers
//! - **Driver**: `DeterministicSimulation` runs the engine on a virtual clock

pub mod channels;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod rng;

pub use channels::{DeliveryOutcome, ReliableChannel, ScheduledCompletion, UnreliableChannel};
pub use driver::{DeterministicSimulation, SimulationReport};
pub use engine::{
    DeliveryEngine, DeliveryEngineCommand, DeliveryEngineHandle, spawn_delivery_engine,
    spawn_engine_actor,
};
pub use errors::EngineError;
pub use rng::DeterministicRng;
