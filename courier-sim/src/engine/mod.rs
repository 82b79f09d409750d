//! Delivery engine: synchronous core plus an actor for async callers.

mod actor;
mod commands;
mod core;
mod handle;

pub use actor::{spawn_delivery_engine, spawn_engine_actor};
pub use commands::DeliveryEngineCommand;
pub use self::core::DeliveryEngine;
pub use handle::DeliveryEngineHandle;
