//! Courier Web - JSON API Server

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! Thin HTTP surface over the delivery engine. All simulation logic lives in
//! `courier-sim`; handlers only translate requests into engine commands.

pub mod errors;
pub mod handlers;
pub mod server;

pub use errors::WebError;
pub use server::{AppState, build_router, run_server};
