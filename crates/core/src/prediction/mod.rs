//! Remote move prediction
//!
//! The model behind the service is opaque; this module only knows its two
//! JSON response shapes and how to discard answers nobody is waiting for.

mod client;
mod gate;
mod types;

pub use client::PredictionClient;
pub use gate::{PredictionGate, Ticket};
pub use types::*;
