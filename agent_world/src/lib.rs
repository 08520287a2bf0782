//! # Agent World
//!
//! The vocabulary shared between the simulation and the narrator: what happened
//! during a tick, which controls the agent held, and what the grid around the
//! agent looked like. This crate carries no narration logic.

pub mod controller;
pub mod entities;
pub mod error;
pub mod events;
pub mod snapshot;

pub use controller::*;
pub use entities::*;
pub use error::WorldError;
pub use events::*;
pub use snapshot::*;
