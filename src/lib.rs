pub mod auth;
pub mod config;
pub mod ranch;
pub mod rng;
pub mod simulators;
pub mod state;
pub mod web;

pub use config::{ConfigLoader, RanchConfig};
pub use state::RanchState;
