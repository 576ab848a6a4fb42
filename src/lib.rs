pub mod config;
pub mod simulation;
pub mod display;
pub mod signals;

pub use simulation::*;
pub use config::*;
