use anyhow::Result;
use crate::config::{DisplayMode, RunConfig};
use crate::simulation::Road;

pub mod console;
pub mod status;

pub use console::*;
pub use status::*;

/// Read-only view of the road after each tick. Presenters never feed back
/// into the simulation.
pub trait Presenter {
    fn present(&mut self, road: &Road, tick: u64) -> Result<()>;
}

pub fn presenter_for(run: &RunConfig) -> Box<dyn Presenter> {
    match run.display {
        DisplayMode::Console => Box::new(ConsoleRenderer::stdout()),
        DisplayMode::Log => Box::new(StatusLogger::new(run.status_interval)),
    }
}
