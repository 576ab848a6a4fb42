use super::Presenter;
use crate::simulation::Road;
use anyhow::Result;
use log::info;

/// Headless presenter: a status line through the logger every `interval` ticks.
pub struct StatusLogger {
    interval: u64,
}

impl StatusLogger {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Presenter for StatusLogger {
    fn present(&mut self, road: &Road, tick: u64) -> Result<()> {
        if tick % self.interval == 0 {
            info!(
                "Time step {}: {} vehicles on road, {} created, {} exited",
                tick,
                road.active_count(),
                road.total_generated(),
                road.total_exited()
            );
        }
        Ok(())
    }
}
