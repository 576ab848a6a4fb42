use super::{PerformanceTracker, Road, RoadError, TickReport, TrafficEngine, VehicleGenerator};
use crate::config::SimulationConfig;
use crate::display::Presenter;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cloneable stop flag, checked once per tick boundary.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub total_generated: u32,
    pub total_exited: u32,
    pub active: usize,
    pub average_flow: f64,
}

/// One road plus everything needed to drive it tick by tick.
pub struct SimulationSession {
    road: Road,
    generator: VehicleGenerator,
    engine: TrafficEngine,
    tick: u64,
    stop: StopHandle,
    performance: PerformanceTracker,
}

impl SimulationSession {
    pub fn new(config: &SimulationConfig) -> Result<Self, RoadError> {
        let road = Road::new(config.road.lanes, config.road.length)?;
        let seed = config.generator.fixed_seed();
        let generator = VehicleGenerator::configure(seed, config.generator.entry_probability);
        let engine = TrafficEngine::new(seed);

        Ok(Self::from_parts(road, generator, engine).with_timing_samples(config.run.timing_samples))
    }

    pub fn from_parts(road: Road, generator: VehicleGenerator, engine: TrafficEngine) -> Self {
        Self {
            road,
            generator,
            engine,
            tick: 0,
            stop: StopHandle::new(),
            performance: PerformanceTracker::new(60),
        }
    }

    pub fn with_timing_samples(mut self, samples: usize) -> Self {
        self.performance = PerformanceTracker::new(samples);
        self
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn performance(&self) -> &PerformanceTracker {
        &self.performance
    }

    /// Generate, then update. One full tick.
    pub fn step(&mut self) -> TickReport {
        self.performance.start_tick();

        let probability = self.generator.entry_probability();
        self.generator.generate(&mut self.road, probability);

        self.performance.start_update();
        let report = self.engine.update(&mut self.road);
        self.performance.end_update();

        self.tick += 1;
        self.performance.end_tick();

        report
    }

    /// Tick until stopped or `max_ticks` is reached, handing the road to
    /// `presenter` after every tick and sleeping `delay` in between.
    pub fn run(
        &mut self,
        presenter: &mut dyn Presenter,
        delay: Duration,
        max_ticks: Option<u64>,
    ) -> Result<SimulationSummary> {
        log::info!(
            "Road configuration: {} lanes, {} units long",
            self.road.lanes(),
            self.road.length()
        );

        while !self.stop.is_stopped() {
            if max_ticks.is_some_and(|limit| self.tick >= limit) {
                break;
            }

            let report = self.step();
            log::trace!("Tick {}: {:?}", self.tick, report);

            presenter.present(&self.road, self.tick)?;

            if self.tick % 100 == 0 {
                log::debug!(
                    "Tick {}: {} vehicles, avg tick {:.3}ms (update {:.3}ms)",
                    self.tick,
                    self.road.active_count(),
                    self.performance.average_tick_time().as_secs_f64() * 1000.0,
                    self.performance.average_update_time().as_secs_f64() * 1000.0,
                );
            }

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        if self.stop.is_stopped() {
            log::info!("Shutting down traffic simulator...");
        }

        Ok(self.summary())
    }

    pub fn summary(&self) -> SimulationSummary {
        let average_flow = if self.tick == 0 {
            0.0
        } else {
            self.road.total_exited() as f64 / self.tick as f64
        };

        SimulationSummary {
            ticks: self.tick,
            total_generated: self.road.total_generated(),
            total_exited: self.road.total_exited(),
            active: self.road.active_count(),
            average_flow,
        }
    }
}
