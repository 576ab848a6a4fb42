use std::fmt;
use std::time::Duration;
use instant::Instant;

pub mod road;
pub mod generator;
pub mod traffic;
pub mod session;

pub use road::*;
pub use generator::*;
pub use traffic::*;
pub use session::*;

pub const MAX_VEHICLES: usize = 500;
pub const MAX_LANES: usize = 10;
pub const MAX_ROAD_LENGTH: usize = 1000;
pub const MAX_SPEED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Footprint class. Only the display cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleClass {
    Car,
    Truck,
    Motorcycle,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [VehicleClass::Car, VehicleClass::Truck, VehicleClass::Motorcycle];

    pub fn symbol(self) -> char {
        match self {
            VehicleClass::Car => 'C',
            VehicleClass::Truck => 'T',
            VehicleClass::Motorcycle => 'M',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleClass::Car => "Car",
            VehicleClass::Truck => "Truck",
            VehicleClass::Motorcycle => "Motorcycle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    Active,
    Exited,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: usize,
    pub speed: usize, // nominal cells per tick, fixed at creation
    pub lane: usize,
    pub class: VehicleClass,
    pub waiting_time: u32, // ticks spent without moving
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn is_active(&self) -> bool {
        self.status == VehicleStatus::Active
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TickTiming {
    pub tick_time: Duration,
    pub update_time: Duration,
}

/// Rolling window of tick timings for the status line.
#[derive(Debug)]
pub struct PerformanceTracker {
    samples: Vec<TickTiming>,
    max_samples: usize,
    current_tick_start: Option<Instant>,
    current_update_start: Option<Instant>,
    pending_update_time: Duration,
}

impl PerformanceTracker {
    pub fn new(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: Vec::with_capacity(max_samples),
            max_samples,
            current_tick_start: None,
            current_update_start: None,
            pending_update_time: Duration::ZERO,
        }
    }

    pub fn start_tick(&mut self) {
        self.current_tick_start = Some(Instant::now());
    }

    pub fn start_update(&mut self) {
        self.current_update_start = Some(Instant::now());
    }

    pub fn end_update(&mut self) {
        if let Some(start) = self.current_update_start.take() {
            self.pending_update_time = start.elapsed();
        }
    }

    pub fn end_tick(&mut self) {
        if let Some(start) = self.current_tick_start.take() {
            let timing = TickTiming {
                tick_time: start.elapsed(),
                update_time: std::mem::take(&mut self.pending_update_time),
            };

            if self.samples.len() >= self.max_samples {
                self.samples.remove(0);
            }
            self.samples.push(timing);
        }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn average_tick_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().map(|s| s.tick_time).sum();
        total / self.samples.len() as u32
    }

    pub fn average_update_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().map(|s| s.update_time).sum();
        total / self.samples.len() as u32
    }
}
