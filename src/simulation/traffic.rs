use super::{Occupancy, OccupancyGrid, Road, VehicleStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chance (percent) that a blocked vehicle looks for a neighbouring lane.
pub const LANE_CHANGE_PROBABILITY: u32 = 40;

/// Cells behind the vehicle that must be clear in the destination lane.
pub const BLIND_SPOT: usize = 2;

// Keeps the engine's stream apart from the generator's when both share a seed.
const ENGINE_SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// What happened during one call to [`TrafficEngine::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub moved: usize,
    pub stalled: usize,
    pub lane_changes: usize,
    pub exited: usize,
}

#[derive(Debug, Clone, Copy)]
struct Lookahead {
    free_cells: usize,
    blocked: bool,
}

impl Lookahead {
    fn realized_speed(&self, speed: usize) -> usize {
        if self.blocked {
            self.free_cells
        } else {
            speed
        }
    }
}

/// Walk forward from `position + 1` to `position + speed`, stopping at the
/// last cell of the road or the first occupied cell.
fn scan_ahead(grid: &OccupancyGrid, lane: usize, position: usize, speed: usize) -> Lookahead {
    let mut free_cells = 0;

    for offset in 1..=speed {
        let cell = grid.occupancy(lane as isize, (position + offset) as isize);
        match cell {
            Occupancy::OutOfRange => break,
            Occupancy::Occupied => {
                return Lookahead { free_cells, blocked: true };
            }
            Occupancy::Free => free_cells += 1,
        }
    }

    Lookahead { free_cells, blocked: false }
}

fn lane_change_is_safe(grid: &OccupancyGrid, lane: usize, position: usize, speed: usize) -> bool {
    let lane_i = lane as isize;
    let position_i = position as isize;

    if grid.occupancy(lane_i, position_i).is_occupied() {
        return false;
    }

    let blind_spot_clear = (1..=BLIND_SPOT as isize)
        .map(|back| grid.occupancy(lane_i, position_i - back))
        .all(|cell| !cell.is_occupied());
    if !blind_spot_clear {
        return false;
    }

    scan_ahead(grid, lane, position, speed).free_cells > 0
}

/// First safe neighbour, trying the lower lane before the upper one.
fn find_safe_lane(grid: &OccupancyGrid, lanes: usize, lane: usize, position: usize, speed: usize) -> Option<usize> {
    let candidates = [lane.checked_sub(1), Some(lane + 1).filter(|&l| l < lanes)];

    candidates
        .into_iter()
        .flatten()
        .find(|&candidate| lane_change_is_safe(grid, candidate, position, speed))
}

/// Advances every vehicle on a [`Road`] by one tick.
///
/// The grid is cleared up front and refilled as each vehicle settles, so a
/// vehicle only sees the ones resolved before it in sequence order. Changing
/// the order of `Road::vehicles` changes the outcome.
pub struct TrafficEngine {
    rng: StdRng,
    lane_change_probability: u32,
}

impl TrafficEngine {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) if seed != 0 => StdRng::seed_from_u64(seed ^ ENGINE_SEED_MIX),
            _ => StdRng::from_entropy(),
        };

        Self {
            rng,
            lane_change_probability: LANE_CHANGE_PROBABILITY,
        }
    }

    pub fn with_lane_change_probability(mut self, probability: u32) -> Self {
        self.lane_change_probability = probability.min(100);
        self
    }

    pub fn lane_change_probability(&self) -> u32 {
        self.lane_change_probability
    }

    pub fn update(&mut self, road: &mut Road) -> TickReport {
        let mut report = TickReport::default();
        let lanes = road.lanes();
        let length = road.length();

        road.grid.clear();

        for slot in 0..road.vehicles.len() {
            let (id, position, lane, speed) = {
                let vehicle = &road.vehicles[slot];
                if !vehicle.is_active() {
                    continue;
                }
                (vehicle.id, vehicle.position, vehicle.lane, vehicle.speed)
            };

            let ahead = scan_ahead(&road.grid, lane, position, speed);

            let mut target_lane = lane;
            if ahead.blocked && self.rng.gen_range(0..100) < self.lane_change_probability {
                if let Some(candidate) = find_safe_lane(&road.grid, lanes, lane, position, speed) {
                    log::trace!("Vehicle {} changes lane {} -> {} at {}", id, lane, candidate, position);
                    target_lane = candidate;
                    report.lane_changes += 1;
                }
            }

            let realized = scan_ahead(&road.grid, target_lane, position, speed).realized_speed(speed);
            let new_position = position + realized;

            let vehicle = &mut road.vehicles[slot];
            vehicle.lane = target_lane;
            if realized == 0 {
                vehicle.waiting_time += 1;
                report.stalled += 1;
            } else {
                report.moved += 1;
            }

            if new_position >= length {
                vehicle.status = VehicleStatus::Exited;
                road.total_exited += 1;
                report.exited += 1;
                log::debug!("Vehicle {} exited from lane {}", id, target_lane);
            } else {
                vehicle.position = new_position;
                road.grid.set(target_lane, new_position, slot);
            }
        }

        road.compact();

        report
    }
}
