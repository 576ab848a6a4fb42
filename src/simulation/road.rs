use super::{Vehicle, VehicleClass, VehicleId, VehicleStatus, MAX_LANES, MAX_ROAD_LENGTH, MAX_SPEED, MAX_VEHICLES};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoadError {
    #[error("number of lanes must be between 1 and {max}, got {0}", max = MAX_LANES)]
    InvalidLanes(usize),

    #[error("road length must be between 1 and {max}, got {0}", max = MAX_ROAD_LENGTH)]
    InvalidLength(usize),
}

/// Result of looking up a single cell of the occupancy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Free,
    Occupied,
    OutOfRange,
}

impl Occupancy {
    pub fn is_occupied(self) -> bool {
        self == Occupancy::Occupied
    }
}

/// Dense lane x position grid holding the slot index of the occupying vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    cells: Vec<Option<usize>>,
    lanes: usize,
    length: usize,
}

impl OccupancyGrid {
    pub fn new(lanes: usize, length: usize) -> Self {
        Self {
            cells: vec![None; lanes * length],
            lanes,
            length,
        }
    }

    fn index(&self, lane: usize, position: usize) -> Option<usize> {
        if lane < self.lanes && position < self.length {
            Some(lane * self.length + position)
        } else {
            None
        }
    }

    pub fn get(&self, lane: usize, position: usize) -> Option<usize> {
        self.index(lane, position).and_then(|i| self.cells[i])
    }

    pub fn set(&mut self, lane: usize, position: usize, slot: usize) {
        if let Some(i) = self.index(lane, position) {
            self.cells[i] = Some(slot);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn occupancy(&self, lane: isize, position: isize) -> Occupancy {
        if lane < 0 || position < 0 {
            return Occupancy::OutOfRange;
        }
        match self.index(lane as usize, position as usize) {
            None => Occupancy::OutOfRange,
            Some(i) if self.cells[i].is_some() => Occupancy::Occupied,
            Some(_) => Occupancy::Free,
        }
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Check road dimensions against the supported bounds.
pub fn check_dimensions(lanes: usize, length: usize) -> Result<(), RoadError> {
    if lanes == 0 || lanes > MAX_LANES {
        return Err(RoadError::InvalidLanes(lanes));
    }
    if length == 0 || length > MAX_ROAD_LENGTH {
        return Err(RoadError::InvalidLength(length));
    }
    Ok(())
}

/// Fixed-size multi-lane road: the active vehicles plus the per-tick occupancy grid.
#[derive(Debug, Clone)]
pub struct Road {
    lanes: usize,
    length: usize,
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) grid: OccupancyGrid,
    pub(crate) total_generated: u32,
    pub(crate) total_exited: u32,
}

impl Road {
    pub fn new(lanes: usize, length: usize) -> Result<Self, RoadError> {
        check_dimensions(lanes, length)?;

        Ok(Self {
            lanes,
            length,
            vehicles: Vec::with_capacity(MAX_VEHICLES),
            grid: OccupancyGrid::new(lanes, length),
            total_generated: 0,
            total_exited: 0,
        })
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn active_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn total_generated(&self) -> u32 {
        self.total_generated
    }

    pub fn total_exited(&self) -> u32 {
        self.total_exited
    }

    pub fn is_full(&self) -> bool {
        self.vehicles.len() >= MAX_VEHICLES
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Tri-state lookup against the current occupancy grid. Signed inputs so
    /// callers can probe one step off either edge without wrapping.
    pub fn is_occupied(&self, lane: isize, position: isize) -> Occupancy {
        self.grid.occupancy(lane, position)
    }

    /// Vehicle recorded in the grid at the given cell, if any.
    pub fn occupant(&self, lane: usize, position: usize) -> Option<&Vehicle> {
        self.grid.get(lane, position).and_then(|slot| self.vehicles.get(slot))
    }

    pub fn get_vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Append a vehicle at an arbitrary cell. Returns `None` at capacity or
    /// when the cell or speed falls outside the road's bounds. The cell is not
    /// checked against existing occupants and the grid is left untouched
    /// until the next update rebuilds it.
    pub fn add_vehicle(
        &mut self,
        lane: usize,
        position: usize,
        speed: usize,
        class: VehicleClass,
    ) -> Option<VehicleId> {
        if self.is_full() || lane >= self.lanes || position >= self.length {
            return None;
        }
        if speed == 0 || speed > MAX_SPEED {
            return None;
        }

        let id = VehicleId(self.total_generated + 1);
        self.vehicles.push(Vehicle {
            id,
            position,
            speed,
            lane,
            class,
            waiting_time: 0,
            status: VehicleStatus::Active,
        });
        self.total_generated += 1;

        Some(id)
    }

    /// Drop exited vehicles, keeping the survivors in order, and point the
    /// grid at their new slots.
    pub(crate) fn compact(&mut self) {
        self.vehicles.retain(|v| v.status == VehicleStatus::Active);

        self.grid.clear();
        for (slot, vehicle) in self.vehicles.iter().enumerate() {
            self.grid.set(vehicle.lane, vehicle.position, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert_eq!(Road::new(0, 10).unwrap_err(), RoadError::InvalidLanes(0));
        assert_eq!(Road::new(MAX_LANES + 1, 10).unwrap_err(), RoadError::InvalidLanes(MAX_LANES + 1));
        assert_eq!(Road::new(3, 0).unwrap_err(), RoadError::InvalidLength(0));
        assert_eq!(
            Road::new(3, MAX_ROAD_LENGTH + 1).unwrap_err(),
            RoadError::InvalidLength(MAX_ROAD_LENGTH + 1)
        );
        assert!(Road::new(MAX_LANES, MAX_ROAD_LENGTH).is_ok());
    }

    #[test]
    fn occupancy_query_distinguishes_out_of_range() {
        let mut road = Road::new(2, 5).unwrap();
        road.grid.set(1, 3, 0);

        assert_eq!(road.is_occupied(1, 3), Occupancy::Occupied);
        assert_eq!(road.is_occupied(0, 3), Occupancy::Free);
        assert_eq!(road.is_occupied(-1, 0), Occupancy::OutOfRange);
        assert_eq!(road.is_occupied(2, 0), Occupancy::OutOfRange);
        assert_eq!(road.is_occupied(0, -1), Occupancy::OutOfRange);
        assert_eq!(road.is_occupied(0, 5), Occupancy::OutOfRange);
    }

    #[test]
    fn add_vehicle_assigns_sequential_ids() {
        let mut road = Road::new(2, 10).unwrap();
        let a = road.add_vehicle(0, 0, 2, VehicleClass::Car).unwrap();
        let b = road.add_vehicle(1, 4, 3, VehicleClass::Truck).unwrap();

        assert_eq!(a, VehicleId(1));
        assert_eq!(b, VehicleId(2));
        assert_eq!(road.total_generated(), 2);
        assert_eq!(road.active_count(), 2);
    }

    #[test]
    fn add_vehicle_rejects_bad_placement() {
        let mut road = Road::new(2, 10).unwrap();
        assert!(road.add_vehicle(2, 0, 1, VehicleClass::Car).is_none());
        assert!(road.add_vehicle(0, 10, 1, VehicleClass::Car).is_none());
        assert!(road.add_vehicle(0, 0, 0, VehicleClass::Car).is_none());
        assert!(road.add_vehicle(0, 0, MAX_SPEED + 1, VehicleClass::Car).is_none());
        assert_eq!(road.total_generated(), 0);
    }

    #[test]
    fn compaction_keeps_order_and_remaps_grid() {
        let mut road = Road::new(1, 20).unwrap();
        road.add_vehicle(0, 2, 1, VehicleClass::Car);
        road.add_vehicle(0, 5, 1, VehicleClass::Truck);
        road.add_vehicle(0, 9, 1, VehicleClass::Motorcycle);
        road.vehicles[0].status = VehicleStatus::Exited;

        road.compact();

        let ids: Vec<_> = road.vehicles().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![VehicleId(2), VehicleId(3)]);
        assert_eq!(road.grid().get(0, 5), Some(0));
        assert_eq!(road.grid().get(0, 9), Some(1));
        assert_eq!(road.occupant(0, 9).map(|v| v.class), Some(VehicleClass::Motorcycle));
        assert_eq!(road.grid().occupied_cells(), 2);
    }
}
