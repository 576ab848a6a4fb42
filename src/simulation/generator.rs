use super::{Road, VehicleClass, MAX_SPEED};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Admits new vehicles at the start of the road.
pub struct VehicleGenerator {
    rng: StdRng,
    entry_probability: u32,
}

impl VehicleGenerator {
    /// Seed the random source and clamp the entry probability to `[0, 100]`.
    /// A missing or zero seed draws from entropy.
    pub fn configure(seed: Option<u64>, entry_probability: i64) -> Self {
        let rng = match seed {
            Some(seed) if seed != 0 => StdRng::seed_from_u64(seed),
            _ => StdRng::from_entropy(),
        };

        let clamped = entry_probability.clamp(0, 100);
        if clamped != entry_probability {
            log::warn!("Entry probability {} clamped to {}%", entry_probability, clamped);
        }
        log::info!("Traffic generator initialized with probability: {}%", clamped);

        Self {
            rng,
            entry_probability: clamped as u32,
        }
    }

    pub fn entry_probability(&self) -> u32 {
        self.entry_probability
    }

    /// Roll once against `probability` (percent) and, on success, put a new
    /// vehicle at position 0 of a random lane. No-op at capacity.
    pub fn generate(&mut self, road: &mut Road, probability: u32) -> bool {
        if road.is_full() {
            return false;
        }

        let roll: u32 = self.rng.gen_range(0..100);
        if roll >= probability {
            return false;
        }

        let speed = self.rng.gen_range(1..=MAX_SPEED);
        let lane = self.rng.gen_range(0..road.lanes());
        let class = VehicleClass::ALL[self.rng.gen_range(0..VehicleClass::ALL.len())];

        match road.add_vehicle(lane, 0, speed, class) {
            Some(id) => {
                log::debug!("Spawned {} {} in lane {} with speed {}", class.name(), id, lane, speed);
                true
            }
            None => false,
        }
    }
}
