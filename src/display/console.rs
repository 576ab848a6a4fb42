use super::Presenter;
use crate::simulation::Road;
use anyhow::Result;
use std::fmt::Write as _;
use std::io::{self, Write};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const DETAIL_ROWS: usize = 5;

/// Text dump of the road, one row per lane.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsoleRenderer<W> {
    fn present(&mut self, road: &Road, tick: u64) -> Result<()> {
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(render_road(road, tick).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Everything the console shows for one tick, minus the screen clear.
pub fn render_road(road: &Road, tick: u64) -> String {
    let mut text = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        text,
        "Time step: {} | Vehicles: {} | Total created: {} | Total exited: {}\n",
        tick,
        road.active_count(),
        road.total_generated(),
        road.total_exited()
    );
    let _ = writeln!(text, "Legend: [C]=Car  [T]=Truck  [M]=Motorcycle  [ ]=Empty\n");

    let border = "=".repeat(road.length() + 2);
    let _ = writeln!(text, "{}", border);

    for lane in 0..road.lanes() {
        text.push('|');
        for position in 0..road.length() {
            let cell = road
                .occupant(lane, position)
                .map(|vehicle| vehicle.class.symbol())
                .unwrap_or(' ');
            text.push(cell);
        }
        text.push_str("|\n");
    }

    let _ = writeln!(text, "{}", border);

    let _ = writeln!(text, "\nVehicle details (showing up to {}):", DETAIL_ROWS);
    for vehicle in road.vehicles().iter().take(DETAIL_ROWS) {
        let _ = writeln!(
            text,
            "ID: {:3} | Type: {:<10} | Lane: {} | Pos: {:3} | Speed: {}",
            vehicle.id,
            vehicle.class.name(),
            vehicle.lane,
            vehicle.position,
            vehicle.speed
        );
    }

    if road.active_count() > DETAIL_ROWS {
        let _ = writeln!(text, "... and {} more vehicles", road.active_count() - DETAIL_ROWS);
    }

    text
}
