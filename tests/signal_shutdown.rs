#![cfg(all(unix, feature = "signals"))]

use lane_traffic::{signals::install_stop_signal, simulation::StopHandle};
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

fn send_signal(name: &str, pid: u32) {
    let status = Command::new("kill")
        .arg(format!("-{}", name))
        .arg(pid.to_string())
        .status()
        .expect("kill is available");
    assert!(status.success(), "kill -{} {} failed", name, pid);
}

fn wait_until_stopped(stop: &StopHandle) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if stop.is_stopped() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[test]
fn sigterm_sets_the_stop_flag() {
    let stop = StopHandle::new();
    install_stop_signal(stop.clone()).unwrap();

    send_signal("TERM", std::process::id());

    assert!(wait_until_stopped(&stop));
}

#[test]
fn sigint_sets_the_stop_flag() {
    let stop = StopHandle::new();
    install_stop_signal(stop.clone()).unwrap();

    send_signal("INT", std::process::id());

    assert!(wait_until_stopped(&stop));
}

#[test]
fn terminated_run_still_prints_the_summary() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lane-traffic"))
        .args(["-d", "log", "-t", "10", "-s", "5"])
        .env("RUST_LOG", "info")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary starts");

    // The start-up banner is logged after the handlers are installed.
    let stderr = child.stderr.take().expect("stderr is piped");
    let mut lines = BufReader::new(stderr).lines();
    let started = lines
        .by_ref()
        .map_while(Result::ok)
        .any(|line| line.contains("Traffic Simulator Started"));
    assert!(started, "simulator never reported start-up");

    std::thread::sleep(Duration::from_millis(200));
    send_signal("TERM", child.id());

    // Keep draining the log so the child never blocks on a full pipe.
    let drain = std::thread::spawn(move || lines.map_while(Result::ok).count());
    let output = child.wait_with_output().expect("child exits");
    drain.join().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "exit status {:?}", output.status);
    assert!(stdout.contains("Simulation Summary:"), "stdout: {}", stdout);
    assert!(stdout.contains("Average flow rate:"));
}
