//! Basic simulation example.
//!
//! Runs ten simulated minutes of an inclining trend at 10x speed on a
//! synthetic clock, then prints the zone transitions and the first log lines.
//!
//! Run: `cargo run --example basic`

use chrono::TimeDelta;
use rmstrend_core::{
    Simulator, SimulatorConfig, Trend, ZoneThresholds, render_log, transitions, wall_clock_now,
};

fn main() {
    let t0 = wall_clock_now();
    let mut sim = Simulator::new(SimulatorConfig::default());
    sim.set_trend(Trend::Inclining);
    sim.set_speed(10, t0);
    sim.start(t0);

    // 60 wall seconds at 100 ms ticks.
    for i in 1..=600 {
        sim.advance(t0 + TimeDelta::milliseconds(i * 100));
    }

    let end = t0 + TimeDelta::seconds(60);
    println!("Elapsed (simulated): {}", sim.elapsed_string(end));
    println!("Current RMS:         {:.4} mm/s", sim.current_value());
    println!("Samples recorded:    {}", sim.history().len());

    println!("\nZone transitions:");
    for mark in transitions(sim.history().as_slice(), &ZoneThresholds::default()) {
        println!(
            "  #{:<5} {}  {:.4} mm/s  {}",
            mark.index + 1,
            mark.wall_clock_label,
            mark.value,
            mark.zone
        );
    }

    println!("\nLog preview:");
    for line in render_log(sim.history().as_slice()).lines().take(5) {
        println!("  {line}");
    }
}
