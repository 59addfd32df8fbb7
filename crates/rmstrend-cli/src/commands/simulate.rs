//! Headless simulation over a synthetic clock.
//!
//! The simulator is driven exactly as the TUI would drive it, one tick per
//! `tick_ms` of wall-clock time, except that the clock is computed instead
//! of waited for.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rmstrend_core::{
    Simulator, Trend, Zone, ZoneThresholds, export_to_dir, transitions, wall_clock_now,
    zone_counts,
};

use super::Overrides;

/// Refuse runs that would record more samples than this.
const MAX_TICKS: u64 = 5_000_000;

pub struct SimulateCommandConfig<'a> {
    pub config_path: Option<&'a Path>,
    pub duration: &'a str,
    pub overrides: Overrides,
    pub trend: &'a str,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Number of ticks needed to cover `duration` of simulated time.
pub fn tick_count(duration: Duration, speed: u32, tick: Duration) -> u64 {
    let wall_us = wall_span_micros(duration, speed);
    let tick_us = micros(tick).max(1);
    wall_us.div_ceil(tick_us)
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

fn wall_span_micros(duration: Duration, speed: u32) -> u64 {
    micros(duration) / u64::from(speed.max(1))
}

/// Start the simulator at `start` and tick it until `duration` of simulated
/// time has passed. Returns the wall-clock instant the run ends at.
pub fn simulate_run<R: Rng>(
    sim: &mut Simulator<R>,
    start: NaiveDateTime,
    duration: Duration,
    tick: Duration,
) -> NaiveDateTime {
    let wall_us = wall_span_micros(duration, sim.speed());
    let tick_us = micros(tick).max(1);
    let ticks = wall_us.div_ceil(tick_us);

    sim.start(start);
    let mut now = start;
    for i in 1..=ticks {
        let offset = i.saturating_mul(tick_us).min(wall_us);
        now = start + TimeDelta::microseconds(i64::try_from(offset).unwrap_or(i64::MAX));
        sim.advance(now);
    }
    sim.pause(now);
    now
}

pub fn run(cmd: SimulateCommandConfig<'_>) {
    super::init_logging(None);

    let Some(duration) = super::parse_duration(cmd.duration) else {
        eprintln!("Error: invalid duration '{}'", cmd.duration);
        std::process::exit(1);
    };
    let Some(trend) = Trend::parse(cmd.trend) else {
        eprintln!("Error: unknown trend '{}'", cmd.trend);
        std::process::exit(1);
    };

    let mut config = super::load_config(cmd.config_path);
    cmd.overrides.apply(&mut config);
    let output = cmd.output.unwrap_or_else(|| config.export.logs_dir.clone());
    let tick = Duration::from_millis(config.simulator.tick_ms);

    let ticks = tick_count(duration, config.simulator.speed, tick);
    if ticks > MAX_TICKS {
        eprintln!(
            "Error: {} would record {ticks} samples (limit {MAX_TICKS}); raise --tick-ms or --speed",
            cmd.duration
        );
        std::process::exit(1);
    }

    let rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut sim = Simulator::with_rng(config.simulator.clone(), rng);
    sim.set_trend(trend);

    let start = wall_clock_now();
    let end = simulate_run(&mut sim, start, duration, tick);
    log::info!("simulated {} over {ticks} ticks", sim.elapsed_string(end));

    print_summary(&sim, end, &config.zones);

    match export_to_dir(&output, sim.history().as_slice(), end) {
        Ok(path) => println!("\nTXT exported to: {}", path.display()),
        Err(e) => {
            eprintln!("Failed to export TXT: {e}");
            std::process::exit(1);
        }
    }
}

fn print_summary<R: Rng>(sim: &Simulator<R>, end: NaiveDateTime, zones: &ZoneThresholds) {
    let samples = sim.history().as_slice();

    println!("RMS trend simulation");
    println!("  Trend:       {}", sim.trend());
    println!("  Speed:       {}x", sim.speed());
    println!("  Elapsed:     {}", sim.elapsed_string(end));
    println!("  Samples:     {}", samples.len());
    println!("  Final RMS:   {:.4} mm/s", sim.current_value());
    if let Some(peak) = sim.history().peak() {
        println!("  Peak RMS:    {peak:.4} mm/s");
    }

    println!("\n  {:<16} {:>10}", "Zone", "Samples");
    println!("  {}", "-".repeat(27));
    let counts = zone_counts(samples, zones);
    for (zone, count) in Zone::ALL.iter().zip(counts) {
        println!("  {:<16} {count:>10}", zone.label());
    }

    let marks = transitions(samples, zones);
    println!("\n  Zone transitions ({}):", marks.len());
    for mark in &marks {
        let alarm = if mark.zone.is_alarm() { "  ALARM" } else { "" };
        println!(
            "  #{:<8} {}  {:>8.4} mm/s  {}{alarm}",
            mark.index + 1,
            mark.wall_clock_label,
            mark.value,
            mark.zone.label()
        );
    }
}
