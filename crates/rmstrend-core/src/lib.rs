//! # rmstrend-core
//!
//! **A steerable vibration RMS trend, on fast-forward.**
//!
//! `rmstrend-core` simulates the RMS trend a condition-monitoring sensor would
//! report, lets an operator push it up, down or hold it flat, and keeps both
//! a bounded live window and the full session history for review and export.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::{NaiveDate, TimeDelta};
//! use rmstrend_core::{Simulator, SimulatorConfig, Trend, ZoneThresholds};
//!
//! let t0 = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let mut sim = Simulator::new(SimulatorConfig::default());
//! sim.set_trend(Trend::Inclining);
//! sim.set_speed(10, t0);
//! sim.start(t0);
//!
//! let sample = sim.advance(t0 + TimeDelta::seconds(6)).unwrap();
//! assert!((sample.simulated_minutes - 1.0).abs() < 1e-9);
//!
//! let zone = ZoneThresholds::default().classify(sample.value);
//! println!("{} {:.4} mm/s {zone}", sample.wall_clock_label, sample.value);
//! ```
//!
//! ## Architecture
//!
//! Tick → [`Simulator::advance`] → [`SamplePoint`] → window / history →
//! render or [`export`].
//!
//! The simulator never reads the clock: the caller passes `now` into every
//! time-dependent call, which keeps the model deterministic under test. The
//! zone classifier and the exporter only read recorded samples.

pub mod clock;
pub mod config;
pub mod export;
pub mod sample;
pub mod simulator;
pub mod zones;

pub use clock::{format_hms, parse_hms, wall_clock_now};
pub use config::{Config, ExportConfig, SimulatorConfig};
pub use export::{export_to_dir, log_file_name, render_log, write_log};
pub use sample::{DEFAULT_WINDOW_CAPACITY, FullHistory, RecentWindow, SamplePoint};
pub use simulator::{SPEED_STEPS, Simulator, Trend, next_speed, prev_speed};
pub use zones::{Zone, ZoneThresholds, ZoneTransition, transitions, zone_counts};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
