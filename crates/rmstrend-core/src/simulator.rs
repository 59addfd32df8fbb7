//! The RMS signal simulator.
//!
//! A steerable random walk advanced on wall-clock ticks. Simulated time runs
//! `speed` times faster than real time, and the per-tick noise and drift are
//! scaled by the same factor so a faster clock also means faster wear.
//!
//! ```text
//! tick(now) → advance(now) → SamplePoint ─┬→ RecentWindow (bounded, FIFO)
//!                                         └→ FullHistory  (unbounded)
//! ```
//!
//! Time bookkeeping is a single start reference: simulated elapsed is
//! `(now - start_reference) * speed`. Pausing, elapsed edits and speed
//! changes all move that reference instead of keeping separate offsets.

use std::time::Duration;

use chrono::NaiveDateTime;
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::clock::{
    delta_secs, format_hms, format_label, hms_secs, parse_hms, try_secs_to_delta,
};
use crate::config::SimulatorConfig;
use crate::sample::{FullHistory, RecentWindow, SamplePoint};

/// Operator speed presets.
pub const SPEED_STEPS: [u32; 8] = [1, 2, 4, 6, 8, 10, 20, 30];

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Direction of the drift bias added each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
    Declining,
    #[default]
    Stable,
    Inclining,
}

impl Trend {
    pub fn sign(self) -> f64 {
        match self {
            Self::Declining => -1.0,
            Self::Stable => 0.0,
            Self::Inclining => 1.0,
        }
    }

    /// Parse an operator string. Accepts the button names as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decline" | "declining" | "down" | "-1" => Some(Self::Declining),
            "stable" | "stabilize" | "flat" | "0" => Some(Self::Stable),
            "incline" | "inclining" | "up" | "+1" | "1" => Some(Self::Inclining),
            _ => None,
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declining => write!(f, "declining"),
            Self::Stable => write!(f, "stable"),
            Self::Inclining => write!(f, "inclining"),
        }
    }
}

/// Next faster preset, saturating at the top.
pub fn next_speed(current: u32) -> u32 {
    SPEED_STEPS
        .iter()
        .copied()
        .find(|&s| s > current)
        .unwrap_or(SPEED_STEPS[SPEED_STEPS.len() - 1])
}

/// Next slower preset, saturating at the bottom.
pub fn prev_speed(current: u32) -> u32 {
    SPEED_STEPS
        .iter()
        .rev()
        .copied()
        .find(|&s| s < current)
        .unwrap_or(SPEED_STEPS[0])
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Stateful RMS trend simulator.
///
/// Operator setters never fail: malformed input is ignored and the previous
/// state is kept.
pub struct Simulator<R = ThreadRng> {
    config: SimulatorConfig,
    rng: R,
    current_value: f64,
    trend: Trend,
    speed: u32,
    running: bool,
    /// Wall-clock instant that corresponds to simulated elapsed zero.
    start_reference: Option<NaiveDateTime>,
    /// When elapsed time was frozen (paused, or edited before the first start).
    frozen_at: Option<NaiveDateTime>,
    /// Last simulated seconds emitted; guards against a wall clock stepping back.
    last_simulated_secs: f64,
    window: RecentWindow,
    history: FullHistory,
}

impl Simulator<ThreadRng> {
    /// Create a simulator drawing noise from the thread-local RNG.
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_rng(config, rand::rng())
    }
}

impl Default for Simulator<ThreadRng> {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl<R: Rng> Simulator<R> {
    /// Create a simulator with an explicit noise source.
    pub fn with_rng(config: SimulatorConfig, rng: R) -> Self {
        Self {
            current_value: config.base_value,
            speed: config.speed.max(1),
            window: RecentWindow::new(config.window_capacity),
            history: FullHistory::new(),
            trend: Trend::Stable,
            running: false,
            start_reference: None,
            frozen_at: None,
            last_simulated_secs: 0.0,
            config,
            rng,
        }
    }

    // --- Run state ---

    /// Start the simulation clock.
    ///
    /// No-op while running. If a start reference already exists (paused, or
    /// elapsed edited before the first start) this resumes from it.
    pub fn start(&mut self, now: NaiveDateTime) {
        if self.running {
            return;
        }
        if self.start_reference.is_some() {
            self.resume(now);
            return;
        }
        self.start_reference = Some(now);
        self.frozen_at = None;
        self.last_simulated_secs = 0.0;
        self.running = true;
        log::info!("simulation started at {}", format_label(now));
    }

    pub fn pause(&mut self, now: NaiveDateTime) {
        if !self.running {
            return;
        }
        self.running = false;
        self.frozen_at = Some(now);
        log::info!("simulation paused at elapsed {}", self.elapsed_string(now));
    }

    /// Resume after a pause, moving the start reference forward by the
    /// paused duration so elapsed time does not jump.
    pub fn resume(&mut self, now: NaiveDateTime) {
        if self.running {
            return;
        }
        let Some(reference) = self.start_reference else {
            log::debug!("resume ignored: simulation never started");
            return;
        };
        if let Some(since) = self.frozen_at.take() {
            let paused = (now - since).max(chrono::TimeDelta::zero());
            self.start_reference = Some(reference + paused);
        }
        self.running = true;
        log::info!("simulation resumed at elapsed {}", self.elapsed_string(now));
    }

    pub fn toggle_pause(&mut self, now: NaiveDateTime) {
        if self.running {
            self.pause(now);
        } else {
            self.resume(now);
        }
    }

    // --- Operator controls ---

    pub fn set_trend(&mut self, trend: Trend) {
        self.trend = trend;
    }

    /// Change the speed multiplier. Zero is ignored.
    ///
    /// Elapsed time is continuous across the change; only its rate differs
    /// from here on.
    pub fn set_speed(&mut self, speed: u32, now: NaiveDateTime) {
        if speed == 0 {
            log::debug!("ignoring zero speed multiplier");
            return;
        }
        if speed == self.speed {
            return;
        }
        if self.start_reference.is_some() {
            let elapsed = self.elapsed_secs(now);
            let Some(reference) = self.rebased_reference(elapsed, speed, now) else {
                log::debug!("ignoring speed {speed}x: elapsed time out of range");
                return;
            };
            self.start_reference = Some(reference);
        }
        self.speed = speed;
    }

    /// Override the current value verbatim. Non-finite values are ignored.
    ///
    /// No floor is applied here; the next automatic step clamps.
    pub fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            log::debug!("ignoring non-finite RMS override {value}");
            return;
        }
        self.current_value = value;
    }

    /// Parse and apply an operator-typed value. Unparseable text is ignored.
    pub fn set_value_str(&mut self, text: &str) {
        match text.trim().parse::<f64>() {
            Ok(v) => self.set_value(v),
            Err(_) => log::debug!("ignoring unparseable RMS override {text:?}"),
        }
    }

    /// Make simulated elapsed read `h:m:s` at `now`. History is untouched.
    pub fn edit_elapsed(&mut self, h: u64, m: u64, s: u64, now: NaiveDateTime) {
        let target = hms_secs(h, m, s);
        let Some(reference) = self.rebased_reference(target, self.speed, now) else {
            log::debug!("ignoring elapsed edit {h}:{m}:{s}: out of range");
            return;
        };
        self.start_reference = Some(reference);
        self.last_simulated_secs = target;
        if !self.running && self.frozen_at.is_none() {
            // Never started: hold the edited value until start.
            self.frozen_at = Some(now);
        }
    }

    /// Parse an `HH:MM:SS` string and apply it. Malformed input is ignored.
    pub fn edit_elapsed_str(&mut self, text: &str, now: NaiveDateTime) {
        match parse_hms(text) {
            Some((h, m, s)) => self.edit_elapsed(h, m, s, now),
            None => log::debug!("ignoring malformed elapsed time {text:?}"),
        }
    }

    pub fn reset_elapsed(&mut self, now: NaiveDateTime) {
        self.edit_elapsed(0, 0, 0, now);
    }

    // --- Tick ---

    /// Advance the model to `now` and record the new sample.
    ///
    /// Returns `None` and records nothing unless running.
    pub fn advance(&mut self, now: NaiveDateTime) -> Option<SamplePoint> {
        if !self.running {
            return None;
        }
        let reference = self.start_reference?;

        let simulated_secs = self.elapsed_secs(now).max(self.last_simulated_secs);
        self.last_simulated_secs = simulated_secs;
        let speed = f64::from(self.speed);

        let amp = self.config.noise_amplitude;
        let noise = if amp > 0.0 {
            self.rng.random_range(-amp..=amp) * speed
        } else {
            0.0
        };
        let drift = self.trend.sign() * self.config.drift_step * speed;
        self.current_value = (self.current_value + noise + drift).max(self.config.floor);

        let sample = SamplePoint {
            simulated_minutes: simulated_secs / 60.0,
            value: self.current_value,
            wall_clock_label: label_at(reference, simulated_secs)
                .or_else(|| self.history.latest().map(|s| s.wall_clock_label.clone()))
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        };
        self.history.push(sample.clone());
        self.window.push(sample.clone());
        Some(sample)
    }

    // --- Accessors ---

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a start reference exists (started, or elapsed edited).
    pub fn has_started(&self) -> bool {
        self.start_reference.is_some()
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulated elapsed time at `now`; frozen while paused.
    pub fn elapsed(&self, now: NaiveDateTime) -> Duration {
        Duration::try_from_secs_f64(self.elapsed_secs(now)).unwrap_or(Duration::MAX)
    }

    /// Simulated elapsed time as `HH:MM:SS`.
    pub fn elapsed_string(&self, now: NaiveDateTime) -> String {
        format_hms(self.elapsed(now))
    }

    /// Simulated wall-clock label at `now`, if a reference exists.
    pub fn simulated_clock(&self, now: NaiveDateTime) -> Option<String> {
        let reference = self.start_reference?;
        Some(label_at(reference, self.elapsed_secs(now)).unwrap_or_else(|| UNKNOWN_LABEL.to_string()))
    }

    pub fn recent(&self) -> &RecentWindow {
        &self.window
    }

    pub fn history(&self) -> &FullHistory {
        &self.history
    }

    // --- Internals ---

    /// The instant elapsed time is measured at: `now` while running, the
    /// freeze instant otherwise.
    fn effective_now(&self, now: NaiveDateTime) -> NaiveDateTime {
        if self.running {
            now
        } else {
            self.frozen_at.unwrap_or(now)
        }
    }

    fn elapsed_secs(&self, now: NaiveDateTime) -> f64 {
        let Some(reference) = self.start_reference else {
            return 0.0;
        };
        let real = delta_secs(self.effective_now(now) - reference).max(0.0);
        real * f64::from(self.speed)
    }

    /// Start reference that makes elapsed read `simulated_secs` at `now` when
    /// running at `speed`. `None` if it falls outside the calendar range.
    fn rebased_reference(&self, simulated_secs: f64, speed: u32, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let real = try_secs_to_delta(simulated_secs / f64::from(speed))?;
        self.effective_now(now).checked_sub_signed(real)
    }
}

/// Label shown when the simulated clock has run past the calendar range.
const UNKNOWN_LABEL: &str = "--:--:--";

fn label_at(reference: NaiveDateTime, simulated_secs: f64) -> Option<String> {
    let offset = try_secs_to_delta(simulated_secs)?;
    reference.checked_add_signed(offset).map(format_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::secs_to_delta;
    use chrono::{NaiveDate, TimeDelta};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn after(secs: f64) -> NaiveDateTime {
        t0() + secs_to_delta(secs)
    }

    fn sim() -> Simulator<StdRng> {
        Simulator::with_rng(SimulatorConfig::default(), StdRng::seed_from_u64(7))
    }

    fn quiet_sim() -> Simulator<StdRng> {
        let config = SimulatorConfig {
            noise_amplitude: 0.0,
            ..SimulatorConfig::default()
        };
        Simulator::with_rng(config, StdRng::seed_from_u64(7))
    }

    // -----------------------------------------------------------------------
    // Trend / speed presets
    // -----------------------------------------------------------------------

    #[test]
    fn test_trend_signs() {
        assert_eq!(Trend::Declining.sign(), -1.0);
        assert_eq!(Trend::Stable.sign(), 0.0);
        assert_eq!(Trend::Inclining.sign(), 1.0);
        assert_eq!(Trend::default(), Trend::Stable);
    }

    #[test]
    fn test_trend_parse() {
        assert_eq!(Trend::parse("incline"), Some(Trend::Inclining));
        assert_eq!(Trend::parse("Declining"), Some(Trend::Declining));
        assert_eq!(Trend::parse(" stabilize "), Some(Trend::Stable));
        assert_eq!(Trend::parse("sideways"), None);
    }

    #[test]
    fn test_speed_presets_step_and_saturate() {
        assert_eq!(next_speed(1), 2);
        assert_eq!(next_speed(10), 20);
        assert_eq!(next_speed(30), 30);
        assert_eq!(next_speed(5), 6);
        assert_eq!(prev_speed(20), 10);
        assert_eq!(prev_speed(1), 1);
        assert_eq!(prev_speed(7), 6);
    }

    // -----------------------------------------------------------------------
    // Initial state and start
    // -----------------------------------------------------------------------

    #[test]
    fn test_initial_state() {
        let s = sim();
        assert_eq!(s.current_value(), 1.0);
        assert_eq!(s.trend(), Trend::Stable);
        assert_eq!(s.speed(), 1);
        assert!(!s.is_running());
        assert!(!s.has_started());
        assert_eq!(s.elapsed_string(t0()), "00:00:00");
    }

    #[test]
    fn test_advance_before_start_is_noop() {
        let mut s = sim();
        assert!(s.advance(after(1.0)).is_none());
        assert!(s.history().is_empty());
        assert!(s.recent().is_empty());
    }

    #[test]
    fn test_start_twice_keeps_reference() {
        let mut s = sim();
        s.start(t0());
        s.start(after(100.0));
        assert_eq!(s.elapsed_string(after(100.0)), "00:01:40");
    }

    #[test]
    fn test_one_second_scenario() {
        let mut s = sim();
        s.start(t0());
        let p = s.advance(after(1.0)).unwrap();
        assert!((p.simulated_minutes - 1.0 / 60.0).abs() < 1e-9);
        assert!(p.value >= 1.0 - 0.0002 && p.value <= 1.0 + 0.0002);
        assert_eq!(p.wall_clock_label, "10:00:01");
    }

    // -----------------------------------------------------------------------
    // Advance
    // -----------------------------------------------------------------------

    #[test]
    fn test_value_never_below_floor() {
        let config = SimulatorConfig {
            base_value: 0.001,
            noise_amplitude: 0.01,
            ..SimulatorConfig::default()
        };
        let mut s = Simulator::with_rng(config, StdRng::seed_from_u64(42));
        s.set_trend(Trend::Declining);
        s.set_speed(30, t0());
        s.start(t0());
        for i in 1..5000 {
            let p = s.advance(after(i as f64 * 0.001)).unwrap();
            assert!(p.value >= 0.0);
            assert!(s.current_value() >= 0.0);
        }
    }

    #[test]
    fn test_drift_scaled_by_speed() {
        let mut s = quiet_sim();
        s.set_trend(Trend::Inclining);
        s.set_speed(10, t0());
        s.start(t0());
        for i in 1..=100 {
            s.advance(after(i as f64));
        }
        // 100 ticks * 0.00001 * 10
        assert!((s.current_value() - 1.01).abs() < 1e-9);
    }

    #[test]
    fn test_declining_drift() {
        let mut s = quiet_sim();
        s.set_trend(Trend::Declining);
        s.start(t0());
        for i in 1..=10 {
            s.advance(after(i as f64));
        }
        assert!((s.current_value() - (1.0 - 0.0001)).abs() < 1e-12);
    }

    #[test]
    fn test_noise_bounded_per_tick() {
        let mut s = sim();
        s.set_speed(4, t0());
        s.start(t0());
        let mut prev = s.current_value();
        for i in 1..2000 {
            let v = s.advance(after(i as f64 * 0.01)).unwrap().value;
            assert!((v - prev).abs() <= 0.0002 * 4.0 + 1e-12);
            prev = v;
        }
    }

    #[test]
    fn test_history_counts_every_running_advance() {
        let mut s = sim();
        s.start(t0());
        for i in 1..=10 {
            s.advance(after(i as f64));
        }
        s.pause(after(10.0));
        for i in 11..=15 {
            assert!(s.advance(after(i as f64)).is_none());
        }
        s.resume(after(15.0));
        for i in 16..=20 {
            s.advance(after(i as f64));
        }
        assert_eq!(s.history().len(), 15);
        assert_eq!(s.recent().len(), 15);
    }

    #[test]
    fn test_window_capped_but_history_grows() {
        let config = SimulatorConfig {
            window_capacity: 50,
            ..SimulatorConfig::default()
        };
        let mut s = Simulator::with_rng(config, StdRng::seed_from_u64(1));
        s.start(t0());
        for i in 1..=200 {
            s.advance(after(i as f64));
        }
        assert_eq!(s.recent().len(), 50);
        assert_eq!(s.history().len(), 200);
        let first = s.recent().iter().next().unwrap();
        assert!((first.simulated_minutes - 151.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_clock_stepping_back_does_not_rewind_elapsed() {
        let mut s = sim();
        s.start(t0());
        let a = s.advance(after(10.0)).unwrap();
        let b = s.advance(after(5.0)).unwrap();
        assert!(b.simulated_minutes >= a.simulated_minutes);
    }

    // -----------------------------------------------------------------------
    // Pause / resume
    // -----------------------------------------------------------------------

    #[test]
    fn test_pause_excludes_paused_wall_time() {
        let mut s = sim();
        s.start(t0());
        s.advance(after(30.0));
        s.pause(after(30.0));
        assert_eq!(s.elapsed_string(after(500.0)), "00:00:30");
        s.resume(after(90.0));
        let p = s.advance(after(100.0)).unwrap();
        // 30s before pause + 10s after resume.
        assert!((p.simulated_minutes - 40.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_pause() {
        let mut s = sim();
        s.start(t0());
        s.toggle_pause(after(1.0));
        assert!(!s.is_running());
        s.toggle_pause(after(2.0));
        assert!(s.is_running());
        assert_eq!(s.elapsed_string(after(2.0)), "00:00:01");
    }

    #[test]
    fn test_resume_before_start_is_noop() {
        let mut s = sim();
        s.resume(t0());
        assert!(!s.is_running());
        assert!(s.advance(after(1.0)).is_none());
    }

    #[test]
    fn test_start_while_paused_resumes() {
        let mut s = sim();
        s.start(t0());
        s.pause(after(10.0));
        s.start(after(60.0));
        assert!(s.is_running());
        assert_eq!(s.elapsed_string(after(65.0)), "00:00:15");
    }

    // -----------------------------------------------------------------------
    // Speed
    // -----------------------------------------------------------------------

    #[test]
    fn test_speed_scales_simulated_time() {
        let mut s = sim();
        s.set_speed(8, t0());
        s.start(t0());
        let p = s.advance(after(60.0)).unwrap();
        assert!((p.simulated_minutes - 8.0).abs() < 1e-9);
        assert_eq!(p.wall_clock_label, "10:08:00");
    }

    #[test]
    fn test_speed_change_mid_run_is_continuous() {
        let mut s = sim();
        s.set_speed(10, t0());
        s.start(t0());
        s.advance(after(60.0));
        assert_eq!(s.elapsed_string(after(60.0)), "00:10:00");
        s.set_speed(1, after(60.0));
        assert_eq!(s.elapsed_string(after(60.0)), "00:10:00");
        let p = s.advance(after(120.0)).unwrap();
        assert!((p.simulated_minutes - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_speed_ignored() {
        let mut s = sim();
        s.set_speed(6, t0());
        s.set_speed(0, t0());
        assert_eq!(s.speed(), 6);
    }

    #[test]
    fn test_speed_change_while_paused_keeps_frozen_elapsed() {
        let mut s = sim();
        s.start(t0());
        s.pause(after(120.0));
        s.set_speed(20, after(200.0));
        assert_eq!(s.elapsed_string(after(300.0)), "00:02:00");
        s.resume(after(300.0));
        assert_eq!(s.elapsed_string(after(303.0)), "00:03:00");
    }

    // -----------------------------------------------------------------------
    // Manual value
    // -----------------------------------------------------------------------

    #[test]
    fn test_set_negative_value_is_verbatim() {
        let mut s = quiet_sim();
        s.set_value(-5.0);
        assert_eq!(s.current_value(), -5.0);
        s.start(t0());
        let p = s.advance(after(1.0)).unwrap();
        assert_eq!(p.value, 0.0);
    }

    #[test]
    fn test_set_value_rejects_non_finite() {
        let mut s = sim();
        s.set_value(2.5);
        s.set_value(f64::NAN);
        s.set_value(f64::INFINITY);
        assert_eq!(s.current_value(), 2.5);
    }

    #[test]
    fn test_set_value_str() {
        let mut s = sim();
        s.set_value_str(" 3.25 ");
        assert_eq!(s.current_value(), 3.25);
        s.set_value_str("abc");
        s.set_value_str("");
        assert_eq!(s.current_value(), 3.25);
    }

    // -----------------------------------------------------------------------
    // Elapsed edits
    // -----------------------------------------------------------------------

    #[test]
    fn test_edit_elapsed_reads_back_immediately() {
        let mut s = sim();
        s.start(t0());
        s.edit_elapsed(1, 30, 0, after(5.0));
        assert_eq!(s.elapsed_string(after(5.0)), "01:30:00");
    }

    #[test]
    fn test_edit_elapsed_respects_speed() {
        let mut s = sim();
        s.set_speed(3, t0());
        s.start(t0());
        s.edit_elapsed(1, 30, 0, after(5.0));
        assert_eq!(s.elapsed_string(after(5.0)), "01:30:00");
        assert_eq!(s.elapsed_string(after(15.0)), "01:30:30");
    }

    #[test]
    fn test_edit_elapsed_keeps_value_and_history() {
        let mut s = sim();
        s.start(t0());
        s.advance(after(1.0));
        s.advance(after(2.0));
        let value = s.current_value();
        s.edit_elapsed(2, 0, 0, after(3.0));
        assert_eq!(s.current_value(), value);
        assert_eq!(s.history().len(), 2);
        let p = s.advance(after(3.0)).unwrap();
        assert!((p.simulated_minutes - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_edit_elapsed_str_malformed_ignored() {
        let mut s = sim();
        s.start(t0());
        for bad in ["", "1:2", "-1:00:00", "1.5:0:0", "x:y:z"] {
            s.edit_elapsed_str(bad, after(10.0));
            assert_eq!(s.elapsed_string(after(10.0)), "00:00:10");
        }
        s.edit_elapsed_str("00:05:00", after(10.0));
        assert_eq!(s.elapsed_string(after(10.0)), "00:05:00");
    }

    #[test]
    fn test_edit_elapsed_out_of_calendar_range_ignored() {
        let mut s = sim();
        s.start(t0());
        s.edit_elapsed_str("3000000000:00:00", after(10.0));
        assert_eq!(s.elapsed_string(after(10.0)), "00:00:10");
        s.edit_elapsed(u64::MAX, 0, 0, after(10.0));
        assert_eq!(s.elapsed_string(after(10.0)), "00:00:10");
        assert_eq!(s.simulated_clock(after(10.0)).unwrap(), "10:00:10");
        assert!(s.advance(after(11.0)).is_some());
    }

    #[test]
    fn test_speed_change_keeps_state_when_rebase_out_of_range() {
        let mut s = sim();
        s.set_speed(30, t0());
        s.start(t0());
        // 2.4e9 hours is representable at 30x but not at 1x.
        s.edit_elapsed(2_400_000_000, 0, 0, after(1.0));
        let before = s.elapsed_string(after(1.0));
        assert_eq!(before, "2400000000:00:00");
        s.set_speed(1, after(1.0));
        assert_eq!(s.speed(), 30);
        assert_eq!(s.elapsed_string(after(1.0)), before);

        // Past the calendar range the label falls back instead of panicking.
        let sample = s.advance(after(2.0)).unwrap();
        assert_eq!(sample.wall_clock_label, "--:--:--");
        assert_eq!(s.simulated_clock(after(2.0)).unwrap(), "--:--:--");
    }

    #[test]
    fn test_edit_elapsed_before_start_is_held() {
        let mut s = sim();
        s.edit_elapsed(0, 10, 0, t0());
        assert!(!s.is_running());
        assert_eq!(s.elapsed_string(after(50.0)), "00:10:00");
        s.start(after(50.0));
        assert!(s.is_running());
        assert_eq!(s.elapsed_string(after(60.0)), "00:10:10");
    }

    #[test]
    fn test_edit_elapsed_while_paused() {
        let mut s = sim();
        s.start(t0());
        s.pause(after(10.0));
        s.edit_elapsed(0, 1, 0, after(20.0));
        assert_eq!(s.elapsed_string(after(40.0)), "00:01:00");
        s.resume(after(40.0));
        assert_eq!(s.elapsed_string(after(45.0)), "00:01:05");
    }

    #[test]
    fn test_reset_elapsed() {
        let mut s = sim();
        s.start(t0());
        s.advance(after(42.0));
        s.reset_elapsed(after(42.0));
        assert_eq!(s.elapsed_string(after(42.0)), "00:00:00");
        assert_eq!(s.history().len(), 1);
        let p = s.advance(after(43.0)).unwrap();
        assert!((p.simulated_minutes - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_simulated_clock_label() {
        let mut s = sim();
        assert_eq!(s.simulated_clock(t0()), None);
        s.set_speed(2, t0());
        s.start(t0());
        assert_eq!(s.simulated_clock(after(30.0)).as_deref(), Some("10:01:00"));
    }

    #[test]
    fn test_elapsed_duration_accessor() {
        let mut s = sim();
        s.start(t0());
        let d = s.elapsed(t0() + TimeDelta::seconds(90));
        assert_eq!(d, Duration::from_secs(90));
    }
}
