//! TUI application state and event loop.
//!
//! Design: one loop, one clock. Every tick interval the loop advances the
//! simulator to the current wall-clock time; the screen is redrawn on the
//! same loop at most once per frame interval so a 1 ms tick does not mean
//! a thousand full redraws per second. The simulator is owned here and lent
//! to the renderer by reference.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use rmstrend_core::{
    Simulator, Trend, ZoneThresholds, ZoneTransition, export_to_dir, next_speed, prev_speed,
    transitions, wall_clock_now,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum spacing between redraws.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Simulated minutes visible on the live strip-chart.
pub const LIVE_SPAN_MINUTES: f64 = 0.5;

/// Upper bound on points handed to a chart widget per dataset.
pub const MAX_CHART_POINTS: usize = 2000;

// ---------------------------------------------------------------------------
// View / input state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Live,
    History,
}

/// What typed characters are collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditElapsed,
    EditValue,
}

impl InputMode {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::EditElapsed => "Enter time (HH:MM:SS): ",
            Self::EditValue => "Edit RMS (mm/s): ",
        }
    }
}

/// Frozen copy of the full history taken when the history view opens.
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    pub points: Vec<(f64, f64)>,
    pub transitions: Vec<ZoneTransition>,
    pub sample_count: usize,
    pub last_minute: f64,
    pub peak: Option<f64>,
}

impl HistorySnapshot {
    fn capture<R: rand::Rng>(sim: &Simulator<R>, zones: &ZoneThresholds) -> Self {
        let history = sim.history();
        Self {
            points: decimate(&history.points(), MAX_CHART_POINTS),
            transitions: transitions(history.as_slice(), zones),
            sample_count: history.len(),
            last_minute: history.latest().map_or(0.0, |s| s.simulated_minutes),
            peak: history.peak(),
        }
    }

    /// Transition markers split into (normal, alarm) scatter points.
    pub fn marker_points(&self) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        self.transitions
            .iter()
            .map(|t| (t.zone.is_alarm(), (t.simulated_minutes, t.value)))
            .fold((Vec::new(), Vec::new()), |(mut normal, mut alarm), (is_alarm, p)| {
                if is_alarm {
                    alarm.push(p);
                } else {
                    normal.push(p);
                }
                (normal, alarm)
            })
    }
}

// ---------------------------------------------------------------------------
// Utility functions
// ---------------------------------------------------------------------------

/// Reduce a series to at most `max_points`, keeping each bucket's min and max
/// so spikes survive.
pub fn decimate(points: &[(f64, f64)], max_points: usize) -> Vec<(f64, f64)> {
    if points.len() <= max_points || max_points < 2 {
        return points.to_vec();
    }
    let buckets = max_points / 2;
    let size = points.len().div_ceil(buckets);
    let mut out = Vec::with_capacity(buckets * 2);
    for chunk in points.chunks(size) {
        let mut lo = chunk[0];
        let mut hi = chunk[0];
        for &p in chunk {
            if p.1 < lo.1 {
                lo = p;
            }
            if p.1 > hi.1 {
                hi = p;
            }
        }
        if lo.0 <= hi.0 {
            out.push(lo);
            if hi != lo {
                out.push(hi);
            }
        } else {
            out.push(hi);
            out.push(lo);
        }
    }
    out
}

pub fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Inclining => "▲",
        Trend::Declining => "▼",
        Trend::Stable => "–",
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    sim: Simulator,
    zones: ZoneThresholds,
    logs_dir: PathBuf,
    tick: Duration,
    now: NaiveDateTime,
    running: bool,
    view: View,
    input_mode: InputMode,
    input: String,
    show_controls: bool,
    history: HistorySnapshot,
    /// Last export path or error, shown in the status line.
    status: Option<String>,
}

impl App {
    pub fn new(sim: Simulator, zones: ZoneThresholds, logs_dir: PathBuf, tick: Duration) -> Self {
        Self {
            sim,
            zones,
            logs_dir,
            tick: tick.max(Duration::from_millis(1)),
            now: wall_clock_now(),
            running: true,
            view: View::Live,
            input_mode: InputMode::Normal,
            input: String::new(),
            show_controls: true,
            history: HistorySnapshot::default(),
            status: None,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal before a panic message is printed.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        if let Some(status) = &self.status {
            println!("{status}");
        }

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut last_tick = Instant::now();
        let mut last_frame: Option<Instant> = None;

        while self.running {
            if last_frame.is_none_or(|t| t.elapsed() >= FRAME_INTERVAL) {
                terminal.draw(|f| super::ui::draw(f, self))?;
                last_frame = Some(Instant::now());
            }

            let timeout = self.tick.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, wall_clock_now());
                        // Reflect operator input without waiting a frame.
                        last_frame = None;
                    }
                }
            }

            if last_tick.elapsed() >= self.tick {
                self.on_tick(wall_clock_now());
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Advance the model to `now`.
    pub fn on_tick(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.sim.advance(now);
    }

    pub fn handle_key(&mut self, key: KeyCode, now: NaiveDateTime) {
        self.now = now;
        if self.input_mode != InputMode::Normal {
            self.handle_input_key(key, now);
            return;
        }
        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Esc => {
                if self.view == View::History {
                    self.view = View::Live;
                } else {
                    self.running = false;
                }
            }
            KeyCode::Char('s') => self.sim.start(now),
            KeyCode::Char('i') => self.sim.set_trend(Trend::Inclining),
            KeyCode::Char('d') => self.sim.set_trend(Trend::Declining),
            KeyCode::Char('z') => self.sim.set_trend(Trend::Stable),
            KeyCode::Char('p') | KeyCode::Char(' ') => self.sim.toggle_pause(now),
            KeyCode::Char('t') => self.sim.reset_elapsed(now),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
                let speed = next_speed(self.sim.speed());
                self.sim.set_speed(speed, now);
            }
            KeyCode::Char('-') | KeyCode::Char('[') => {
                let speed = prev_speed(self.sim.speed());
                self.sim.set_speed(speed, now);
            }
            KeyCode::Char('e') => self.begin_input(InputMode::EditElapsed),
            KeyCode::Char('v') => self.begin_input(InputMode::EditValue),
            KeyCode::Char('h') => self.toggle_history(),
            KeyCode::Char('r') if self.view == View::History => {
                self.history = HistorySnapshot::capture(&self.sim, &self.zones);
            }
            KeyCode::Char('x') => self.export_history(now),
            KeyCode::Char('c') => self.show_controls = !self.show_controls,
            _ => {}
        }
    }

    fn begin_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input.clear();
    }

    fn handle_input_key(&mut self, key: KeyCode, now: NaiveDateTime) {
        match key {
            KeyCode::Enter => {
                match self.input_mode {
                    InputMode::EditElapsed => self.sim.edit_elapsed_str(&self.input, now),
                    InputMode::EditValue => self.sim.set_value_str(&self.input),
                    InputMode::Normal => {}
                }
                self.input_mode = InputMode::Normal;
                self.input.clear();
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input.clear();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !c.is_control() && self.input.len() < 32 => self.input.push(c),
            _ => {}
        }
    }

    fn toggle_history(&mut self) {
        self.view = match self.view {
            View::Live => {
                self.history = HistorySnapshot::capture(&self.sim, &self.zones);
                View::History
            }
            View::History => View::Live,
        };
    }

    fn export_history(&mut self, now: NaiveDateTime) {
        let samples = self.sim.history().as_slice();
        match export_to_dir(&self.logs_dir, samples, now) {
            Ok(path) => {
                self.status = Some(format!(
                    "TXT exported to: {} ({} samples)",
                    path.display(),
                    samples.len()
                ));
            }
            Err(e) => {
                log::error!("export to {} failed: {e}", self.logs_dir.display());
                self.status = Some(format!("Failed to export TXT: {e}"));
            }
        }
    }

    // --- Accessors for the renderer ---

    pub fn sim(&self) -> &Simulator {
        &self.sim
    }
    pub fn zones(&self) -> &ZoneThresholds {
        &self.zones
    }
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }
    pub fn view(&self) -> View {
        self.view
    }
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn show_controls(&self) -> bool {
        self.show_controls
    }
    pub fn history(&self) -> &HistorySnapshot {
        &self.history
    }
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    pub fn is_running(&self) -> bool {
        self.running
    }
}
