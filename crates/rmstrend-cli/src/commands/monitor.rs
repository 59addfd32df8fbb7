use std::path::{Path, PathBuf};
use std::time::Duration;

use rmstrend_core::{Simulator, Trend, wall_clock_now};

use super::Overrides;

pub struct MonitorCommandConfig<'a> {
    pub config_path: Option<&'a Path>,
    pub overrides: Overrides,
    pub trend: Option<&'a str>,
    pub logs_dir: Option<PathBuf>,
    pub autostart: bool,
}

pub fn run(cmd: MonitorCommandConfig<'_>) {
    let mut config = super::load_config(cmd.config_path);
    cmd.overrides.apply(&mut config);
    let logs_dir = cmd.logs_dir.unwrap_or(config.export.logs_dir);

    super::init_logging(Some(&logs_dir));
    log::info!(
        "monitor starting: speed {}x, tick {} ms, logs in {}",
        config.simulator.speed,
        config.simulator.tick_ms,
        logs_dir.display()
    );

    let tick = Duration::from_millis(config.simulator.tick_ms);
    let mut sim = Simulator::new(config.simulator);
    if let Some(trend) = cmd.trend.and_then(Trend::parse) {
        sim.set_trend(trend);
    }
    if cmd.autostart {
        sim.start(wall_clock_now());
    }

    let mut app = crate::tui::app::App::new(sim, config.zones, logs_dir, tick);
    if let Err(e) = app.run() {
        log::error!("TUI error: {e}");
        eprintln!("Error: TUI failed: {e}");
        std::process::exit(1);
    }
}
