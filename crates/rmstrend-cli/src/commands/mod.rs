pub mod config;
pub mod monitor;
pub mod simulate;

use std::fs::OpenOptions;
use std::path::Path;
use std::time::Duration;

use rmstrend_core::Config;

/// File the TUI logs into while it owns the terminal.
pub const TUI_LOG_FILE: &str = "rmstrend.log";

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub speed: Option<u32>,
    pub value: Option<f64>,
    pub tick_ms: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(speed) = self.speed {
            config.simulator.speed = speed.max(1);
        }
        if let Some(value) = self.value.filter(|v| v.is_finite()) {
            config.simulator.base_value = value;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.simulator.tick_ms = tick_ms.max(1);
        }
    }
}

/// Install the global logger. Default filter is `warn`; `RUST_LOG` overrides.
///
/// With `log_dir` set, records go to `<log_dir>/rmstrend.log` instead of
/// stderr so they do not tear the TUI.
pub fn init_logging(log_dir: Option<&Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(dir) = log_dir {
        let opened = std::fs::create_dir_all(dir).and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(TUI_LOG_FILE))
        });
        match opened {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                // Run without a log rather than write over the TUI.
                eprintln!("Warning: cannot open log file in {}: {e}", dir.display());
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

/// Load the config or exit with status 1.
pub fn load_config(path: Option<&Path>) -> Config {
    Config::load_or_default(path).unwrap_or_else(|e| {
        match path {
            Some(p) => eprintln!("Error: invalid config {}: {e}", p.display()),
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    })
}

/// Parse a duration like `500ms`, `90s`, `15m`, `2h` or a bare number of
/// seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();

    let (numeric, multiplier) = if let Some(rest) = s.strip_suffix("ms") {
        (rest, 1u64)
    } else if let Some(rest) = s.strip_suffix('s') {
        (rest, 1000)
    } else if let Some(rest) = s.strip_suffix('m') {
        (rest, 60_000)
    } else if let Some(rest) = s.strip_suffix('h') {
        (rest, 3_600_000)
    } else {
        // Assume seconds
        (s, 1000)
    };

    let value: u64 = numeric.trim().parse().ok()?;
    value.checked_mul(multiplier).map(Duration::from_millis)
}
