//! CLI for rmstrend — simulated RMS vibration trend monitor.

mod commands;
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rmstrend")]
#[command(about = "rmstrend — simulated RMS vibration trend monitor with zone overlays")]
#[command(version = rmstrend_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live TUI: strip chart, zone bands, operator controls and log export
    Monitor {
        /// JSON config file (simulator, zones, export sections)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Initial speed multiplier (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        speed: Option<u32>,

        /// Initial trend
        #[arg(long, value_parser = ["incline", "stable", "decline"])]
        trend: Option<String>,

        /// Initial RMS value in mm/s (overrides config base_value)
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,

        /// Tick interval in milliseconds (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: Option<u64>,

        /// Directory for exported logs (overrides config)
        #[arg(long)]
        logs_dir: Option<PathBuf>,

        /// Start the simulation clock immediately
        #[arg(long)]
        autostart: bool,
    },

    /// Headless run over a synthetic clock; exports the history and prints
    /// a zone-transition summary
    Simulate {
        /// Simulated duration (e.g. 90s, 15m, 2h)
        #[arg(long)]
        duration: String,

        /// Speed multiplier (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        speed: Option<u32>,

        /// Trend for the whole run
        #[arg(long, default_value = "stable", value_parser = ["incline", "stable", "decline"])]
        trend: String,

        /// Initial RMS value in mm/s (overrides config base_value)
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,

        /// Tick interval in milliseconds (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: Option<u64>,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the exported log (overrides config logs_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration as JSON
    Config {
        /// JSON config file to load and validate
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor {
            config,
            speed,
            trend,
            value,
            tick_ms,
            logs_dir,
            autostart,
        } => commands::monitor::run(commands::monitor::MonitorCommandConfig {
            config_path: config.as_deref(),
            overrides: commands::Overrides {
                speed,
                value,
                tick_ms,
            },
            trend: trend.as_deref(),
            logs_dir,
            autostart,
        }),
        Commands::Simulate {
            duration,
            speed,
            trend,
            value,
            tick_ms,
            config,
            output,
            seed,
        } => commands::simulate::run(commands::simulate::SimulateCommandConfig {
            config_path: config.as_deref(),
            duration: &duration,
            overrides: commands::Overrides {
                speed,
                value,
                tick_ms,
            },
            trend: &trend,
            output,
            seed,
        }),
        Commands::Config { config } => commands::config::run(config.as_deref()),
    }
}
