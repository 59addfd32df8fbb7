//! Plain-text export of the full history.
//!
//! # Format
//!
//! Tab-separated, one header line then one line per sample:
//!
//! ```text
//! Time	Index	RMS (mm/s)
//! 10:00:00	1	1.2345
//! ```
//!
//! Files are named `rms_log_<YYYY-MM-DD_HH-MM-SS>.txt` after the export time.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::sample::SamplePoint;

pub const HEADER: &str = "Time\tIndex\tRMS (mm/s)";

/// Write the header and one row per sample.
pub fn write_log<W: Write>(mut out: W, samples: &[SamplePoint]) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for (i, s) in samples.iter().enumerate() {
        writeln!(out, "{}\t{}\t{:.4}", s.wall_clock_label, i + 1, s.value)?;
    }
    out.flush()
}

/// Render the log into a string.
pub fn render_log(samples: &[SamplePoint]) -> String {
    let mut buf = Vec::with_capacity(32 + samples.len() * 20);
    // Writing into a Vec cannot fail.
    let _ = write_log(&mut buf, samples);
    String::from_utf8_lossy(&buf).into_owned()
}

/// File name for an export taken at `at`.
pub fn log_file_name(at: NaiveDateTime) -> String {
    format!("rms_log_{}.txt", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write `samples` to a new log file inside `dir`, creating the directory.
///
/// Returns the path of the written file. An existing file of the same name
/// is never overwritten; that case fails with `AlreadyExists`.
pub fn export_to_dir(dir: &Path, samples: &[SamplePoint], at: NaiveDateTime) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(log_file_name(at));
    let file = File::options().write(true).create_new(true).open(&path)?;
    write_log(BufWriter::new(file), samples)?;
    log::info!("exported {} samples to {}", samples.len(), path.display());
    Ok(path)
}
