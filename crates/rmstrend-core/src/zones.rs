//! Alarm-zone classification.
//!
//! Values are sorted into four ordered severity zones by three ascending
//! thresholds. The same [`ZoneThresholds`] drive the live chart bands, the
//! history markers and the headless summary.

use std::io;

use serde::{Deserialize, Serialize};

use crate::sample::SamplePoint;

/// Severity zone of an RMS value, mildest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    Good,
    Satisfactory,
    Unsatisfactory,
    Unacceptable,
}

impl Zone {
    pub const ALL: [Zone; 4] = [
        Zone::Good,
        Zone::Satisfactory,
        Zone::Unsatisfactory,
        Zone::Unacceptable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
            Self::Unsatisfactory => "Unsatisfactory",
            Self::Unacceptable => "Unacceptable",
        }
    }

    /// Whether this zone should raise an alarm marker.
    pub fn is_alarm(self) -> bool {
        self == Self::Unacceptable
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Lower bounds of the three non-Good zones, in mm/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneThresholds {
    /// Values below this are Good.
    pub satisfactory: f64,
    /// Values below this (and not Good) are Satisfactory.
    pub unsatisfactory: f64,
    /// Values at or above this are Unacceptable.
    pub unacceptable: f64,
    /// Extra reference line drawn above the top band.
    pub alarm_line: f64,
}

impl ZoneThresholds {
    /// Bands drawn on the live strip-chart.
    pub const LIVE_OVERLAY: Self = Self {
        satisfactory: 1.12,
        unsatisfactory: 2.80,
        unacceptable: 4.50,
        alarm_line: 7.10,
    };

    /// Stricter bands used when reviewing the full history.
    pub const HISTORY_REVIEW: Self = Self {
        satisfactory: 0.28,
        unsatisfactory: 1.12,
        unacceptable: 2.80,
        alarm_line: 7.10,
    };

    pub fn classify(&self, value: f64) -> Zone {
        if value < self.satisfactory {
            Zone::Good
        } else if value < self.unsatisfactory {
            Zone::Satisfactory
        } else if value < self.unacceptable {
            Zone::Unsatisfactory
        } else {
            Zone::Unacceptable
        }
    }

    /// Upper boundary of each zone paired with the zone it closes.
    ///
    /// The Unacceptable entry uses [`alarm_line`](Self::alarm_line).
    pub fn boundaries(&self) -> [(f64, Zone); 4] {
        [
            (self.satisfactory, Zone::Good),
            (self.unsatisfactory, Zone::Satisfactory),
            (self.unacceptable, Zone::Unsatisfactory),
            (self.alarm_line, Zone::Unacceptable),
        ]
    }

    /// Check that all thresholds are finite, non-negative and strictly ascending.
    pub fn validate(&self) -> io::Result<()> {
        let bounds = [
            self.satisfactory,
            self.unsatisfactory,
            self.unacceptable,
            self.alarm_line,
        ];
        if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(invalid("zone thresholds must be finite and non-negative"));
        }
        if !bounds[..3].windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid(format!(
                "zone thresholds must be strictly ascending, got {} / {} / {}",
                self.satisfactory, self.unsatisfactory, self.unacceptable
            )));
        }
        if self.alarm_line < self.unacceptable {
            return Err(invalid(format!(
                "alarm line {} is below the unacceptable threshold {}",
                self.alarm_line, self.unacceptable
            )));
        }
        Ok(())
    }
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self::LIVE_OVERLAY
    }
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// First sample of a run of samples in the same zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTransition {
    /// Zero-based index into the sample sequence.
    pub index: usize,
    pub zone: Zone,
    pub simulated_minutes: f64,
    pub value: f64,
    pub wall_clock_label: String,
}

/// Mark every sample whose zone differs from the preceding sample's zone.
///
/// The first sample always opens a run and is reported.
pub fn transitions(samples: &[SamplePoint], thresholds: &ZoneThresholds) -> Vec<ZoneTransition> {
    let mut out = Vec::new();
    let mut last: Option<Zone> = None;
    for (index, s) in samples.iter().enumerate() {
        let zone = thresholds.classify(s.value);
        if last != Some(zone) {
            out.push(ZoneTransition {
                index,
                zone,
                simulated_minutes: s.simulated_minutes,
                value: s.value,
                wall_clock_label: s.wall_clock_label.clone(),
            });
            last = Some(zone);
        }
    }
    out
}

/// Number of samples in each zone, indexed like [`Zone::ALL`].
pub fn zone_counts(samples: &[SamplePoint], thresholds: &ZoneThresholds) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for s in samples {
        counts[thresholds.classify(s.value) as usize] += 1;
    }
    counts
}
