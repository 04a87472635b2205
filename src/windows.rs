// Spawn window classification.
//
// Pure functions from (last kill time, now) to a spawn-confidence category
// and a signed HH:MM elapsed string. The window tables are configuration
// data: a repeating 30-hour cycle of guaranteed and possible bands.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;

/// Spawn confidence for one rank, derived from time since its last kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStatus {
    /// No kill time recorded.
    Unknown,
    /// Kill time lies in the future (the "just killed" sentinel).
    NotYetDue,
    /// Elapsed time falls in a guaranteed-spawn band.
    Guaranteed,
    /// Elapsed time falls in a possible-spawn band.
    Possible,
    /// Elapsed time falls between bands. Sub-minute slivers only.
    OutOfWindow,
}

impl SpawnStatus {
    /// Marker glyph shown in front of the board cell.
    pub fn marker(self) -> &'static str {
        match self {
            SpawnStatus::Unknown => "\u{2753}",     // ❓
            SpawnStatus::NotYetDue => "\u{1F534}",  // 🔴
            SpawnStatus::Guaranteed => "\u{1F7E2}", // 🟢
            SpawnStatus::Possible => "\u{1F7E1}",   // 🟡
            SpawnStatus::OutOfWindow => "\u{26AA}", // ⚪
        }
    }
}

/// One spawn window, in hours since kill. Inclusive on both ends;
/// `end == None` means the band never closes.
#[derive(Debug, Clone, Copy)]
struct Band {
    start: f64,
    end: Option<f64>,
}

impl Band {
    fn contains(&self, hours: f64) -> bool {
        hours >= self.start && self.end.is_none_or(|end| hours <= end)
    }
}

/// Cycle period between consecutive guaranteed bands, in minutes.
const CYCLE_MINUTES: i64 = 30 * 60;

/// Band edge expressed as hours, rounded like classified input so that
/// inclusive edge comparisons cannot flicker on float drift.
fn edge(minutes: i64) -> f64 {
    round_hours(minutes as f64 / 60.0)
}

fn hm(hours: i64, minutes: i64) -> i64 {
    hours * 60 + minutes
}

lazy_static! {
    /// Guaranteed-spawn bands: 02:00-24:00 and ten 30-hour repeats.
    static ref GUARANTEED_WINDOWS: Vec<Band> = (0..11)
        .map(|k| Band {
            start: edge(hm(2, 0) + k * CYCLE_MINUTES),
            end: Some(edge(hm(24, 0) + k * CYCLE_MINUTES)),
        })
        .collect();

    /// Possible-spawn bands: 00:00-01:59, the 24:01-31:59 repeats between
    /// guaranteed bands, and the open-ended tail after the last cycle.
    static ref POSSIBLE_WINDOWS: Vec<Band> = {
        let mut bands = vec![Band {
            start: edge(0),
            end: Some(edge(hm(1, 59))),
        }];
        bands.extend((0..10).map(|k| Band {
            start: edge(hm(24, 1) + k * CYCLE_MINUTES),
            end: Some(edge(hm(31, 59) + k * CYCLE_MINUTES)),
        }));
        bands.push(Band {
            start: edge(hm(324, 1)),
            end: None,
        });
        bands
    };
}

/// Round to 4 decimal places. Applied to elapsed hours and band edges alike.
fn round_hours(hours: f64) -> f64 {
    (hours * 10_000.0).round() / 10_000.0
}

/// Classify elapsed hours since kill into a spawn-confidence category.
///
/// Negative input means the recorded kill time is still in the future and
/// always maps to `NotYetDue`. The guaranteed table is consulted before the
/// possible table, so a value on a shared inclusive boundary resolves to
/// `Guaranteed`.
pub fn classify(elapsed_hours: f64) -> SpawnStatus {
    let elapsed = round_hours(elapsed_hours);
    if elapsed < 0.0 {
        return SpawnStatus::NotYetDue;
    }
    if GUARANTEED_WINDOWS.iter().any(|b| b.contains(elapsed)) {
        SpawnStatus::Guaranteed
    } else if POSSIBLE_WINDOWS.iter().any(|b| b.contains(elapsed)) {
        SpawnStatus::Possible
    } else {
        SpawnStatus::OutOfWindow
    }
}

/// Hours elapsed between a kill time and `now`. Negative while the kill
/// time lies in the future.
pub fn elapsed_hours(last_killed: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - last_killed).num_milliseconds() as f64 / 3_600_000.0
}

/// Status for a possibly-unset timer entry.
pub fn spawn_status(last_killed: Option<DateTime<Utc>>, now: DateTime<Utc>) -> SpawnStatus {
    match last_killed {
        None => SpawnStatus::Unknown,
        Some(killed) => classify(elapsed_hours(killed, now)),
    }
}

/// Format elapsed hours as signed `HH:MM`. The sign is present only for
/// negative values; the hours field widens past two digits as needed.
pub fn format_elapsed(hours: f64) -> String {
    let total_minutes = (hours.abs() * 60.0).floor() as i64;
    let sign = if hours < 0.0 { "-" } else { "" };
    format!("{}{:02}:{:02}", sign, total_minutes / 60, total_minutes % 60)
}
