//! File-backed inputs: the session-history CSV export and JSON fixtures
//! from the app backend.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::path::Path;

use stillpath_core::{ActivityKind, ActivityRecord, ProgressSnapshot};

/// One row of the app's session-history export:
/// `date,kind,minutes` with an ISO date and a wire-named activity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub date: NaiveDate,
    pub kind: ActivityKind,
    pub minutes: u32,
}

/// Parse a session-history CSV. Rows with unparseable dates or unknown
/// activity kinds are skipped, matching how the app treats legacy exports.
pub fn parse_session_csv(path: impl AsRef<Path>) -> Result<Vec<SessionRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let date_str = record.get(0).unwrap_or("").trim();
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => continue,
        };

        let Some(kind) = ActivityKind::parse_name(record.get(1).unwrap_or("")) else {
            continue;
        };

        let minutes: u32 = record.get(2).unwrap_or("0").trim().parse().unwrap_or(0);

        rows.push(SessionRow {
            date,
            kind,
            minutes,
        });
    }

    Ok(rows)
}

/// The activity log the streak calculator consumes.
pub fn to_activity_log(rows: &[SessionRow]) -> Vec<ActivityRecord> {
    rows.iter()
        .map(|r| ActivityRecord::new(r.date, r.kind))
        .collect()
}

/// Derive raw totals from the history when no backend snapshot is supplied.
/// Only meditation and mindfulness rows count as sessions with minutes.
pub fn snapshot_from_rows(rows: &[SessionRow]) -> ProgressSnapshot {
    let sessions: Vec<&SessionRow> = rows
        .iter()
        .filter(|r| matches!(r.kind, ActivityKind::Meditation | ActivityKind::Mindfulness))
        .collect();
    let total_sessions = sessions.len() as u32;
    let total_minutes: u32 = sessions.iter().map(|r| r.minutes).sum();

    let streak = stillpath_core::replay(&to_activity_log(rows));
    let (current, longest) = streak
        .map(|s| (s.current_streak, s.longest_streak))
        .unwrap_or((0, 0));

    let mut days: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    days.sort_unstable();
    days.dedup();

    ProgressSnapshot::new(total_sessions, total_minutes, current, longest)
        .with_total_days(days.len() as u32)
}

/// Load any JSON-shaped fixture (snapshot, stats, goals, metric series).
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let raw = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("reading {}", path.as_ref().display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.as_ref().display()))
}
