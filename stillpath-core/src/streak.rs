//! Consecutive-day streak tracking over the activity log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityKind, ActivityRecord};
use crate::time::day_gap;

/// How many daily snapshots we retain per streak state.
pub const SNAPSHOT_RETENTION: usize = 100;

/// One day's entry in the streak history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    pub date: NaiveDate,
    pub streak_count: u32,
    pub activities: Vec<ActivityKind>,
}

/// Current streak bookkeeping. Invariant: `longest_streak >= current_streak`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_date: NaiveDate,
    pub start_date: NaiveDate,
    pub is_active: bool,
    pub snapshots: Vec<StreakSnapshot>,
}

impl StreakState {
    fn first(date: NaiveDate, kind: ActivityKind) -> Self {
        Self {
            current_streak: 1,
            longest_streak: 1,
            last_activity_date: date,
            start_date: date,
            is_active: true,
            snapshots: vec![StreakSnapshot {
                date,
                streak_count: 1,
                activities: vec![kind],
            }],
        }
    }

    /// Whether the streak is still alive as of `today` (at most one day since
    /// the last qualifying activity).
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        let gap = day_gap(self.last_activity_date, today);
        (0..=1).contains(&gap)
    }
}

/// Fold one activity into the streak state.
///
/// - same-day repeat: count unchanged, the day's snapshot gains the kind
/// - next day: streak extends, longest updated
/// - gap of 2+ days: streak restarts at 1 from this date
/// - activity dated before the last recorded one: ignored. The log is
///   append-only; backfill belongs to the persistence layer, the engine
///   never rewrites history.
pub fn update_streak(
    prev: Option<&StreakState>,
    date: NaiveDate,
    kind: ActivityKind,
) -> StreakState {
    let Some(prev) = prev else {
        return StreakState::first(date, kind);
    };

    let gap = day_gap(prev.last_activity_date, date);
    if gap < 0 {
        return prev.clone();
    }

    let mut next = prev.clone();

    if gap == 0 {
        if let Some(snap) = next.snapshots.last_mut() {
            if snap.date == date && !snap.activities.contains(&kind) {
                snap.activities.push(kind);
            }
        }
        next.is_active = true;
        return next;
    }

    if gap == 1 {
        next.current_streak += 1;
        next.longest_streak = next.longest_streak.max(next.current_streak);
    } else {
        next.current_streak = 1;
        next.start_date = date;
    }

    next.last_activity_date = date;
    next.is_active = true;
    next.snapshots.push(StreakSnapshot {
        date,
        streak_count: next.current_streak,
        activities: vec![kind],
    });
    if next.snapshots.len() > SNAPSHOT_RETENTION {
        let overflow = next.snapshots.len() - SNAPSHOT_RETENTION;
        next.snapshots.drain(..overflow);
    }

    next
}

/// Replay a whole activity log through `update_streak`.
/// Returns `None` for an empty log.
pub fn replay(log: &[ActivityRecord]) -> Option<StreakState> {
    let mut state: Option<StreakState> = None;
    for rec in log {
        state = Some(update_streak(state.as_ref(), rec.date, rec.kind));
    }
    state
}
