//! Derived progress aggregates.
//!
//! A `ProgressSnapshot` is always recomputed from raw totals supplied by the
//! caller; it is never persisted on its own.

use serde::{Deserialize, Serialize};

/// Aggregate view of a user's practice so far. All fields are non-negative;
/// `average_session_length` is derived, `mindfulness_score` lives in [0, 10]
/// and `completion_rate` in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total_sessions: u32,
    pub total_minutes: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub average_session_length: f64,
    pub completion_rate: f64,
    pub total_days: u32,
    pub mindfulness_score: f64,
}

impl ProgressSnapshot {
    pub fn new(
        total_sessions: u32,
        total_minutes: u32,
        current_streak: u32,
        longest_streak: u32,
    ) -> Self {
        let average_session_length = if total_sessions == 0 {
            0.0
        } else {
            f64::from(total_minutes) / f64::from(total_sessions)
        };
        Self {
            total_sessions,
            total_minutes,
            current_streak,
            // Totals arrive from an external backend; hold the invariant here.
            longest_streak: longest_streak.max(current_streak),
            average_session_length,
            completion_rate: 0.0,
            total_days: 0,
            mindfulness_score: 0.0,
        }
    }

    pub fn with_total_days(mut self, total_days: u32) -> Self {
        self.total_days = total_days;
        self
    }

    pub fn with_completion_rate(mut self, rate: f64) -> Self {
        self.completion_rate = rate.clamp(0.0, 100.0);
        self
    }

    pub fn with_mindfulness_score(mut self, score: f64) -> Self {
        self.mindfulness_score = score.clamp(0.0, 10.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_session_length() {
        let snap = ProgressSnapshot::new(4, 60, 0, 0);
        assert_eq!(snap.average_session_length, 15.0);

        let empty = ProgressSnapshot::new(0, 0, 0, 0);
        assert_eq!(empty.average_session_length, 0.0);
    }

    #[test]
    fn test_longest_streak_never_below_current() {
        let snap = ProgressSnapshot::new(10, 100, 8, 5);
        assert_eq!(snap.longest_streak, 8);
    }

    #[test]
    fn test_score_clamping() {
        let snap = ProgressSnapshot::new(1, 10, 1, 1)
            .with_mindfulness_score(12.5)
            .with_completion_rate(140.0);
        assert_eq!(snap.mindfulness_score, 10.0);
        assert_eq!(snap.completion_rate, 100.0);
    }
}
