//! Adaptive milestone scaling: engagement level, next milestone target,
//! adaptive daily/weekly goals, and practice recommendations.

use serde::{Deserialize, Serialize};

use crate::progress::ProgressSnapshot;

/// Tunable multipliers and thresholds. The defaults are product-tuning
/// values; callers may override per user and persist the override externally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    pub session_multiplier: f64,
    pub streak_multiplier: f64,
    pub beginner_threshold: u32,
    pub intermediate_threshold: u32,
    pub advanced_threshold: u32,
    pub user_growth_factor: f64,
    pub engagement_bonus: f64,
    pub consistency_reward: f64,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            session_multiplier: 2.0,
            streak_multiplier: 3.0,
            beginner_threshold: 10,
            intermediate_threshold: 50,
            advanced_threshold: 200,
            user_growth_factor: 2.0,
            engagement_bonus: 1.2,
            consistency_reward: 1.3,
        }
    }
}

/// Coarse engagement tier derived from the scaling level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelTier {
    Beginner,
    Intermediate,
    Advanced,
}

pub fn level_tier(level: u32) -> LevelTier {
    match level {
        0..=3 => LevelTier::Beginner,
        4..=6 => LevelTier::Intermediate,
        _ => LevelTier::Advanced,
    }
}

/// Coarse engagement tier: `floor(log2(weighted engagement))`.
/// Monotonic non-decreasing in every input; 0 for a brand-new user.
pub fn scaling_level(snapshot: &ProgressSnapshot) -> u32 {
    let engagement = 2.0 * f64::from(snapshot.total_sessions)
        + 0.1 * f64::from(snapshot.total_minutes)
        + 3.0 * f64::from(snapshot.current_streak)
        + 1.5 * f64::from(snapshot.longest_streak);
    engagement.max(1.0).log2().floor() as u32
}

/// Progress dimension a milestone lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Sessions,
    Minutes,
    Streak,
}

/// The next unreached threshold on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTarget {
    pub kind: MilestoneKind,
    pub current: u32,
    pub target: u32,
    pub progress_percent: u32,
}

const MINUTES_LADDER: [u32; 7] = [30, 60, 120, 300, 600, 1200, 2400];
const STREAK_LADDER: [u32; 7] = [3, 7, 14, 30, 60, 100, 365];

const MINUTES_GROWTH: f64 = 1.5;
const STREAK_GROWTH: f64 = 1.2;

/// Streak progress counts 1.5x when ranking milestone candidates.
const STREAK_WEIGHT: f64 = 1.5;

/// First rung above `current`, or geometric growth past the ladder's end.
/// Always strictly greater than `current`.
fn next_on_ladder(ladder: &[u32], current: u32, growth: f64) -> u32 {
    for &rung in ladder {
        if rung > current {
            return rung;
        }
    }
    let mut target = f64::from(*ladder.last().expect("ladder is non-empty"));
    while target as u32 <= current {
        target = (target * growth).ceil();
    }
    target as u32
}

/// Pick the milestone the user is closest to, weighted toward streaks.
/// Ties (including the all-zero new user) resolve in the candidate order
/// streak > sessions > minutes.
pub fn next_milestone(snapshot: &ProgressSnapshot, config: &ScalingConfig) -> MilestoneTarget {
    let sessions_ladder = [
        config.beginner_threshold,
        config.intermediate_threshold,
        config.advanced_threshold,
    ];

    let candidates = [
        (
            MilestoneKind::Streak,
            snapshot.current_streak,
            next_on_ladder(&STREAK_LADDER, snapshot.current_streak, STREAK_GROWTH),
            STREAK_WEIGHT,
        ),
        (
            MilestoneKind::Sessions,
            snapshot.total_sessions,
            next_on_ladder(
                &sessions_ladder,
                snapshot.total_sessions,
                config.user_growth_factor,
            ),
            1.0,
        ),
        (
            MilestoneKind::Minutes,
            snapshot.total_minutes,
            next_on_ladder(&MINUTES_LADDER, snapshot.total_minutes, MINUTES_GROWTH),
            1.0,
        ),
    ];

    let weighted = |current: u32, target: u32, weight: f64| {
        f64::from(current) / f64::from(target) * weight
    };

    let mut best = candidates[0];
    for c in &candidates[1..] {
        if weighted(c.1, c.2, c.3) > weighted(best.1, best.2, best.3) {
            best = *c;
        }
    }

    let (kind, current, target, _) = best;
    let progress_percent =
        ((100.0 * f64::from(current) / f64::from(target)).round() as u32).min(100);
    MilestoneTarget {
        kind,
        current,
        target,
        progress_percent,
    }
}

/// Daily/weekly targets tuned to the user's demonstrated capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveGoals {
    pub daily_minutes: u32,
    pub weekly_goal: u32,
    pub monthly_challenge: String,
}

pub fn adaptive_goals(snapshot: &ProgressSnapshot, config: &ScalingConfig) -> AdaptiveGoals {
    let mut daily = if snapshot.total_sessions == 0 {
        10.0
    } else {
        (snapshot.average_session_length.max(5.0) * config.engagement_bonus).min(30.0)
    };
    if snapshot.current_streak >= 7 {
        daily *= config.consistency_reward;
    }

    let monthly_challenge = match level_tier(scaling_level(snapshot)) {
        LevelTier::Beginner => "Complete 10 sessions this month to build your foundation.",
        LevelTier::Intermediate => {
            "Practice 20 days this month and try one new session style."
        }
        LevelTier::Advanced => {
            "Hold a daily practice all month, including one 30-minute sit each week."
        }
    };

    AdaptiveGoals {
        daily_minutes: daily.round() as u32,
        weekly_goal: (daily * 7.0).round() as u32,
        monthly_challenge: monthly_challenge.to_string(),
    }
}

/// Rule-based practice nudges: first-match order, deterministic, at most 3.
pub fn recommendations(snapshot: &ProgressSnapshot, level: u32) -> Vec<String> {
    let tier = level_tier(level);
    let mut out = Vec::new();

    if snapshot.total_sessions == 0 {
        out.push("Start with a 10-minute guided session today.".to_string());
    }
    if tier == LevelTier::Beginner && snapshot.current_streak < 3 {
        out.push(
            "Aim for three days in a row. Short daily sits beat occasional long ones."
                .to_string(),
        );
    }
    if snapshot.total_sessions > 0 && snapshot.average_session_length < 10.0 {
        out.push("Try stretching one session this week to 10 minutes.".to_string());
    }
    if snapshot.current_streak >= 7 && snapshot.current_streak == snapshot.longest_streak {
        out.push(
            "You're on your longest streak yet. Protect it with a fixed time of day."
                .to_string(),
        );
    }
    if tier == LevelTier::Advanced {
        out.push("Explore an unguided session to deepen your practice.".to_string());
    }

    out.truncate(3);
    out
}
