//! stillpath-core: pure scoring and derivation engine for the Stillpath
//! practice tracker.
//!
//! Five independent components, composed only by their caller: streak
//! tracking, milestone scaling, achievement evaluation, goal health
//! classification, and metric trend analysis. All of them are synchronous
//! functions over caller-supplied snapshots; persistence and UI live
//! elsewhere.

pub mod achievements;
pub mod activity;
pub mod goal_insight;
pub mod progress;
pub mod scaling;
pub mod streak;
pub mod time;
pub mod trend;

pub use achievements::{
    Achievement, AchievementTemplate, ClaimError, LockedProgress, Rarity, Requirement,
    RequirementKind, RequirementProgress, Reward, RewardKind, RewardTemplate, UserStats,
    builtin_catalog, claim_reward, evaluate, progress_toward_locked,
};
pub use activity::{ActivityKind, ActivityRecord};
pub use goal_insight::{
    Adjustment, AdjustmentKind, AdjustmentRecord, Goal, GoalHealth, GoalInsight, GoalKind,
    GoalStatus, Urgency, apply_adjustment, auto_adjust, classify,
};
pub use progress::ProgressSnapshot;
pub use scaling::{
    AdaptiveGoals, LevelTier, MilestoneKind, MilestoneTarget, ScalingConfig, adaptive_goals,
    level_tier, next_milestone, recommendations, scaling_level,
};
pub use streak::{SNAPSHOT_RETENTION, StreakSnapshot, StreakState, replay, update_streak};
pub use time::{day_gap, local_day};
pub use trend::{
    EmotionalMetric, MetricKind, MetricPoint, TREND_THRESHOLD, Trend, TrendSummary,
    average_and_trend, ei_series, recommendation,
};
