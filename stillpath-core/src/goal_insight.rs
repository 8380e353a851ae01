//! Goal health classification and auto-adjustment proposals.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    DeadlineExtend,
    TargetIncrease,
}

/// One applied adjustment. The history is append-only; entries are never
/// rewritten or dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    pub at: DateTime<Utc>,
    pub kind: AdjustmentKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub kind: GoalKind,
    pub target_value: f64,
    pub current_value: f64,
    /// 0-100.
    pub progress: f64,
    pub status: GoalStatus,
    pub streak: u32,
    pub start_date: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub adjustment_history: Vec<AdjustmentRecord>,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: GoalKind,
        target_value: f64,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            target_value,
            current_value: 0.0,
            progress: 0.0,
            status: GoalStatus::Active,
            streak: 0,
            start_date,
            deadline: None,
            updated_at: start_date,
            adjustment_history: Vec::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Record a new current value; completes the goal at 100%.
    pub fn record_progress(&mut self, current_value: f64, now: DateTime<Utc>) {
        self.current_value = current_value.max(0.0);
        self.progress = if self.target_value <= 0.0 {
            100.0
        } else {
            (100.0 * self.current_value / self.target_value).min(100.0)
        };
        self.updated_at = now;
        if self.status == GoalStatus::Active && self.progress >= 100.0 {
            self.status = GoalStatus::Completed;
        }
    }

    pub fn pause(&mut self) {
        if self.status == GoalStatus::Active {
            self.status = GoalStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GoalStatus::Paused {
            self.status = GoalStatus::Active;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalHealth {
    Ahead,
    OnTrack,
    Behind,
    AtRisk,
    Stagnant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalInsight {
    pub health: GoalHealth,
    pub urgency: Urgency,
    pub action_required: bool,
    pub message: String,
    pub suggestion: String,
}

/// Days without an update before a goal counts as stagnant.
const STAGNANT_AFTER_DAYS: i64 = 7;

/// Classify a goal's health from progress vs. elapsed time.
///
/// A goal untouched for over a week is stagnant regardless of how its
/// progress compares to the schedule. Otherwise the first matching band
/// wins: ahead (+0.2), on track (-0.1), behind (-0.3), at risk.
pub fn classify(goal: &Goal, now: DateTime<Utc>) -> GoalInsight {
    if now - goal.updated_at > Duration::days(STAGNANT_AFTER_DAYS) {
        return GoalInsight {
            health: GoalHealth::Stagnant,
            urgency: Urgency::Medium,
            action_required: true,
            message: format!("\"{}\" hasn't moved in over a week.", goal.title),
            suggestion: "Log even a small step today to get it moving again.".to_string(),
        };
    }

    let time_elapsed_ratio = match goal.deadline {
        Some(deadline) if deadline > goal.start_date => {
            (now - goal.start_date).num_seconds() as f64
                / (deadline - goal.start_date).num_seconds() as f64
        }
        _ => 0.5,
    };
    let progress_ratio = goal.progress / 100.0;

    if progress_ratio >= time_elapsed_ratio + 0.2 {
        GoalInsight {
            health: GoalHealth::Ahead,
            urgency: Urgency::Low,
            action_required: false,
            message: format!("\"{}\" is ahead of schedule.", goal.title),
            suggestion: "Keep the pace, or consider raising the target.".to_string(),
        }
    } else if progress_ratio >= time_elapsed_ratio - 0.1 {
        GoalInsight {
            health: GoalHealth::OnTrack,
            urgency: Urgency::Low,
            action_required: false,
            message: format!("\"{}\" is on track.", goal.title),
            suggestion: "Nothing to change. Keep showing up.".to_string(),
        }
    } else if progress_ratio >= time_elapsed_ratio - 0.3 {
        GoalInsight {
            health: GoalHealth::Behind,
            urgency: Urgency::Medium,
            action_required: true,
            message: format!("\"{}\" is falling behind.", goal.title),
            suggestion: "Schedule two short sessions this week to catch up.".to_string(),
        }
    } else {
        GoalInsight {
            health: GoalHealth::AtRisk,
            urgency: Urgency::High,
            action_required: true,
            message: format!("\"{}\" is at risk of being missed.", goal.title),
            suggestion: "Shrink the target or extend the deadline, then restart small."
                .to_string(),
        }
    }
}

/// A proposed change to a goal's configuration. Not yet applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub new_deadline: Option<DateTime<Utc>>,
    pub new_target: Option<f64>,
    pub reason: String,
}

/// Propose an automatic adjustment, if any applies.
///
/// - nearly out of runway with little progress: extend the deadline 14 days
/// - weekly goal routinely overshot: raise the target by 30%
///
/// `recent_weekly_average` is the caller's measure of actual output per week.
pub fn auto_adjust(
    goal: &Goal,
    recent_weekly_average: f64,
    now: DateTime<Utc>,
) -> Option<Adjustment> {
    if let Some(deadline) = goal.deadline {
        let days_left = (deadline - now).num_days();
        if goal.progress < 30.0 && days_left <= 7 {
            return Some(Adjustment {
                kind: AdjustmentKind::DeadlineExtend,
                new_deadline: Some(deadline + Duration::days(14)),
                new_target: None,
                reason: format!(
                    "Under 30% done with {days_left} day(s) left; extending the deadline by two weeks."
                ),
            });
        }
    }

    if goal.progress > 80.0
        && goal.kind == GoalKind::Weekly
        && recent_weekly_average > goal.target_value * 1.5
    {
        return Some(Adjustment {
            kind: AdjustmentKind::TargetIncrease,
            new_deadline: None,
            new_target: Some((goal.target_value * 1.3).ceil()),
            reason: format!(
                "Recent weekly output ({recent_weekly_average:.0}) is well past the target; raising it by 30%."
            ),
        });
    }

    None
}

/// Apply a proposed adjustment and append it to the goal's history.
pub fn apply_adjustment(goal: &mut Goal, adjustment: &Adjustment, now: DateTime<Utc>) {
    match adjustment.kind {
        AdjustmentKind::DeadlineExtend => {
            if let Some(new_deadline) = adjustment.new_deadline {
                goal.deadline = Some(new_deadline);
            }
        }
        AdjustmentKind::TargetIncrease => {
            if let Some(new_target) = adjustment.new_target {
                goal.target_value = new_target;
                if goal.target_value > 0.0 {
                    goal.progress = (100.0 * goal.current_value / goal.target_value).min(100.0);
                }
            }
        }
    }
    goal.adjustment_history.push(AdjustmentRecord {
        at: now,
        kind: adjustment.kind,
        reason: adjustment.reason.clone(),
    });
}
