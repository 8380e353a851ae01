//! Achievement catalog evaluation, locked-progress reporting, and reward
//! claiming.
//!
//! Templates are static and code-defined; earned achievements are immutable
//! snapshots of a template except for per-reward claim flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aggregate stats the evaluator reads. All counters come from the backend
/// already summed; missing fields deserialize to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub sessions_count: u32,
    pub total_minutes: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub courses_completed: u32,
    pub mood_entries: u32,
    pub sessions_this_week: u32,
}

/// Which counter a requirement checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    SessionsCount,
    TotalMinutes,
    CurrentStreak,
    LongestStreak,
    CoursesCompleted,
    MoodEntries,
    /// Sessions completed within the current week.
    ConsistencyScore,
}

impl RequirementKind {
    pub fn observed(&self, stats: &UserStats) -> u32 {
        match self {
            RequirementKind::SessionsCount => stats.sessions_count,
            RequirementKind::TotalMinutes => stats.total_minutes,
            RequirementKind::CurrentStreak => stats.current_streak,
            RequirementKind::LongestStreak => stats.longest_streak,
            RequirementKind::CoursesCompleted => stats.courses_completed,
            RequirementKind::MoodEntries => stats.mood_entries,
            RequirementKind::ConsistencyScore => stats.sessions_this_week,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub kind: RequirementKind,
    pub value: u32,
}

impl Requirement {
    pub fn new(kind: RequirementKind, value: u32) -> Self {
        Self { kind, value }
    }

    pub fn satisfied_by(&self, stats: &UserStats) -> bool {
        self.kind.observed(stats) >= self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// What claiming a reward grants. The engine only flips the claim flag;
/// applying the effect (unlocking content, issuing a code, ...) is the
/// caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    ContentUnlock,
    FeatureFlag,
    DiscountCode,
    Certificate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTemplate {
    pub id: String,
    pub kind: RewardKind,
    pub description: String,
    pub valid_until: Option<DateTime<Utc>>,
}

impl RewardTemplate {
    pub fn new(id: impl Into<String>, kind: RewardKind, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            valid_until: None,
        }
    }

    pub fn with_valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.valid_until = Some(valid_until);
        self
    }
}

/// Static, code-defined rule set for one unlockable badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementTemplate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<Requirement>,
    pub rewards: Vec<RewardTemplate>,
    pub rarity: Rarity,
    pub points: u32,
}

/// A materialized reward on an earned achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub kind: RewardKind,
    pub description: String,
    pub valid_until: Option<DateTime<Utc>>,
    pub claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
}

/// An earned achievement. Created once, never deleted; only the reward
/// claim flags mutate afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub rarity: Rarity,
    pub points: u32,
    pub unlocked_at: DateTime<Utc>,
    pub rewards: Vec<Reward>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("reward not found: {0}")]
    NotFound(String),
    #[error("reward already claimed: {0}")]
    AlreadyClaimed(String),
    #[error("reward expired: {0}")]
    Expired(String),
}

/// Find templates whose requirements are all newly satisfied.
///
/// Unlocking is monotonic: anything in `earned_ids` stays earned no matter
/// what the stats say now, and is never re-emitted.
pub fn evaluate(
    templates: &[AchievementTemplate],
    earned_ids: &[String],
    stats: &UserStats,
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    templates
        .iter()
        .filter(|t| !earned_ids.contains(&t.id))
        .filter(|t| t.requirements.iter().all(|r| r.satisfied_by(stats)))
        .map(|t| Achievement {
            id: t.id.clone(),
            title: t.title.clone(),
            rarity: t.rarity,
            points: t.points,
            unlocked_at: now,
            rewards: t
                .rewards
                .iter()
                .map(|r| Reward {
                    id: r.id.clone(),
                    kind: r.kind,
                    description: r.description.clone(),
                    valid_until: r.valid_until,
                    claimed: false,
                    claimed_at: None,
                })
                .collect(),
        })
        .collect()
}

/// Mark a reward claimed, returning its kind so the caller can apply the
/// external effect.
pub fn claim_reward(
    achievement: &mut Achievement,
    reward_id: &str,
    now: DateTime<Utc>,
) -> Result<RewardKind, ClaimError> {
    let reward = achievement
        .rewards
        .iter_mut()
        .find(|r| r.id == reward_id)
        .ok_or_else(|| ClaimError::NotFound(reward_id.to_string()))?;

    if reward.claimed {
        return Err(ClaimError::AlreadyClaimed(reward_id.to_string()));
    }
    if let Some(valid_until) = reward.valid_until {
        if valid_until < now {
            return Err(ClaimError::Expired(reward_id.to_string()));
        }
    }

    reward.claimed = true;
    reward.claimed_at = Some(now);
    Ok(reward.kind)
}

/// Per-requirement progress toward one locked achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementProgress {
    pub kind: RequirementKind,
    pub current: u32,
    pub target: u32,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedProgress {
    pub id: String,
    pub percent: u32,
    pub requirements: Vec<RequirementProgress>,
}

/// Progress toward each unearned template, closest first.
pub fn progress_toward_locked(
    templates: &[AchievementTemplate],
    earned_ids: &[String],
    stats: &UserStats,
) -> Vec<LockedProgress> {
    let mut out: Vec<LockedProgress> = templates
        .iter()
        .filter(|t| !earned_ids.contains(&t.id))
        .map(|t| {
            let requirements: Vec<RequirementProgress> = t
                .requirements
                .iter()
                .map(|r| {
                    let current = r.kind.observed(stats).min(r.value);
                    let percent = if r.value == 0 {
                        100
                    } else {
                        (100.0 * f64::from(current) / f64::from(r.value)).round() as u32
                    };
                    RequirementProgress {
                        kind: r.kind,
                        current,
                        target: r.value,
                        percent,
                    }
                })
                .collect();
            let percent = if requirements.is_empty() {
                0
            } else {
                requirements.iter().map(|r| r.percent).sum::<u32>() / requirements.len() as u32
            };
            LockedProgress {
                id: t.id.clone(),
                percent,
                requirements,
            }
        })
        .collect();

    out.sort_by(|a, b| b.percent.cmp(&a.percent).then_with(|| a.id.cmp(&b.id)));
    out
}

/// The built-in badge catalog.
pub fn builtin_catalog() -> Vec<AchievementTemplate> {
    use RequirementKind::*;

    let t = |id: &str,
             title: &str,
             description: &str,
             requirements: Vec<Requirement>,
             rewards: Vec<RewardTemplate>,
             rarity: Rarity,
             points: u32| AchievementTemplate {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        requirements,
        rewards,
        rarity,
        points,
    };

    vec![
        t(
            "first_sit",
            "First Sit",
            "Complete your first meditation session.",
            vec![Requirement::new(SessionsCount, 1)],
            vec![RewardTemplate::new(
                "first_sit_welcome",
                RewardKind::ContentUnlock,
                "Unlocks the Getting Started pack.",
            )],
            Rarity::Common,
            10,
        ),
        t(
            "ten_sessions",
            "Finding Rhythm",
            "Complete 10 sessions.",
            vec![Requirement::new(SessionsCount, 10)],
            vec![RewardTemplate::new(
                "rhythm_pack",
                RewardKind::ContentUnlock,
                "Unlocks the Focus session pack.",
            )],
            Rarity::Common,
            25,
        ),
        t(
            "week_streak",
            "Seven Days Still",
            "Practice 7 days in a row.",
            vec![Requirement::new(CurrentStreak, 7)],
            vec![RewardTemplate::new(
                "streak_badge_frame",
                RewardKind::FeatureFlag,
                "Enables the streak flame on your profile.",
            )],
            Rarity::Rare,
            50,
        ),
        t(
            "month_streak",
            "Thirty Days Deep",
            "Hold a 30-day streak.",
            vec![Requirement::new(LongestStreak, 30)],
            vec![RewardTemplate::new(
                "month_streak_discount",
                RewardKind::DiscountCode,
                "20% off an annual subscription.",
            )],
            Rarity::Epic,
            150,
        ),
        t(
            "ten_hours",
            "Ten Hours In",
            "Accumulate 600 minutes of practice.",
            vec![Requirement::new(TotalMinutes, 600)],
            vec![],
            Rarity::Rare,
            75,
        ),
        t(
            "course_graduate",
            "Course Graduate",
            "Finish your first course.",
            vec![Requirement::new(CoursesCompleted, 1)],
            vec![RewardTemplate::new(
                "graduate_certificate",
                RewardKind::Certificate,
                "A shareable completion certificate.",
            )],
            Rarity::Rare,
            60,
        ),
        t(
            "mood_mapper",
            "Mood Mapper",
            "Log 30 mood check-ins.",
            vec![Requirement::new(MoodEntries, 30)],
            vec![],
            Rarity::Common,
            40,
        ),
        t(
            "steady_week",
            "Steady Week",
            "Five sessions within a single week while holding a 5-day streak.",
            vec![
                Requirement::new(ConsistencyScore, 5),
                Requirement::new(CurrentStreak, 5),
            ],
            vec![RewardTemplate::new(
                "steady_week_pack",
                RewardKind::ContentUnlock,
                "Unlocks the Deep Rest collection.",
            )],
            Rarity::Epic,
            100,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn stats(sessions: u32, current_streak: u32) -> UserStats {
        UserStats {
            sessions_count: sessions,
            current_streak,
            longest_streak: current_streak,
            ..UserStats::default()
        }
    }

    #[test]
    fn test_evaluate_requires_all_requirements() {
        let catalog = builtin_catalog();

        // 5-day streak but only 3 sessions this week: steady_week stays locked.
        let partial = UserStats {
            sessions_count: 20,
            current_streak: 5,
            longest_streak: 5,
            sessions_this_week: 3,
            ..UserStats::default()
        };
        let unlocked = evaluate(&catalog, &[], &partial, now());
        assert!(unlocked.iter().all(|a| a.id != "steady_week"));

        let full = UserStats {
            sessions_this_week: 5,
            ..partial
        };
        let unlocked = evaluate(&catalog, &[], &full, now());
        assert!(unlocked.iter().any(|a| a.id == "steady_week"));
    }

    #[test]
    fn test_evaluate_skips_already_earned() {
        let catalog = builtin_catalog();
        let earned = vec!["first_sit".to_string()];
        let unlocked = evaluate(&catalog, &earned, &stats(3, 1), now());
        assert!(unlocked.iter().all(|a| a.id != "first_sit"));
    }

    #[test]
    fn test_unlock_materializes_unclaimed_rewards() {
        let catalog = builtin_catalog();
        let unlocked = evaluate(&catalog, &[], &stats(1, 1), now());
        let first = unlocked.iter().find(|a| a.id == "first_sit").unwrap();
        assert_eq!(first.unlocked_at, now());
        assert_eq!(first.rewards.len(), 1);
        assert!(!first.rewards[0].claimed);
        assert!(first.rewards[0].claimed_at.is_none());
    }

    #[test]
    fn test_claim_reward_lifecycle() {
        let catalog = builtin_catalog();
        let mut unlocked = evaluate(&catalog, &[], &stats(1, 1), now());
        let first = unlocked.iter_mut().find(|a| a.id == "first_sit").unwrap();

        let kind = claim_reward(first, "first_sit_welcome", now()).unwrap();
        assert_eq!(kind, RewardKind::ContentUnlock);
        assert!(first.rewards[0].claimed);
        assert_eq!(first.rewards[0].claimed_at, Some(now()));

        assert_eq!(
            claim_reward(first, "first_sit_welcome", now()),
            Err(ClaimError::AlreadyClaimed("first_sit_welcome".to_string()))
        );
        assert_eq!(
            claim_reward(first, "no_such_reward", now()),
            Err(ClaimError::NotFound("no_such_reward".to_string()))
        );
    }

    #[test]
    fn test_claim_expired_reward() {
        let template = AchievementTemplate {
            id: "launch_week".to_string(),
            title: "Launch Week".to_string(),
            description: "Joined during launch week.".to_string(),
            requirements: vec![Requirement::new(RequirementKind::SessionsCount, 1)],
            rewards: vec![
                RewardTemplate::new(
                    "launch_discount",
                    RewardKind::DiscountCode,
                    "Launch discount.",
                )
                .with_valid_until(now() - chrono::Duration::days(1)),
            ],
            rarity: Rarity::Legendary,
            points: 5,
        };
        let mut unlocked = evaluate(&[template], &[], &stats(1, 1), now());
        assert_eq!(
            claim_reward(&mut unlocked[0], "launch_discount", now()),
            Err(ClaimError::Expired("launch_discount".to_string()))
        );
    }

    #[test]
    fn test_progress_toward_locked_percentages() {
        let catalog = builtin_catalog();
        // 7 of 10 sessions reports 70%.
        let progress = progress_toward_locked(&catalog, &[], &stats(7, 0));
        let ten = progress.iter().find(|p| p.id == "ten_sessions").unwrap();
        assert_eq!(ten.percent, 70);
        assert_eq!(ten.requirements[0].current, 7);
        assert_eq!(ten.requirements[0].target, 10);
    }

    #[test]
    fn test_progress_clamps_at_target_and_sorts_descending() {
        let catalog = builtin_catalog();
        let s = UserStats {
            sessions_count: 500,
            current_streak: 3,
            longest_streak: 3,
            ..UserStats::default()
        };
        let earned = vec!["first_sit".to_string(), "ten_sessions".to_string()];
        let progress = progress_toward_locked(&catalog, &earned, &s);

        assert!(progress.iter().all(|p| p.percent <= 100));
        for pair in progress.windows(2) {
            assert!(pair[0].percent >= pair[1].percent);
        }
        // week_streak at 3/7 rounds to 43.
        let week = progress.iter().find(|p| p.id == "week_streak").unwrap();
        assert_eq!(week.percent, 43);
    }

    #[test]
    fn test_unlock_is_monotonic_across_stat_regression() {
        let catalog = builtin_catalog();
        let unlocked = evaluate(&catalog, &[], &stats(12, 7), now());
        let mut earned: Vec<String> = unlocked.iter().map(|a| a.id.clone()).collect();
        assert!(earned.contains(&"week_streak".to_string()));

        // Streak broken: nothing is revoked and nothing re-unlocks.
        let later = evaluate(&catalog, &earned, &stats(12, 1), now());
        assert!(later.iter().all(|a| a.id != "week_streak"));
        earned.extend(later.iter().map(|a| a.id.clone()));
        assert!(earned.contains(&"week_streak".to_string()));
    }
}
