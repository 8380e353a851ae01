//! Activity log primitives shared by the streak and progress components.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kinds of qualifying daily activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "meditation")]
    Meditation,
    #[serde(rename = "mood_tracking")]
    MoodTracking,
    #[serde(rename = "course_study")]
    CourseStudy,
    #[serde(rename = "mindfulness")]
    Mindfulness,
}

impl ActivityKind {
    /// Parse the wire name used in exports ("meditation", "mood_tracking", ...).
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim() {
            "meditation" => Some(ActivityKind::Meditation),
            "mood_tracking" => Some(ActivityKind::MoodTracking),
            "course_study" => Some(ActivityKind::CourseStudy),
            "mindfulness" => Some(ActivityKind::Mindfulness),
            _ => None,
        }
    }
}

/// One logged activity. Immutable once created; the session-completion
/// flow appends these, the engine only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    pub kind: ActivityKind,
}

impl ActivityRecord {
    pub fn new(date: NaiveDate, kind: ActivityKind) -> Self {
        Self { date, kind }
    }
}
