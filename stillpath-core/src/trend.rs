//! Trend analysis over mood and emotional-intelligence time series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked scalar dimension. Mood dimensions are scored 1-10 per check-in;
/// the five EI dimensions come from periodic assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Happiness,
    Energy,
    Focus,
    Gratitude,
    Stress,
    Anxiety,
    SelfAwareness,
    SelfRegulation,
    Motivation,
    Empathy,
    SocialSkills,
}

impl MetricKind {
    /// For stress and anxiety a falling value is the good direction.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, MetricKind::Stress | MetricKind::Anxiety)
    }

    /// Parse the wire name ("happiness", "self_awareness", ...).
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim() {
            "happiness" => Some(MetricKind::Happiness),
            "energy" => Some(MetricKind::Energy),
            "focus" => Some(MetricKind::Focus),
            "gratitude" => Some(MetricKind::Gratitude),
            "stress" => Some(MetricKind::Stress),
            "anxiety" => Some(MetricKind::Anxiety),
            "self_awareness" => Some(MetricKind::SelfAwareness),
            "self_regulation" => Some(MetricKind::SelfRegulation),
            "motivation" => Some(MetricKind::Motivation),
            "empathy" => Some(MetricKind::Empathy),
            "social_skills" => Some(MetricKind::SocialSkills),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub average: f64,
    /// Raw second-half minus first-half mean, before direction inversion.
    pub change: f64,
    pub trend: Trend,
}

/// Minimum half-to-half shift before we call a trend.
pub const TREND_THRESHOLD: f64 = 0.3;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Average the series and compare its first half against its second half
/// (split by count, not by time). Fewer than 2 points is always stable.
pub fn average_and_trend(kind: MetricKind, series: &[MetricPoint]) -> TrendSummary {
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let average = mean(&values);

    if values.len() < 2 {
        return TrendSummary {
            average,
            change: 0.0,
            trend: Trend::Stable,
        };
    }

    let mid = values.len() / 2;
    let change = mean(&values[mid..]) - mean(&values[..mid]);
    let signed = if kind.higher_is_better() {
        change
    } else {
        -change
    };

    let trend = if signed > TREND_THRESHOLD {
        Trend::Improving
    } else if signed < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    };

    TrendSummary {
        average,
        change,
        trend,
    }
}

/// Canned guidance per (metric, trend). Deterministic: the same pair always
/// yields the same text.
pub fn recommendation(kind: MetricKind, trend: Trend) -> &'static str {
    use MetricKind::*;
    use Trend::*;

    match (kind, trend) {
        (Stress | Anxiety, Improving) => {
            "Your calm is building. Keep the wind-down routine that got you here."
        }
        (Stress | Anxiety, Declining) => {
            "Tension is creeping up. Try a short breathing session before bed this week."
        }
        (Stress | Anxiety, Stable) => {
            "Holding steady. A body-scan session can help you notice tension earlier."
        }
        (Happiness | Gratitude, Improving) => {
            "Your outlook is brightening. Note one thing that contributed each day."
        }
        (Happiness | Gratitude, Declining) => {
            "A dip is normal. Revisit a session or place that lifted you recently."
        }
        (Happiness | Gratitude, Stable) => {
            "Steady baseline. Try a gratitude journal entry after each session."
        }
        (Energy | Focus | Motivation, Improving) => {
            "Momentum is with you. Use it on the task you keep postponing."
        }
        (Energy | Focus | Motivation, Declining) => {
            "Running low lately. Shorter sessions and earlier nights tend to help."
        }
        (Energy | Focus | Motivation, Stable) => {
            "Consistent levels. A morning session can raise your daily ceiling."
        }
        (SelfAwareness | SelfRegulation | Empathy | SocialSkills, Improving) => {
            "Your inner skills are growing. Reflect on a recent interaction that went well."
        }
        (SelfAwareness | SelfRegulation | Empathy | SocialSkills, Declining) => {
            "Slipping slightly. A loving-kindness session reconnects these skills."
        }
        (SelfAwareness | SelfRegulation | Empathy | SocialSkills, Stable) => {
            "Stable footing. Journaling after sessions sharpens self-observation."
        }
    }
}

/// One emotional-intelligence assessment. Sub-scores are clamped to [1, 10];
/// the overall score is their mean. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalMetric {
    pub date: NaiveDate,
    pub self_awareness: f64,
    pub self_regulation: f64,
    pub motivation: f64,
    pub empathy: f64,
    pub social_skills: f64,
}

impl EmotionalMetric {
    pub fn new(
        date: NaiveDate,
        self_awareness: f64,
        self_regulation: f64,
        motivation: f64,
        empathy: f64,
        social_skills: f64,
    ) -> Self {
        let clamp = |v: f64| v.clamp(1.0, 10.0);
        Self {
            date,
            self_awareness: clamp(self_awareness),
            self_regulation: clamp(self_regulation),
            motivation: clamp(motivation),
            empathy: clamp(empathy),
            social_skills: clamp(social_skills),
        }
    }

    pub fn overall_score(&self) -> f64 {
        (self.self_awareness
            + self.self_regulation
            + self.motivation
            + self.empathy
            + self.social_skills)
            / 5.0
    }

    /// The sub-score for an EI dimension; `None` for mood metrics.
    pub fn dimension(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::SelfAwareness => Some(self.self_awareness),
            MetricKind::SelfRegulation => Some(self.self_regulation),
            MetricKind::Motivation => Some(self.motivation),
            MetricKind::Empathy => Some(self.empathy),
            MetricKind::SocialSkills => Some(self.social_skills),
            _ => None,
        }
    }
}

/// Project an assessment history onto one EI dimension for trend analysis.
pub fn ei_series(history: &[EmotionalMetric], kind: MetricKind) -> Vec<MetricPoint> {
    history
        .iter()
        .filter_map(|m| {
            m.dimension(kind).map(|value| MetricPoint {
                date: m.date,
                value,
            })
        })
        .collect()
}
