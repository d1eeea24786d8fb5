//! Grind recommendation data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::TastePrimary;

/// Which way to move the grinder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentDirection {
    Finer,
    Coarser,
    NoChange,
}

impl AdjustmentDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentDirection::Finer => "Finer",
            AdjustmentDirection::Coarser => "Coarser",
            AdjustmentDirection::NoChange => "NoChange",
        }
    }
}

/// Qualitative certainty attached to a recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

/// One-shot output of the adjustment advisor. Ephemeral: one call, one
/// value; persisting it is the recommendation store's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrindAdjustmentRecommendation {
    pub current_grind_setting: String,
    pub suggested_grind_setting: String,
    pub adjustment_direction: AdjustmentDirection,
    /// Steps actually achievable after clamping to the grinder scale,
    /// which may be fewer than the deviation asked for.
    pub adjustment_steps: i64,
    /// Signed seconds outside the optimal extraction window; 0 inside.
    pub extraction_time_deviation: i64,
    /// The taste that drove the decision, if any.
    pub taste_issue: Option<TastePrimary>,
    pub confidence: Confidence,
}

/// The per-bean record kept across sessions. Exactly one live record per
/// bean; each save supersedes the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistentRecommendation {
    pub bean_id: String,
    pub suggested_grind_setting: String,
    pub adjustment_direction: AdjustmentDirection,
    pub reason: String,
    pub recommended_dose: f64,
    pub target_time_min: i64,
    pub target_time_max: i64,
    pub timestamp: DateTime<Utc>,
    pub was_followed: bool,
    pub based_on_taste: bool,
    pub confidence: Confidence,
}
