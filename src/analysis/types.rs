//! Ephemeral analysis result types. None of these are persisted; they
//! are recomputed from shot snapshots on demand.

use serde::{Deserialize, Serialize};

use crate::db::models::{Bean, Shot};

/// Coarse quality bucket derived from score thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum QualityTier {
    Excellent,
    Good,
    NeedsWork,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// The 0-100 composite quality score with its component breakdown and
/// the bean-average deviations it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShotScore {
    pub total: i64,
    pub extraction_time_points: i64,
    pub brew_ratio_points: i64,
    pub taste_points: i64,
    pub consistency_points: i64,
    pub deviation_bonus: i64,
    /// Shot brew ratio minus the bean-average ratio.
    pub ratio_deviation: f64,
    /// Shot extraction time minus the bean-average time, seconds.
    pub time_deviation: f64,
    pub consistent: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationKind {
    GrindFiner,
    GrindCoarser,
    IncreaseYield,
    DecreaseYield,
    RatioInconsistency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

/// A human-readable pointer generated for the detail view. Informational
/// only; the grinder advisor is the authority for actual adjustments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewRecommendation {
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    pub message: String,
    pub target_min: f64,
    pub target_max: f64,
}

/// Full per-shot quality readout: score breakdown plus generated
/// recommendations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShotAnalysis {
    pub score: ShotScore,
    pub recommendations: Vec<BrewRecommendation>,
}

/// Distribution, trend, and consistency statistics over a shot list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateQualityAnalysis {
    pub total_shots: usize,
    /// Headline metric shown to the user; equals `recent_average`.
    pub overall_quality_score: i64,
    pub tier: QualityTier,
    pub excellent_count: usize,
    pub good_count: usize,
    pub needs_work_count: usize,
    pub trend_direction: TrendDirection,
    pub recent_average: i64,
    pub overall_average: i64,
    /// Percent change of the recent average over the overall average.
    pub improvement_rate: f64,
    pub consistency_score: i64,
}

/// Everything the shot detail screen needs in one composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotDetailReport {
    pub shot: Shot,
    pub bean: Bean,
    pub days_since_roast: Option<i64>,
    pub previous_shot: Option<Shot>,
    pub next_shot: Option<Shot>,
    pub analysis: ShotAnalysis,
    pub related_shot_count: usize,
    /// 1-based quality rank among the bean's shots; only reported once
    /// the bean has more than `ranking_min_shots` recorded shots.
    pub quality_rank: Option<usize>,
    pub is_personal_best: bool,
}

/// A notable achievement detected over a bean's shot history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Milestone {
    /// First shot to hit the full 100.
    PerfectShot { shot_id: String },
    /// A run of consecutive good-or-better shots reached this length.
    GoodStreak { shot_id: String, length: usize },
    /// The latest shot beat every score before it.
    NewPersonalBest { shot_id: String, score: i64 },
}
