//! Persistent per-bean grind guidance.
//!
//! A tiny state machine keyed by bean: `absent -> saved -> {followed |
//! superseded | cleared} -> absent`. Every recorded shot produces a
//! fresh save, taste feedback or not, so guidance exists even for users
//! who skip tasting; adding taste later rewrites the advice in place
//! without losing when it was first given or whether it was followed.

use chrono::Utc;

use crate::analysis::config::BrewTuning;
use crate::db::models::{GrindAdjustmentRecommendation, PersistentRecommendation, Shot, TastePrimary};
use crate::db::Database;
use crate::error::CoreResult;
use crate::log_info;

const ENABLE_LOGS: bool = true;

/// Dose attached to every saved recommendation until per-bean dosing
/// exists.
const DEFAULT_DOSE_GRAMS: f64 = 18.0;

pub struct RecommendationStore {
    db: Database,
    tuning: BrewTuning,
}

impl RecommendationStore {
    pub fn new(db: Database, tuning: BrewTuning) -> Self {
        Self { db, tuning }
    }

    /// Persist fresh guidance for a bean, superseding whatever was
    /// there. Called after every recorded shot.
    pub async fn save(
        &self,
        bean_id: &str,
        recommendation: &GrindAdjustmentRecommendation,
        triggering_shot: &Shot,
    ) -> CoreResult<PersistentRecommendation> {
        let record = PersistentRecommendation {
            bean_id: bean_id.to_string(),
            suggested_grind_setting: recommendation.suggested_grind_setting.clone(),
            adjustment_direction: recommendation.adjustment_direction,
            reason: self.build_reason(recommendation, triggering_shot),
            recommended_dose: DEFAULT_DOSE_GRAMS,
            target_time_min: self.tuning.optimal_time_min,
            target_time_max: self.tuning.optimal_time_max,
            timestamp: Utc::now(),
            was_followed: false,
            based_on_taste: recommendation.taste_issue.is_some(),
            confidence: recommendation.confidence,
        };

        self.db.upsert_recommendation(&record).await?;
        log_info!(
            "Saved recommendation for bean {bean_id}: {} -> {}",
            recommendation.current_grind_setting,
            recommendation.suggested_grind_setting
        );
        Ok(record)
    }

    /// Current guidance for a bean; `None` when nothing was saved.
    pub async fn get(&self, bean_id: &str) -> CoreResult<Option<PersistentRecommendation>> {
        self.db.get_recommendation(bean_id).await
    }

    /// Flip `was_followed` on the live record; nothing else changes.
    pub async fn mark_followed(&self, bean_id: &str) -> CoreResult<()> {
        self.db.set_recommendation_followed(bean_id, true).await
    }

    /// Rewrite suggestion, direction, reason, and confidence in place
    /// while keeping the original timestamp and `was_followed`. Used
    /// when taste feedback arrives after the shot was first recorded.
    /// Falls back to `save` when no record exists yet.
    pub async fn update(
        &self,
        bean_id: &str,
        recommendation: &GrindAdjustmentRecommendation,
        updated_shot: &Shot,
    ) -> CoreResult<PersistentRecommendation> {
        let existing = match self.db.get_recommendation(bean_id).await? {
            Some(existing) => existing,
            None => return self.save(bean_id, recommendation, updated_shot).await,
        };

        let record = PersistentRecommendation {
            suggested_grind_setting: recommendation.suggested_grind_setting.clone(),
            adjustment_direction: recommendation.adjustment_direction,
            reason: self.build_reason(recommendation, updated_shot),
            based_on_taste: recommendation.taste_issue.is_some(),
            confidence: recommendation.confidence,
            ..existing
        };

        self.db.upsert_recommendation(&record).await?;
        log_info!("Updated recommendation for bean {bean_id} in place");
        Ok(record)
    }

    pub async fn clear(&self, bean_id: &str) -> CoreResult<()> {
        self.db.delete_recommendation(bean_id).await
    }

    pub async fn clear_all(&self) -> CoreResult<()> {
        self.db.delete_all_recommendations().await
    }

    pub async fn list_bean_ids(&self) -> CoreResult<Vec<String>> {
        self.db.list_recommendation_bean_ids().await
    }

    /// Human-readable justification. Taste wins over timing: "was sour"
    /// says more than "ran fast".
    fn build_reason(
        &self,
        recommendation: &GrindAdjustmentRecommendation,
        shot: &Shot,
    ) -> String {
        match recommendation.taste_issue {
            Some(TastePrimary::Sour) => format!(
                "Shot tasted sour at {}s; a finer grind should slow the pour and build sweetness",
                shot.extraction_time_secs
            ),
            Some(TastePrimary::Bitter) => format!(
                "Shot tasted bitter at {}s; a coarser grind should shorten contact time",
                shot.extraction_time_secs
            ),
            _ => {
                let deviation = recommendation.extraction_time_deviation;
                if deviation < 0 {
                    format!(
                        "Shot ran {}s fast ({}s against a {}-{}s target); grind finer",
                        -deviation,
                        shot.extraction_time_secs,
                        self.tuning.optimal_time_min,
                        self.tuning.optimal_time_max
                    )
                } else if deviation > 0 {
                    format!(
                        "Shot ran {}s slow ({}s against a {}-{}s target); grind coarser",
                        deviation,
                        shot.extraction_time_secs,
                        self.tuning.optimal_time_min,
                        self.tuning.optimal_time_max
                    )
                } else {
                    "Extraction landed in the target window; keep the current setting".to_string()
                }
            }
        }
    }
}
