//! Per-shot detail report: the shot in context of its bean's history,
//! with neighbors, ranking, and human-readable recommendations.

use chrono::Utc;

use crate::analysis::config::BrewTuning;
use crate::analysis::scorer::score_shot;
use crate::analysis::types::{
    BrewRecommendation, RecommendationKind, RecommendationPriority, ShotAnalysis,
    ShotDetailReport, ShotScore,
};
use crate::db::models::Shot;
use crate::db::Database;
use crate::error::{CoreError, CoreResult};

/// Compose the full detail report for one shot. Repository failures
/// pass through unmodified; the only failures minted here are the
/// not-found kinds for the shot and its bean.
pub async fn analyze_shot_detail(
    db: &Database,
    shot_id: &str,
    tuning: &BrewTuning,
) -> CoreResult<ShotDetailReport> {
    let shot = db.get_shot(shot_id).await?;

    // The shot exists but its bean may not; report that as its own
    // failure kind rather than a generic not-found.
    let bean = db
        .find_bean(&shot.bean_id)
        .await?
        .ok_or_else(|| CoreError::AssociatedBeanMissing {
            shot_id: shot.id.clone(),
            bean_id: shot.bean_id.clone(),
        })?;

    let bean_shots = db.list_shots_for_bean(&shot.bean_id).await?;
    let (previous_shot, next_shot) = db.adjacent_shots(&shot).await?;

    let score = score_shot(&shot, &bean_shots, tuning);
    let recommendations = build_recommendations(&shot, &score, tuning);

    let (quality_rank, is_personal_best) = rank_among(&shot, &bean_shots, tuning);

    Ok(ShotDetailReport {
        days_since_roast: bean.days_since_roast(Utc::now()),
        related_shot_count: bean_shots.len(),
        previous_shot,
        next_shot,
        analysis: ShotAnalysis {
            score,
            recommendations,
        },
        quality_rank,
        is_personal_best,
        shot,
        bean,
    })
}

/// 1-based quality rank among the bean's shots, reported only once the
/// bean has more than `ranking_min_shots` recorded shots. Ties keep
/// chronological order via the stable sort.
fn rank_among(shot: &Shot, bean_shots: &[Shot], tuning: &BrewTuning) -> (Option<usize>, bool) {
    if bean_shots.len() <= tuning.ranking_min_shots {
        return (None, false);
    }

    // One score per shot, then a stable sort by score descending.
    let mut scored: Vec<(&Shot, i64)> = bean_shots
        .iter()
        .map(|s| (s, score_shot(s, bean_shots, tuning).total))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let rank = scored
        .iter()
        .position(|(s, _)| s.id == shot.id)
        .map(|idx| idx + 1);

    let is_personal_best = rank == Some(1);
    (rank, is_personal_best)
}

/// Informational recommendations for the detail view, independent of
/// the grinder advisor.
pub fn build_recommendations(
    shot: &Shot,
    score: &ShotScore,
    tuning: &BrewTuning,
) -> Vec<BrewRecommendation> {
    let mut recommendations = Vec::new();

    let time = shot.extraction_time_secs;
    if time < tuning.optimal_time_min {
        let deficit = tuning.optimal_time_min - time;
        recommendations.push(BrewRecommendation {
            kind: RecommendationKind::GrindFiner,
            priority: timing_priority(deficit, tuning),
            message: format!(
                "Extraction ran {deficit}s fast at {time}s; grind finer to slow the pour"
            ),
            target_min: tuning.optimal_time_min as f64,
            target_max: tuning.optimal_time_max as f64,
        });
    } else if time > tuning.optimal_time_max {
        let excess = time - tuning.optimal_time_max;
        recommendations.push(BrewRecommendation {
            kind: RecommendationKind::GrindCoarser,
            priority: timing_priority(excess, tuning),
            message: format!(
                "Extraction ran {excess}s slow at {time}s; grind coarser to speed it up"
            ),
            target_min: tuning.optimal_time_min as f64,
            target_max: tuning.optimal_time_max as f64,
        });
    }

    let ratio = shot.brew_ratio();
    if ratio < tuning.optimal_ratio_min {
        recommendations.push(BrewRecommendation {
            kind: RecommendationKind::IncreaseYield,
            priority: RecommendationPriority::Medium,
            message: format!(
                "Brew ratio {ratio:.2} is below the typical range; let more coffee through"
            ),
            target_min: tuning.optimal_ratio_min,
            target_max: tuning.optimal_ratio_max,
        });
    } else if ratio > tuning.optimal_ratio_max {
        recommendations.push(BrewRecommendation {
            kind: RecommendationKind::DecreaseYield,
            priority: RecommendationPriority::Medium,
            message: format!(
                "Brew ratio {ratio:.2} is above the typical range; cut the shot earlier"
            ),
            target_min: tuning.optimal_ratio_min,
            target_max: tuning.optimal_ratio_max,
        });
    }

    if score.ratio_deviation.abs() > tuning.ratio_inconsistency_band {
        let average = ratio - score.ratio_deviation;
        recommendations.push(BrewRecommendation {
            kind: RecommendationKind::RatioInconsistency,
            priority: RecommendationPriority::Low,
            message: format!(
                "Brew ratio {ratio:.2} drifted from this bean's average of {average:.2}; check your dose and yield"
            ),
            target_min: average - tuning.ratio_inconsistency_band,
            target_max: average + tuning.ratio_inconsistency_band,
        });
    }

    recommendations
}

fn timing_priority(distance: i64, tuning: &BrewTuning) -> RecommendationPriority {
    if distance > tuning.strong_timing_deviation {
        RecommendationPriority::High
    } else {
        RecommendationPriority::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::shot;
    use crate::db::models::TastePrimary;

    #[test]
    fn dialed_in_shot_generates_no_recommendations() {
        let tuning = BrewTuning::default();
        let s = shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), 0);
        let score = score_shot(&s, std::slice::from_ref(&s), &tuning);

        assert!(build_recommendations(&s, &score, &tuning).is_empty());
    }

    #[test]
    fn fast_low_yield_shot_gets_both_pointers() {
        let tuning = BrewTuning::default();
        let s = shot("bean-a", 18.0, 24.0, 19, None, 0);
        let score = score_shot(&s, std::slice::from_ref(&s), &tuning);

        let recommendations = build_recommendations(&s, &score, &tuning);
        let kinds: Vec<_> = recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::GrindFiner,
                RecommendationKind::IncreaseYield
            ]
        );
        // 6s off the window is well past the strong-evidence threshold.
        assert_eq!(recommendations[0].priority, RecommendationPriority::High);
        assert_eq!(recommendations[0].target_min, 25.0);
        assert_eq!(recommendations[0].target_max, 30.0);
    }

    #[test]
    fn ratio_drift_from_bean_average_is_flagged() {
        let tuning = BrewTuning::default();
        // This shot pulled 2.8 against a bean that usually lands 2.0.
        let s = shot("bean-a", 18.0, 50.4, 28, None, 3);
        let history = vec![
            shot("bean-a", 18.0, 36.0, 28, None, 0),
            shot("bean-a", 18.0, 36.0, 28, None, 1),
            shot("bean-a", 18.0, 36.0, 28, None, 2),
        ];

        let score = score_shot(&s, &history, &tuning);
        let recommendations = build_recommendations(&s, &score, &tuning);
        assert!(recommendations
            .iter()
            .any(|r| r.kind == RecommendationKind::RatioInconsistency
                && r.priority == RecommendationPriority::Low));
    }

    #[test]
    fn slightly_slow_shot_is_medium_priority() {
        let tuning = BrewTuning::default();
        let s = shot("bean-a", 18.0, 36.0, 32, None, 0);
        let score = score_shot(&s, std::slice::from_ref(&s), &tuning);

        let recommendations = build_recommendations(&s, &score, &tuning);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].kind, RecommendationKind::GrindCoarser);
        assert_eq!(recommendations[0].priority, RecommendationPriority::Medium);
    }
}
