//! Trend, distribution, and consistency statistics over a shot list.

use crate::analysis::config::BrewTuning;
use crate::analysis::scorer::score_shot;
use crate::analysis::types::{AggregateQualityAnalysis, QualityTier, TrendDirection};
use crate::db::models::Shot;

pub fn tier_for_score(score: i64, tuning: &BrewTuning) -> QualityTier {
    if score >= tuning.tier_excellent {
        QualityTier::Excellent
    } else if score >= tuning.tier_good {
        QualityTier::Good
    } else {
        QualityTier::NeedsWork
    }
}

/// Analyze `targets`, scoring each against `context` (a possibly larger
/// set used for bean-scoped averaging). An empty target list returns a
/// neutral result instead of failing.
pub fn analyze_shots(
    targets: &[Shot],
    context: &[Shot],
    tuning: &BrewTuning,
) -> AggregateQualityAnalysis {
    if targets.is_empty() {
        return AggregateQualityAnalysis {
            total_shots: 0,
            overall_quality_score: 0,
            tier: QualityTier::NeedsWork,
            excellent_count: 0,
            good_count: 0,
            needs_work_count: 0,
            trend_direction: TrendDirection::Stable,
            recent_average: 0,
            overall_average: 0,
            improvement_rate: 0.0,
            consistency_score: 0,
        };
    }

    // Score every shot exactly once; everything below reads this list.
    let mut scored: Vec<(&Shot, i64)> = targets
        .iter()
        .map(|shot| (shot, score_shot(shot, context, tuning).total))
        .collect();

    let mut excellent_count = 0;
    let mut good_count = 0;
    let mut needs_work_count = 0;
    for (_, score) in &scored {
        match tier_for_score(*score, tuning) {
            QualityTier::Excellent => excellent_count += 1,
            QualityTier::Good => good_count += 1,
            QualityTier::NeedsWork => needs_work_count += 1,
        }
    }

    let total: i64 = scored.iter().map(|(_, score)| score).sum();
    let overall_average = total / scored.len() as i64;

    scored.sort_by(|a, b| b.0.timestamp.cmp(&a.0.timestamp));
    let recent: Vec<i64> = scored
        .iter()
        .take(tuning.recent_window)
        .map(|(_, score)| *score)
        .collect();
    let recent_average = recent.iter().sum::<i64>() / recent.len() as i64;

    let trend_direction = if recent_average > overall_average + tuning.trend_margin {
        TrendDirection::Improving
    } else if recent_average < overall_average - tuning.trend_margin {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    let improvement_rate = if overall_average == 0 {
        0.0
    } else {
        (recent_average - overall_average) as f64 / overall_average as f64 * 100.0
    };

    // Population standard deviation relative to the mean. The raw
    // formula can go negative under large variance; the clamp is part
    // of the contract, not a fix-up.
    let consistency_score = if overall_average == 0 {
        0
    } else {
        let exact_mean = total as f64 / scored.len() as f64;
        let variance = scored
            .iter()
            .map(|(_, score)| {
                let diff = *score as f64 - exact_mean;
                diff * diff
            })
            .sum::<f64>()
            / scored.len() as f64;
        let stddev = variance.sqrt();
        (100.0 - stddev / overall_average as f64 * 100.0)
            .clamp(0.0, 100.0)
            .round() as i64
    };

    AggregateQualityAnalysis {
        total_shots: scored.len(),
        overall_quality_score: recent_average,
        tier: tier_for_score(recent_average, tuning),
        excellent_count,
        good_count,
        needs_work_count,
        trend_direction,
        recent_average,
        overall_average,
        improvement_rate,
        consistency_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::shot;
    use crate::db::models::TastePrimary;

    #[test]
    fn empty_input_yields_neutral_result() {
        let analysis = analyze_shots(&[], &[], &BrewTuning::default());

        assert_eq!(analysis.total_shots, 0);
        assert_eq!(analysis.overall_quality_score, 0);
        assert_eq!(analysis.tier, QualityTier::NeedsWork);
        assert_eq!(analysis.trend_direction, TrendDirection::Stable);
        assert_eq!(analysis.improvement_rate, 0.0);
        assert_eq!(analysis.consistency_score, 0);
    }

    #[test]
    fn improving_history_reports_improving_trend() {
        let tuning = BrewTuning::default();
        let mut shots = Vec::new();
        // First five: sour shots off the window, later five: dialed in.
        for i in 0..5 {
            shots.push(shot("bean-a", 18.0, 36.0, 22, Some(TastePrimary::Sour), i));
        }
        for i in 5..10 {
            shots.push(shot(
                "bean-a",
                18.0,
                36.0,
                28,
                Some(TastePrimary::Perfect),
                i,
            ));
        }

        let analysis = analyze_shots(&shots, &shots, &tuning);

        assert_eq!(analysis.total_shots, 10);
        assert_eq!(analysis.trend_direction, TrendDirection::Improving);
        assert!(analysis.recent_average > analysis.overall_average);
        assert!(analysis.improvement_rate > 0.0);
        assert_eq!(analysis.overall_quality_score, analysis.recent_average);
    }

    #[test]
    fn tier_comes_from_recent_average_not_overall() {
        let tuning = BrewTuning::default();
        let mut shots = Vec::new();
        // A poor opening stretch followed by five dialed-in shots: the
        // headline tier reflects the recent window.
        for i in 0..3 {
            shots.push(shot("bean-a", 18.0, 36.0, 40, Some(TastePrimary::Bitter), i));
        }
        for i in 3..8 {
            shots.push(shot(
                "bean-a",
                18.0,
                36.0,
                28,
                Some(TastePrimary::Perfect),
                i,
            ));
        }

        let analysis = analyze_shots(&shots, &shots, &tuning);
        assert!(analysis.recent_average >= tuning.tier_excellent);
        assert_eq!(analysis.tier, QualityTier::Excellent);
        assert!(analysis.overall_average < tuning.tier_excellent);
    }

    #[test]
    fn recent_window_handles_fewer_than_five_shots() {
        let tuning = BrewTuning::default();
        let shots = vec![
            shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), 0),
            shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), 1),
        ];

        let analysis = analyze_shots(&shots, &shots, &tuning);
        assert_eq!(analysis.recent_average, analysis.overall_average);
        assert_eq!(analysis.trend_direction, TrendDirection::Stable);
    }

    #[test]
    fn identical_shots_score_full_consistency() {
        let tuning = BrewTuning::default();
        let shots: Vec<_> = (0..6)
            .map(|i| shot("bean-a", 18.0, 36.0, 28, Some(TastePrimary::Perfect), i))
            .collect();

        let analysis = analyze_shots(&shots, &shots, &tuning);
        assert_eq!(analysis.consistency_score, 100);
        assert_eq!(analysis.excellent_count, 6);
    }

    #[test]
    fn consistency_spread_is_measured_around_the_exact_mean() {
        let tuning = BrewTuning::default();
        // One shot per bean, so every score stands on its own numbers:
        // two at 52 and one at 57. Their exact mean is 53.667 while the
        // reported integer average truncates to 53. stddev around the
        // exact mean is 2.357, giving round(100 - 2.357 / 53 * 100) = 96;
        // centering on the truncated 53 would give 95 instead.
        let shots = vec![
            shot("bean-a", 18.0, 25.2, 45, Some(TastePrimary::Sour), 0),
            shot("bean-b", 18.0, 25.2, 45, Some(TastePrimary::Sour), 1),
            shot("bean-c", 18.0, 25.2, 45, None, 2),
        ];

        let analysis = analyze_shots(&shots, &shots, &tuning);
        assert_eq!(analysis.overall_average, 53);
        assert_eq!(analysis.consistency_score, 96);
    }

    #[test]
    fn consistency_score_stays_in_bounds_under_large_variance() {
        let tuning = BrewTuning::default();
        let mut shots = Vec::new();
        // Alternate dialed-in and disastrous shots to blow up stddev
        // relative to the mean.
        for i in 0..12 {
            if i % 2 == 0 {
                shots.push(shot(
                    "bean-a",
                    18.0,
                    36.0,
                    28,
                    Some(TastePrimary::Perfect),
                    i,
                ));
            } else {
                shots.push(shot("bean-a", 18.0, 20.0, 55, Some(TastePrimary::Bitter), i));
            }
        }

        let analysis = analyze_shots(&shots, &shots, &tuning);
        assert!(analysis.consistency_score >= 0);
        assert!(analysis.consistency_score <= 100);
    }
}
