//! Shot quality scoring: five independently capped, additive
//! components summing to a 0-100 score.
//!
//! This is the only place quality is computed. Rankings, trends, tiers,
//! and detail views all call through [`score_shot`] so every screen
//! agrees on the numbers.

use crate::analysis::config::BrewTuning;
use crate::analysis::types::ShotScore;
use crate::db::models::{Shot, TastePrimary};

const TIME_POINTS_OPTIMAL: i64 = 25;
const TIME_POINTS_ACCEPTABLE: i64 = 15;
const TIME_POINTS_OFF: i64 = 5;

const RATIO_POINTS_OPTIMAL: i64 = 20;
const RATIO_POINTS_ACCEPTABLE: i64 = 12;
const RATIO_POINTS_OFF: i64 = 4;

const TASTE_POINTS_PERFECT: i64 = 30;
const TASTE_POINTS_INFORMATIVE: i64 = 10;
const TASTE_POINTS_NEUTRAL: i64 = 15;

const CONSISTENCY_POINTS_STEADY: i64 = 15;
const CONSISTENCY_POINTS_DRIFTING: i64 = 5;

const BONUS_PER_METRIC: i64 = 5;

/// Score one shot against a comparison set. The set is used only for
/// bean-scoped averages; it may or may not contain the shot itself.
/// Pure and deterministic, no failure path: shots are well-formed by
/// the time they reach this layer.
pub fn score_shot(shot: &Shot, comparison: &[Shot], tuning: &BrewTuning) -> ShotScore {
    let time = shot.extraction_time_secs;
    let ratio = shot.brew_ratio();

    let extraction_time_points = if time >= tuning.optimal_time_min && time <= tuning.optimal_time_max
    {
        TIME_POINTS_OPTIMAL
    } else if time >= tuning.acceptable_time_min && time <= tuning.acceptable_time_max {
        TIME_POINTS_ACCEPTABLE
    } else {
        TIME_POINTS_OFF
    };

    let brew_ratio_points = if ratio >= tuning.optimal_ratio_min && ratio <= tuning.optimal_ratio_max
    {
        RATIO_POINTS_OPTIMAL
    } else if ratio >= tuning.acceptable_ratio_min && ratio <= tuning.acceptable_ratio_max {
        RATIO_POINTS_ACCEPTABLE
    } else {
        RATIO_POINTS_OFF
    };

    // Absence of feedback sits between perfect and an off taste; not
    // tasting is never penalized below an informative sour/bitter.
    let taste_points = match shot.taste_primary {
        Some(TastePrimary::Perfect) => TASTE_POINTS_PERFECT,
        Some(TastePrimary::Sour) | Some(TastePrimary::Bitter) => TASTE_POINTS_INFORMATIVE,
        None => TASTE_POINTS_NEUTRAL,
    };

    let (avg_ratio, avg_time) = bean_averages(shot, comparison);
    let ratio_deviation = ratio - avg_ratio;
    let time_deviation = time as f64 - avg_time;

    let consistent = ratio_deviation.abs() < tuning.consistency_ratio_band
        && time_deviation.abs() < tuning.consistency_time_band;
    let consistency_points = if consistent {
        CONSISTENCY_POINTS_STEADY
    } else {
        CONSISTENCY_POINTS_DRIFTING
    };

    let mut deviation_bonus = 0;
    if ratio_deviation.abs() < tuning.bonus_ratio_band {
        deviation_bonus += BONUS_PER_METRIC;
    }
    if time_deviation.abs() < tuning.bonus_time_band {
        deviation_bonus += BONUS_PER_METRIC;
    }

    let sum = extraction_time_points
        + brew_ratio_points
        + taste_points
        + consistency_points
        + deviation_bonus;

    ShotScore {
        total: sum.clamp(0, 100),
        extraction_time_points,
        brew_ratio_points,
        taste_points,
        consistency_points,
        deviation_bonus,
        ratio_deviation,
        time_deviation,
        consistent,
    }
}

/// Average brew ratio and extraction time over comparison shots sharing
/// the shot's bean. Falls back to the shot's own values when the set
/// has nothing for that bean, which zeroes the deviations.
fn bean_averages(shot: &Shot, comparison: &[Shot]) -> (f64, f64) {
    let related: Vec<&Shot> = comparison
        .iter()
        .filter(|s| s.bean_id == shot.bean_id)
        .collect();

    if related.is_empty() {
        return (shot.brew_ratio(), shot.extraction_time_secs as f64);
    }

    let count = related.len() as f64;
    let avg_ratio = related.iter().map(|s| s.brew_ratio()).sum::<f64>() / count;
    let avg_time = related
        .iter()
        .map(|s| s.extraction_time_secs as f64)
        .sum::<f64>()
        / count;

    (avg_ratio, avg_time)
}
