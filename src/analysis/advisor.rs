//! Grind adjustment advice from a single shot's timing and taste.
//!
//! Taste feedback dominates timing: a bitter shot gets a coarser grind
//! even when it ran fast, because taste is the stronger signal. Timing
//! only decides when taste is absent or neutral.

use crate::analysis::config::BrewTuning;
use crate::db::models::{
    AdjustmentDirection, Confidence, GrindAdjustmentRecommendation, TastePrimary,
};
use crate::error::{CoreError, CoreResult};
use crate::settings::GrinderProfile;

/// Produce a one-shot adjustment recommendation.
///
/// Fails with `Validation` when the grind setting is not numeric or the
/// extraction time is negative, and with `Configuration` when no
/// grinder profile is supplied.
pub fn recommend_adjustment(
    current_setting: &str,
    extraction_time_secs: i64,
    taste: Option<TastePrimary>,
    profile: Option<&GrinderProfile>,
    tuning: &BrewTuning,
) -> CoreResult<GrindAdjustmentRecommendation> {
    let current: f64 = current_setting.trim().parse().map_err(|_| {
        CoreError::Validation(format!(
            "grind setting '{current_setting}' is not a number"
        ))
    })?;

    if extraction_time_secs < 0 {
        return Err(CoreError::Validation(format!(
            "extraction time cannot be negative ({extraction_time_secs})"
        )));
    }

    let profile = profile.ok_or_else(|| {
        CoreError::Configuration("no grinder profile configured".to_string())
    })?;

    let deviation = if extraction_time_secs < tuning.optimal_time_min {
        extraction_time_secs - tuning.optimal_time_min
    } else if extraction_time_secs > tuning.optimal_time_max {
        extraction_time_secs - tuning.optimal_time_max
    } else {
        0
    };

    // Sour means under-extracted and bitter over-extracted regardless
    // of what the clock said; Perfect and no feedback defer to timing.
    let taste_issue = taste.filter(|t| matches!(t, TastePrimary::Sour | TastePrimary::Bitter));
    let direction = match taste_issue {
        Some(TastePrimary::Sour) => AdjustmentDirection::Finer,
        Some(TastePrimary::Bitter) => AdjustmentDirection::Coarser,
        _ => match deviation {
            d if d < 0 => AdjustmentDirection::Finer,
            d if d > 0 => AdjustmentDirection::Coarser,
            _ => AdjustmentDirection::NoChange,
        },
    };

    let requested_steps = if direction == AdjustmentDirection::NoChange {
        0
    } else if deviation.abs() <= tuning.one_step_deviation {
        1
    } else if deviation.abs() <= tuning.two_step_deviation {
        2
    } else {
        tuning.max_steps
    };

    let delta = requested_steps as f64 * profile.step_size;
    let candidate = match direction {
        AdjustmentDirection::Finer => current - delta,
        AdjustmentDirection::Coarser => current + delta,
        AdjustmentDirection::NoChange => current,
    };
    let suggested = candidate.clamp(profile.scale_min as f64, profile.scale_max as f64);

    // Report the steps actually achieved; a boundary clamp shrinks the
    // move, possibly to zero.
    let adjustment_steps = ((suggested - current).abs() / profile.step_size).round() as i64;

    let strong_timing = deviation.abs() >= tuning.strong_timing_deviation;
    let has_taste = taste_issue.is_some();
    let confidence = if direction == AdjustmentDirection::NoChange {
        Confidence::High
    } else if strong_timing && has_taste {
        Confidence::High
    } else if strong_timing != has_taste {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    Ok(GrindAdjustmentRecommendation {
        current_grind_setting: profile.fmt_setting(current),
        suggested_grind_setting: profile.fmt_setting(suggested),
        adjustment_direction: direction,
        adjustment_steps,
        extraction_time_deviation: deviation,
        taste_issue,
        confidence,
    })
}
