//! Shot data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary taste feedback for a shot. `Perfect` is treated as neutral by
/// the adjustment advisor; only `Sour` and `Bitter` drive a direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TastePrimary {
    Sour,
    Perfect,
    Bitter,
}

impl TastePrimary {
    pub fn as_str(&self) -> &'static str {
        match self {
            TastePrimary::Sour => "Sour",
            TastePrimary::Perfect => "Perfect",
            TastePrimary::Bitter => "Bitter",
        }
    }
}

/// Secondary taste feedback; informational only, never scored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TasteSecondary {
    Weak,
    Strong,
}

impl TasteSecondary {
    pub fn as_str(&self) -> &'static str {
        match self {
            TasteSecondary::Weak => "Weak",
            TasteSecondary::Strong => "Strong",
        }
    }
}

/// A recorded espresso shot.
///
/// `bean_id` is a plain reference, not an owned relationship: the bean
/// row may be deleted while its shots remain, and readers report that
/// case explicitly instead of assuming integrity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    pub id: String,
    pub bean_id: String,
    pub weight_in_grams: f64,
    pub weight_out_grams: f64,
    pub extraction_time_secs: i64,
    pub grinder_setting: String,
    pub taste_primary: Option<TastePrimary>,
    pub taste_secondary: Option<TasteSecondary>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shot {
    /// Brew ratio: weight out over weight in. Weights are validated >0
    /// at the recording boundary.
    pub fn brew_ratio(&self) -> f64 {
        self.weight_out_grams / self.weight_in_grams
    }
}

/// Input data for recording a shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotInput {
    pub bean_id: String,
    pub weight_in_grams: f64,
    pub weight_out_grams: f64,
    pub extraction_time_secs: i64,
    pub grinder_setting: String,
    pub taste_primary: Option<TastePrimary>,
    pub taste_secondary: Option<TasteSecondary>,
    pub notes: Option<String>,
}
