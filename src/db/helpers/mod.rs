use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};

use crate::db::models::{AdjustmentDirection, Confidence, TastePrimary, TasteSecondary};
use crate::error::{CoreError, CoreResult};

pub fn parse_datetime(value: &str, field: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| CoreError::Unknown(anyhow!("invalid {field} '{value}': {err}")))
}

pub fn parse_optional_date(value: Option<String>, field: &str) -> CoreResult<Option<NaiveDate>> {
    match value {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|err| CoreError::Unknown(anyhow!("invalid {field} '{raw}': {err}"))),
        None => Ok(None),
    }
}

pub fn parse_taste_primary(value: Option<String>) -> CoreResult<Option<TastePrimary>> {
    match value.as_deref() {
        None => Ok(None),
        Some("Sour") => Ok(Some(TastePrimary::Sour)),
        Some("Perfect") => Ok(Some(TastePrimary::Perfect)),
        Some("Bitter") => Ok(Some(TastePrimary::Bitter)),
        Some(other) => Err(CoreError::Unknown(anyhow!(
            "unknown primary taste '{other}'"
        ))),
    }
}

pub fn parse_taste_secondary(value: Option<String>) -> CoreResult<Option<TasteSecondary>> {
    match value.as_deref() {
        None => Ok(None),
        Some("Weak") => Ok(Some(TasteSecondary::Weak)),
        Some("Strong") => Ok(Some(TasteSecondary::Strong)),
        Some(other) => Err(CoreError::Unknown(anyhow!(
            "unknown secondary taste '{other}'"
        ))),
    }
}

pub fn parse_direction(value: &str) -> CoreResult<AdjustmentDirection> {
    match value {
        "Finer" => Ok(AdjustmentDirection::Finer),
        "Coarser" => Ok(AdjustmentDirection::Coarser),
        "NoChange" => Ok(AdjustmentDirection::NoChange),
        other => Err(CoreError::Unknown(anyhow!(
            "unknown adjustment direction '{other}'"
        ))),
    }
}

pub fn parse_confidence(value: &str) -> CoreResult<Confidence> {
    match value {
        "High" => Ok(Confidence::High),
        "Medium" => Ok(Confidence::Medium),
        "Low" => Ok(Confidence::Low),
        other => Err(CoreError::Unknown(anyhow!("unknown confidence '{other}'"))),
    }
}
