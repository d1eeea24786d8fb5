//! User settings persisted as pretty-printed JSON next to the database.
//! Currently that is just the grinder profile; the store reads the file
//! once and keeps it behind a lock for cheap access.

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::error::{CoreError, CoreResult};

/// The user's grinder: its scale endpoints and the smallest adjustment
/// increment it supports. Any suggested setting must land on
/// `scale_min + k * step_size` inside `[scale_min, scale_max]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrinderProfile {
    pub scale_min: i64,
    pub scale_max: i64,
    pub step_size: f64,
}

impl GrinderProfile {
    pub fn validate(&self) -> CoreResult<()> {
        if self.scale_min >= self.scale_max {
            return Err(CoreError::Validation(format!(
                "grinder scale min ({}) must be below max ({})",
                self.scale_min, self.scale_max
            )));
        }
        let range = (self.scale_max - self.scale_min) as f64;
        if self.step_size <= 0.0 || self.step_size > range {
            return Err(CoreError::Validation(format!(
                "grinder step size ({}) must be positive and within the scale range ({range})",
                self.step_size
            )));
        }
        Ok(())
    }

    /// Render a setting with the precision the step size implies, so
    /// current and suggested values are visually comparable.
    pub fn fmt_setting(&self, value: f64) -> String {
        if self.step_size >= 1.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.1}")
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UserSettings {
    grinder_profile: Option<GrinderProfile>,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> CoreResult<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))
                .map_err(CoreError::Unknown)?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// The configured grinder profile, or `None` when the user has not
    /// set one up yet.
    pub fn grinder_profile(&self) -> Option<GrinderProfile> {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .grinder_profile
            .clone()
    }

    pub fn update_grinder_profile(&self, profile: GrinderProfile) -> CoreResult<()> {
        profile.validate()?;
        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.grinder_profile = Some(profile);
        self.persist(&guard)?;
        Ok(())
    }

    pub fn clear_grinder_profile(&self) -> CoreResult<()> {
        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.grinder_profile = None;
        self.persist(&guard)?;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> CoreResult<()> {
        let serialized = serde_json::to_string_pretty(data)
            .map_err(|err| CoreError::Unknown(anyhow!("failed to serialize settings: {err}")))?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
            .map_err(CoreError::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> GrinderProfile {
        GrinderProfile {
            scale_min: 10,
            scale_max: 20,
            step_size: 0.5,
        }
    }

    #[test]
    fn validate_rejects_inverted_scale() {
        let bad = GrinderProfile {
            scale_min: 20,
            scale_max: 10,
            step_size: 0.5,
        };
        assert!(matches!(bad.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn validate_rejects_oversized_step() {
        let bad = GrinderProfile {
            scale_min: 0,
            scale_max: 5,
            step_size: 6.0,
        };
        assert!(matches!(bad.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn fmt_setting_tracks_step_precision() {
        assert_eq!(profile().fmt_setting(14.5), "14.5");

        let whole_steps = GrinderProfile {
            scale_min: 1,
            scale_max: 40,
            step_size: 1.0,
        };
        assert_eq!(whole_steps.fmt_setting(14.0), "14");
    }

    #[test]
    fn profile_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        assert!(store.grinder_profile().is_none());
        store.update_grinder_profile(profile()).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.grinder_profile(), Some(profile()));
    }
}
