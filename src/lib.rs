//! dialin: espresso shot tracking and dial-in coaching engine.
//!
//! The interesting part lives in [`analysis`]: a pure scoring and
//! recommendation core that turns raw brew measurements (weights,
//! extraction time, taste feedback) into a 0-100 quality score, trend
//! and consistency statistics, and a bounded grind adjustment. Around
//! it sit the SQLite-backed shot/bean repositories ([`db`]), the
//! per-bean persistent recommendation store ([`recommendations`]), and
//! the JSON settings file holding the grinder profile ([`settings`]).
//!
//! Everything is single-user and local-first: scoring is pure over
//! point-in-time snapshots, persistence is last-write-wins, and live
//! updates arrive as a passive broadcast subscription
//! ([`db::Database::subscribe_shots`]).

pub mod analysis;
pub mod db;
pub mod error;
pub mod recommendations;
pub mod settings;
pub mod utils;

pub use analysis::{
    analyze_shot_detail, analyze_shots, detect_milestones, recommend_adjustment, score_shot,
    AggregateQualityAnalysis, BrewRecommendation, BrewTuning, Milestone, QualityTier,
    RecommendationKind, RecommendationPriority, ShotAnalysis, ShotDetailReport, ShotScore,
    TrendDirection,
};
pub use db::models::{
    AdjustmentDirection, Bean, BeanInput, Confidence, GrindAdjustmentRecommendation,
    PersistentRecommendation, Shot, ShotInput, TastePrimary, TasteSecondary,
};
pub use db::{Database, ShotEvent, ShotEventKind};
pub use error::{CoreError, CoreResult};
pub use recommendations::RecommendationStore;
pub use settings::{GrinderProfile, SettingsStore};
pub use utils::logging::init_logging;
