pub mod advisor;
pub mod aggregate;
pub mod config;
pub mod detail;
pub mod milestones;
pub mod scorer;
pub mod types;

pub use advisor::recommend_adjustment;
pub use aggregate::{analyze_shots, tier_for_score};
pub use config::BrewTuning;
pub use detail::analyze_shot_detail;
pub use milestones::detect_milestones;
pub use scorer::score_shot;
pub use types::{
    AggregateQualityAnalysis, BrewRecommendation, Milestone, QualityTier, RecommendationKind,
    RecommendationPriority, ShotAnalysis, ShotDetailReport, ShotScore, TrendDirection,
};
