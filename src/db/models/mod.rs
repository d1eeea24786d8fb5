pub mod bean;
pub mod recommendation;
pub mod shot;

pub use bean::{Bean, BeanInput};
pub use recommendation::{
    AdjustmentDirection, Confidence, GrindAdjustmentRecommendation, PersistentRecommendation,
};
pub use shot::{Shot, ShotInput, TastePrimary, TasteSecondary};
