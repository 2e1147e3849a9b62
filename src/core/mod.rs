// Core algorithm exports
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use matcher::{Matcher, RankError, RankOptions, RankResult, RankingLimits};
pub use scoring::{calculate_match_score, AttributeScores};
pub use similarity::{age_similarity, jaccard, location_similarity, scalar_similarity, NEUTRAL};
