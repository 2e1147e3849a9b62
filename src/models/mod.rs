// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Attribute, Breakdown, CatalogId, CatalogRef, CompatibilityScore, Profile, ProfileSummary,
    RankedMatch, ScoringWeights,
};
pub use requests::{RankCandidatesRequest, ScorePairPath};
pub use responses::{ErrorResponse, HealthResponse, MatchScoreResponse, RankCandidatesResponse};
