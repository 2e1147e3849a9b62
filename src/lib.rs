//! Kindred Match - profile compatibility scoring for the Kindred matchmaking platform
//!
//! This library provides the compatibility scorer used to compare two member
//! profiles, a ranker that scores one profile against many candidates, and
//! the HTTP service that resolves profiles and exposes both.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, Matcher, RankOptions};
pub use crate::models::{CatalogId, CatalogRef, CompatibilityScore, Profile, ScoringWeights};
pub use crate::services::{InMemoryProfileRepository, ProfileRepository};
