use crate::core::scoring::calculate_match_score;
use crate::models::{CompatibilityScore, Profile, RankedMatch, ScoringWeights};
use chrono::{NaiveDate, Utc};
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

/// Default number of candidates scored per blocking task
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// Errors raised while ranking candidates in parallel
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Scoring worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Options controlling a ranking run
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub limit: usize,
    pub min_score: Option<u8>,
    pub chunk_size: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            min_score: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Limits applied to incoming ranking requests
#[derive(Debug, Clone, Copy)]
pub struct RankingLimits {
    pub default_limit: usize,
    pub max_limit: usize,
    pub max_candidates: usize,
    pub chunk_size: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            max_candidates: 500,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Result of ranking candidates against one profile
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
}

/// Compatibility scorer holding the weight table
///
/// Stateless apart from the weights, so it is cheap to clone into worker
/// tasks and safe to call from any number of threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::DEFAULT,
        }
    }

    /// Score two profiles with ages taken on today's UTC date
    pub fn score(&self, a: &Profile, b: &Profile) -> CompatibilityScore {
        self.score_on(a, b, Utc::now().date_naive())
    }

    /// Score two profiles with ages taken on `today`
    pub fn score_on(&self, a: &Profile, b: &Profile, today: NaiveDate) -> CompatibilityScore {
        calculate_match_score(a, b, today, &self.weights)
    }

    /// Rank candidates against `subject`, best first
    ///
    /// The subject is never ranked against itself. Ties are ordered by
    /// candidate id so the output is stable.
    pub fn rank(
        &self,
        subject: &Profile,
        candidates: &[Profile],
        options: &RankOptions,
        today: NaiveDate,
    ) -> RankResult {
        let matches = self.score_candidates(subject, candidates, options.min_score, today);

        RankResult {
            matches: finish_ranking(matches, options.limit),
            total_candidates: candidates.len(),
        }
    }

    /// Same as [`Matcher::rank`], with candidates scored in chunks on the
    /// blocking thread pool
    pub async fn rank_parallel(
        &self,
        subject: Arc<Profile>,
        candidates: Vec<Profile>,
        options: RankOptions,
        today: NaiveDate,
    ) -> Result<RankResult, RankError> {
        let total_candidates = candidates.len();
        let chunk_size = options.chunk_size.max(1);

        let mut tasks = JoinSet::new();
        let mut remaining = candidates;
        while !remaining.is_empty() {
            let rest = remaining.split_off(chunk_size.min(remaining.len()));
            let chunk = std::mem::replace(&mut remaining, rest);

            let matcher = self.clone();
            let subject = Arc::clone(&subject);
            tasks.spawn_blocking(move || {
                matcher.score_candidates(&subject, &chunk, options.min_score, today)
            });
        }

        let mut matches = Vec::with_capacity(total_candidates);
        while let Some(chunk) = tasks.join_next().await {
            matches.extend(chunk?);
        }

        tracing::debug!(
            "Scored {} candidates for {} in chunks of {}",
            total_candidates,
            subject.id,
            chunk_size
        );

        Ok(RankResult {
            matches: finish_ranking(matches, options.limit),
            total_candidates,
        })
    }

    fn score_candidates(
        &self,
        subject: &Profile,
        candidates: &[Profile],
        min_score: Option<u8>,
        today: NaiveDate,
    ) -> Vec<RankedMatch> {
        candidates
            .iter()
            .filter(|candidate| candidate.id != subject.id)
            .filter_map(|candidate| {
                let result = self.score_on(subject, candidate, today);

                if min_score.is_some_and(|min| result.score < min) {
                    return None;
                }

                Some(RankedMatch {
                    profile: candidate.summary(),
                    score: result.score,
                    breakdown: result.breakdown,
                })
            })
            .collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Sort by score (descending) then by id (ascending), and truncate
fn finish_ranking(mut matches: Vec<RankedMatch>, limit: usize) -> Vec<RankedMatch> {
    matches.sort_by(|a, b| match b.score.cmp(&a.score) {
        Ordering::Equal => a.profile.id.cmp(&b.profile.id),
        other => other,
    });
    matches.truncate(limit);
    matches
}
