use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Matcher, RankOptions, RankingLimits};
use crate::models::{
    CompatibilityScore, ErrorResponse, HealthResponse, MatchScoreResponse, Profile,
    RankCandidatesRequest, RankCandidatesResponse, ScorePairPath,
};
use crate::services::{CacheKey, CacheManager, ProfileRepository, RepositoryError};
use std::collections::HashSet;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ProfileRepository>,
    pub cache: Option<Arc<CacheManager>>,
    pub matcher: Matcher,
    pub ranking: RankingLimits,
}

impl AppState {
    pub fn new(repository: Arc<dyn ProfileRepository>, matcher: Matcher) -> Self {
        Self {
            repository,
            cache: None,
            matcher,
            ranking: RankingLimits::default(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<CacheManager>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_ranking(mut self, ranking: RankingLimits) -> Self {
        self.ranking = ranking;
        self
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score/{profile_a}/{profile_b}", web::get().to(score_pair))
        .route("/matches/rank", web::post().to(rank_candidates));
}

fn not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "Profile not found",
        format!("Profile {} does not exist", id),
        404,
    ))
}

fn repository_failure(context: &str, err: &RepositoryError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse::new(context, err.to_string(), 500))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.repository.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Repository health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score a pair of profiles
///
/// GET /api/v1/matches/score/{profileA}/{profileB}
///
/// Response body:
/// ```json
/// {
///   "score": 74,
///   "breakdown": { "age": 90, "location": 80, ... },
///   "profileA": { "id": "...", "name": "...", "email": "...", "avatar": "..." },
///   "profileB": { "id": "...", "name": "...", "email": "...", "avatar": "..." }
/// }
/// ```
async fn score_pair(
    state: web::Data<AppState>,
    path: web::Path<ScorePairPath>,
) -> impl Responder {
    let ScorePairPath { profile_a, profile_b } = path.into_inner();

    let (a, b) = tokio::join!(
        state.repository.find_profile(&profile_a),
        state.repository.find_profile(&profile_b),
    );

    let a = match a {
        Ok(Some(profile)) => profile,
        Ok(None) => return not_found(&profile_a),
        Err(e) => return repository_failure("Failed to fetch profile", &e),
    };
    let b = match b {
        Ok(Some(profile)) => profile,
        Ok(None) => return not_found(&profile_b),
        Err(e) => return repository_failure("Failed to fetch profile", &e),
    };

    let result = score_with_cache(&state, &a, &b).await;

    tracing::info!("Scored {} against {}: {}", a.id, b.id, result.score);

    HttpResponse::Ok().json(MatchScoreResponse {
        score: result.score,
        breakdown: result.breakdown,
        profile_a: a.summary(),
        profile_b: b.summary(),
    })
}

async fn score_with_cache(state: &AppState, a: &Profile, b: &Profile) -> CompatibilityScore {
    let today = chrono::Utc::now().date_naive();

    let Some(cache) = &state.cache else {
        return state.matcher.score_on(a, b, today);
    };

    let key = CacheKey::score(&a.id, &b.id, today);
    if let Some(cached) = cache.get_score(&key).await {
        tracing::debug!("Score cache hit for {}", key);
        return cached;
    }

    let result = state.matcher.score_on(a, b, today);
    cache.put_score(&key, &result).await;
    result
}

/// Rank candidate profiles against one profile
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "profileId": "string",
///   "candidateIds": ["string"],
///   "limit": 20,
///   "minScore": 40
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let limits = state.ranking;
    if req.candidate_ids.len() > limits.max_candidates {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Too many candidates",
            format!("At most {} candidate ids are accepted", limits.max_candidates),
            400,
        ));
    }

    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or(limits.default_limit)
        .min(limits.max_limit);

    let subject = match state.repository.find_profile(&req.profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return not_found(&req.profile_id),
        Err(e) => return repository_failure("Failed to fetch profile", &e),
    };

    // Drop duplicate ids, keeping first occurrence
    let mut seen = HashSet::new();
    let candidate_ids: Vec<String> = req
        .candidate_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();

    let candidates = match state.repository.find_profiles(&candidate_ids).await {
        Ok(candidates) => candidates,
        Err(e) => return repository_failure("Failed to fetch candidates", &e),
    };

    let found: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    let missing_ids: Vec<String> = candidate_ids
        .iter()
        .filter(|id| !found.contains(id.as_str()))
        .cloned()
        .collect();

    if !missing_ids.is_empty() {
        tracing::debug!("Skipping {} unknown candidates for {}", missing_ids.len(), subject.id);
    }

    let options = RankOptions {
        limit,
        min_score: req.min_score,
        chunk_size: limits.chunk_size,
    };

    let result = match state
        .matcher
        .rank_parallel(
            Arc::new(subject),
            candidates,
            options,
            chrono::Utc::now().date_naive(),
        )
        .await
    {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Failed to rank candidates for {}: {}", req.profile_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to rank candidates",
                e.to_string(),
                500,
            ));
        }
    };

    tracing::info!(
        "Returning {} matches for profile {} (from {} candidates)",
        result.matches.len(),
        req.profile_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RankCandidatesResponse {
        profile_id: req.profile_id.clone(),
        matches: result.matches,
        total_candidates: result.total_candidates,
        missing_ids,
    })
}
