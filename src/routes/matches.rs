use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

use crate::core::{MatchRanker, ScoringStrategy};
use crate::models::{
    to_percent, Breakdown, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    Profile, ScorePairRequest, ScorePairResponse,
};
use crate::services::{AppwriteClient, AppwriteError, ProfileCache};

/// Limits applied to match requests
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub default_limit: i64,
    pub max_limit: i64,
    pub candidate_pool_size: usize,
}

/// One ranker per scoring strategy
#[derive(Debug, Clone)]
pub struct Rankers {
    pub default_strategy: ScoringStrategy,
    pub canonical: MatchRanker,
    pub legacy: MatchRanker,
}

impl Rankers {
    pub fn get(&self, strategy: Option<ScoringStrategy>) -> (ScoringStrategy, &MatchRanker) {
        let strategy = strategy.unwrap_or(self.default_strategy);
        let ranker = match strategy {
            ScoringStrategy::Canonical => &self.canonical,
            ScoringStrategy::Legacy => &self.legacy,
        };
        (strategy, ranker)
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: ProfileCache,
    pub rankers: Rankers,
    pub limits: MatchLimits,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/compatibility/score", web::post().to(score_pair));
}

fn error_response(status: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status,
    };
    match status {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        502 => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        strategy: state.rankers.default_strategy,
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20,
///   "strategy": "canonical|legacy"
/// }
/// ```
///
/// An empty `matches` list with status 200 means "no matches yet". A blank
/// `userId` or a `limit` above `matching.max_limit` is a 400. A failed fetch
/// from the profile store is a 502.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return error_response(400, "Validation failed", errors.to_string());
    }

    if let Some(limit) = req.limit.filter(|limit| *limit > state.limits.max_limit) {
        tracing::info!("Rejected find_matches limit {} above {}", limit, state.limits.max_limit);
        return error_response(
            400,
            "Validation failed",
            format!("limit: must not exceed {}", state.limits.max_limit),
        );
    }

    let span = tracing::info_span!(
        "find_matches",
        request_id = %uuid::Uuid::new_v4(),
        user_id = %req.user_id
    );

    find_matches_inner(state, req.into_inner()).instrument(span).await
}

async fn find_matches_inner(state: web::Data<AppState>, req: FindMatchesRequest) -> HttpResponse {
    let limit = req
        .limit
        .unwrap_or_else(|| state.limits.default_limit.min(state.limits.max_limit));
    let (strategy, ranker) = state.rankers.get(req.strategy);

    tracing::info!("Finding matches for user: {}, limit: {}, strategy: {}", req.user_id, limit, strategy);

    let current = match current_profile(&state, &req.user_id).await {
        Ok(profile) => profile,
        Err(AppwriteError::NotFound(message)) => {
            return error_response(404, "Profile not found", message);
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", req.user_id, e);
            return error_response(502, "Failed to fetch user profile", e.to_string());
        }
    };

    let candidates = match state
        .appwrite
        .list_candidates(&req.user_id, state.limits.candidate_pool_size)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", req.user_id, e);
            return error_response(502, "Failed to query candidates", e.to_string());
        }
    };

    let outcome = ranker.rank(&current, candidates, limit);

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates, {} skipped)",
        outcome.matches.len(),
        req.user_id,
        outcome.total_candidates,
        outcome.skipped.len()
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: outcome.matches,
        skipped: outcome.skipped,
        total_candidates: outcome.total_candidates,
        strategy,
    })
}

async fn current_profile(state: &AppState, user_id: &str) -> Result<Arc<Profile>, AppwriteError> {
    if let Some(profile) = state.cache.get(user_id).await {
        return Ok(profile);
    }

    let profile = state.appwrite.get_profile(user_id).await?;
    Ok(state.cache.insert(profile).await)
}

/// Score two profiles directly
///
/// POST /api/v1/compatibility/score
///
/// A missing profile is not an error: the response carries the neutral zero
/// result with `comparable: false`.
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    let (strategy, ranker) = state.rankers.get(req.strategy);
    let result = ranker
        .scorer()
        .score_pair(req.profile_a.as_ref(), req.profile_b.as_ref());

    HttpResponse::Ok().json(ScorePairResponse {
        overall_score: to_percent(result.overall),
        breakdown: result.breakdown.map(Breakdown::from),
        comparable: result.is_comparable(),
        shared_interests: result.shared_interests,
        strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RankerConfig;
    use crate::models::ScoringWeights;
    use actix_web::{test, App};
    use serde_json::json;
    use std::time::Duration;

    fn state(base_url: String) -> AppState {
        let weights = ScoringWeights::default();
        let config = RankerConfig::default();
        AppState {
            appwrite: Arc::new(
                AppwriteClient::new(
                    base_url,
                    "key".to_string(),
                    "project".to_string(),
                    "db".to_string(),
                    "profiles".to_string(),
                    Duration::from_secs(5),
                )
                .unwrap(),
            ),
            cache: ProfileCache::new(10, 60),
            rankers: Rankers {
                default_strategy: ScoringStrategy::Canonical,
                canonical: MatchRanker::new(ScoringStrategy::Canonical.build(weights), config),
                legacy: MatchRanker::new(ScoringStrategy::Legacy.build(weights), config),
            },
            limits: MatchLimits {
                default_limit: 20,
                max_limit: 100,
                candidate_pool_size: 50,
            },
        }
    }

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:9".to_string())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.strategy, ScoringStrategy::Canonical);
    }

    #[actix_web::test]
    async fn test_score_pair_missing_profile_is_not_comparable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:9".to_string())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/compatibility/score")
            .set_json(json!({"profileA": {"id": "a"}}))
            .to_request();
        let body: ScorePairResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.overall_score, 0);
        assert!(!body.comparable);
        assert!(body.breakdown.is_none());
    }

    #[actix_web::test]
    async fn test_score_pair_with_legacy_strategy() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:9".to_string())))
                .configure(configure),
        )
        .await;

        let profile = json!({"id": "a", "interests": ["music", "art"]});
        let req = test::TestRequest::post()
            .uri("/compatibility/score")
            .set_json(json!({"profileA": profile, "profileB": profile, "strategy": "legacy"}))
            .to_request();
        let body: ScorePairResponse = test::call_and_read_body_json(&app, req).await;

        assert!(body.comparable);
        assert_eq!(body.strategy, ScoringStrategy::Legacy);
        assert_eq!(body.breakdown.map(|b| b.interests), Some(100));
        assert_eq!(body.shared_interests, vec!["music", "art"]);
    }

    #[actix_web::test]
    async fn test_find_matches_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .match_query(mockito::Matcher::Regex("equal".to_string()))
            .with_status(200)
            .with_body(
                json!({"documents": [{"userId": "me", "interests": ["music", "art"]}]}).to_string(),
            )
            .create_async()
            .await;
        server
            .mock("GET", mockito::Matcher::Any)
            .match_query(mockito::Matcher::Regex("notEqual".to_string()))
            .with_status(200)
            .with_body(
                json!({"documents": [
                    {"userId": "twin", "interests": ["music", "art"]},
                    {"interests": ["music"]},
                    {"userId": "me"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(server.url())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(json!({"userId": "me", "limit": 5}))
            .to_request();
        let body: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.total_candidates, 3);
        assert_eq!(body.matches.len(), 1);
        assert_eq!(body.matches[0].candidate_id, "twin");
        assert_eq!(body.matches[0].breakdown.interests, 100);
        assert_eq!(body.skipped.len(), 1);
    }

    #[actix_web::test]
    async fn test_find_matches_rejects_limit_above_max() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:9".to_string())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(json!({"userId": "me", "limit": 101}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("100"));
    }

    #[actix_web::test]
    async fn test_find_matches_rejects_blank_user_id() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:9".to_string())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(json!({"userId": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_find_matches_rejects_empty_user_id() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:9".to_string())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(json!({"userId": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
