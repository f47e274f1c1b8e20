use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, FixedOffset, Utc};
use serde::Deserialize;

use crate::github::{GitHubApi, GitHubApiError};
use crate::web::SharedState;
use crate::wrapped::{ShareMetadata, WrappedStats, aggregate, share::DEFAULT_THEME};

/// Largest offset from UTC any timezone uses, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/wrapped", get(get_wrapped))
        .route("/share", get(get_share))
        .route("/health", get(get_health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct WrappedQuery {
    // required
    username: String,
    // defaults to the configured year
    year: Option<i32>,
    // viewer's timezone, used to bucket commit times
    utc_offset_minutes: Option<i32>,
    // forwarded to the OG image query
    theme: Option<String>,
}

/// Unwraps the query string, turning a malformed one into a JSON 400.
fn parse_query(
    query: Result<Query<WrappedQuery>, QueryRejection>,
) -> Result<WrappedQuery, Response> {
    match query {
        Ok(Query(q)) => {
            tracing::Span::current().record("username", q.username.as_str());
            Ok(q)
        }
        Err(rejection) => Err(error_response(
            StatusCode::BAD_REQUEST,
            &rejection.body_text(),
        )),
    }
}

#[tracing::instrument(name = "wrapped_request", skip_all, fields(username = tracing::field::Empty))]
async fn get_wrapped(
    State(state): State<SharedState>,
    query: Result<Query<WrappedQuery>, QueryRejection>,
) -> Response {
    let q = match parse_query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    configure_request_scope(&q, "wrapped");

    match load_wrapped(&state, &q).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(response) => response,
    }
}

#[tracing::instrument(name = "share_request", skip_all, fields(username = tracing::field::Empty))]
async fn get_share(
    State(state): State<SharedState>,
    query: Result<Query<WrappedQuery>, QueryRejection>,
) -> Response {
    let q = match parse_query(query) {
        Ok(q) => q,
        Err(response) => return response,
    };
    configure_request_scope(&q, "share");

    let stats = match load_wrapped(&state, &q).await {
        Ok(stats) => stats,
        Err(response) => return response,
    };

    let theme = q.theme.as_deref().unwrap_or(DEFAULT_THEME);
    match ShareMetadata::for_stats(&stats, theme) {
        Ok(meta) => (StatusCode::OK, Json(meta)).into_response(),
        Err(e) => {
            sentry::capture_error(&e);
            tracing::error!("Failed to serialize share metadata: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build share metadata",
            )
        }
    }
}

/// Adds user context to Sentry for the current request
fn configure_request_scope(q: &WrappedQuery, endpoint: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(q.username.clone()),
            ..Default::default()
        }));
        scope.set_tag("wrapped_endpoint", endpoint);
        scope.set_context(
            "request_params",
            sentry::protocol::Context::Other({
                let mut map = std::collections::BTreeMap::new();
                map.insert("username".to_string(), q.username.clone().into());
                if let Some(year) = q.year {
                    map.insert("year".to_string(), year.into());
                }
                if let Some(offset) = q.utc_offset_minutes {
                    map.insert("utc_offset_minutes".to_string(), offset.into());
                }
                map
            }),
        );
    });
}

/// Validates the request, fetches the user's raw year (through the cache)
/// and derives the wrapped profile from it.
async fn load_wrapped(state: &SharedState, q: &WrappedQuery) -> Result<WrappedStats, Response> {
    if let Err(e) = GitHubApi::validate_username(&q.username) {
        return Err(github_error_response(e, &q.username));
    }

    let year = q.year.unwrap_or(state.config.default_year);
    if let Err(e) = GitHubApi::validate_year(year, Utc::now().year()) {
        return Err(error_response(StatusCode::BAD_REQUEST, &e.to_string()));
    }

    let offset = match parse_utc_offset(q.utc_offset_minutes) {
        Some(offset) => offset,
        None => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "utc_offset_minutes must be within -840..=840",
            ));
        }
    };

    let raw = state
        .cache
        .get_or_insert_raw_profile(&q.username, year, || {
            state.api.fetch_wrapped_year(&q.username, year)
        })
        .await
        .map_err(|e| github_error_response(e, &q.username))?;

    aggregate(&raw, offset).map_err(|e| {
        sentry::capture_error(&e);
        tracing::error!("Failed to aggregate wrapped stats for {}: {e}", q.username);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Incomplete data received from GitHub",
        )
    })
}

/// Maps a GitHub API failure to the response the client receives
fn github_error_response(error: GitHubApiError, username: &str) -> Response {
    match error {
        GitHubApiError::UserNotFound => error_response(StatusCode::NOT_FOUND, "User not found"),
        GitHubApiError::InvalidUsername(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
        GitHubApiError::InvalidYear(year) => {
            error_response(StatusCode::BAD_REQUEST, &format!("Invalid year: {year}"))
        }
        GitHubApiError::MissingToken => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "GitHub API token not configured",
        ),
        GitHubApiError::Unauthorized => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "GitHub rejected the configured token",
        ),
        GitHubApiError::RateLimitExceeded => {
            // Report rate limit exceeded to Sentry as it's an operational issue
            sentry::capture_message(
                &format!("GitHub API rate limit exceeded for user: {}", username),
                sentry::Level::Warning,
            );
            error_response(
                StatusCode::TOO_MANY_REQUESTS,
                "GitHub API rate limit exceeded",
            )
        }
        GitHubApiError::RateLimitProtection(remaining, reset_time) => {
            // Calculate seconds until reset
            let current_time = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let retry_after = reset_time.saturating_sub(current_time);

            let mut headers = HeaderMap::new();
            if let Ok(retry_header) = HeaderValue::from_str(&retry_after.to_string()) {
                headers.insert(header::RETRY_AFTER, retry_header);
            }

            (
                StatusCode::TOO_MANY_REQUESTS,
                headers,
                Json(serde_json::json!({
                    "error": format!("Rate limit protection active: {} requests remaining, reset at {}", remaining, reset_time),
                    "retry_after_seconds": retry_after
                })),
            )
                .into_response()
        }
        e @ (GitHubApiError::NetworkError(_) | GitHubApiError::GraphQLError(_)) => {
            // Report all other unexpected errors to Sentry
            sentry::capture_error(&e);
            tracing::error!("GitHub API error: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch GitHub activity",
            )
        }
    }
}

#[tracing::instrument(level = "trace", skip(state))]
async fn get_health(State(state): State<SharedState>) -> impl IntoResponse {
    let rate_limit = state.api.rate_limit();
    let cache_stats = state.cache.stats();

    let mut headers = HeaderMap::new();

    // Add app version header
    if let Ok(header_value) = HeaderValue::from_str(env!("CARGO_PKG_VERSION")) {
        headers.insert("x-app-version", header_value);
    }

    // GitHub rate limit headers are only present once GitHub has answered a request
    let rate_limit_headers = [
        ("x-github-ratelimit-limit", rate_limit.limit.map(u64::from)),
        ("x-github-ratelimit-remaining", rate_limit.remaining.map(u64::from)),
        ("x-github-ratelimit-used", rate_limit.used.map(u64::from)),
        ("x-github-ratelimit-reset", rate_limit.reset),
        ("x-cache-entries", Some(cache_stats.entry_count)),
        ("x-cache-size-bytes", Some(cache_stats.weighted_size)),
    ];

    for (name, value) in rate_limit_headers {
        if let Some(value) = value
            && let Ok(header_value) = HeaderValue::from_str(&value.to_string())
        {
            headers.insert(name, header_value);
        }
    }

    (StatusCode::OK, headers)
}

/// Helper function to create a JSON error response
fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Turns an optional offset in minutes into a timezone, defaulting to UTC.
fn parse_utc_offset(minutes: Option<i32>) -> Option<FixedOffset> {
    let minutes = minutes.unwrap_or(0);
    if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}
