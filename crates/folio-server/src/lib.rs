//! Folio HTTP server.
//!
//! Wraps the [`folio_api`] router with the transport stack: request tracing,
//! CORS, an IP rate limit, the token/API-key guards, a request body size
//! cap, and response compression. API routes live under `/api`; any other
//! path answers with the JSON 404 body.

pub mod auth;
pub mod rate_limit;
pub mod seed;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  http::{HeaderValue, Method, header},
  middleware,
};
use folio_api::{ApiState, Env};
use folio_core::store::PortfolioStore;
use serde::Deserialize;
use tower_http::{
  compression::CompressionLayer,
  cors::CorsLayer,
  limit::RequestBodyLimitLayer,
  trace::TraceLayer,
};

use auth::AuthConfig;
use rate_limit::RateLimiter;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` and `FOLIO_*`
/// environment variables. Every field has a default so a bare start serves
/// a development instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                   String,
  pub port:                   u16,
  pub store_path:             PathBuf,
  pub environment:            Env,
  pub cors_origin:            String,
  pub jwt_secret:             String,
  pub api_key:                Option<String>,
  pub rate_limit_max:         u32,
  pub rate_limit_window_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                   "127.0.0.1".to_string(),
      port:                   3000,
      store_path:             PathBuf::from("folio.db"),
      environment:            Env::Development,
      cors_origin:            "http://localhost:3001".to_string(),
      jwt_secret:             "fallback-secret".to_string(),
      api_key:                None,
      rate_limit_max:         100,
      rate_limit_window_secs: 15 * 60,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Build the full server router.
///
/// Fails only when `cors_origin` is not a valid header value.
pub fn router<S>(
  state: ApiState<S>,
  config: &ServerConfig,
) -> Result<Router, axum::http::header::InvalidHeaderValue>
where
  S: PortfolioStore + Clone + 'static,
{
  let auth = Arc::new(AuthConfig {
    env:     config.environment,
    secret:  config.jwt_secret.clone(),
    api_key: config.api_key.clone(),
  });
  let limiter = Arc::new(RateLimiter::new(
    config.rate_limit_max,
    Duration::from_secs(config.rate_limit_window_secs),
  ));

  // Outermost layer is the last one added: requests pass the rate limit,
  // then the token guard, then the API-key guard.
  let api = folio_api::api_router(state)
    .layer(middleware::from_fn_with_state(auth.clone(), auth::require_api_key))
    .layer(middleware::from_fn_with_state(auth, auth::require_token))
    .layer(middleware::from_fn_with_state(limiter, rate_limit::throttle));

  let cors = CorsLayer::new()
    .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
    .allow_credentials(true)
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::PATCH,
      Method::DELETE,
    ])
    .allow_headers([
      header::CONTENT_TYPE,
      header::AUTHORIZATION,
      header::HeaderName::from_static("x-api-key"),
    ]);

  Ok(
    Router::new()
      .nest("/api", api)
      .fallback(folio_api::not_found)
      .layer(CompressionLayer::new())
      .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
      .layer(cors)
      .layer(TraceLayer::new_for_http()),
  )
}

// ─── Integration tests ────────────────────────────────────────────────────────
