//! JSON REST API for Folio.
//!
//! Exposes an axum [`Router`] backed by any
//! [`folio_core::store::PortfolioStore`]. Every response shares one wire
//! shape: `{success: true, data, message?, pagination?}` on success and
//! `{success: false, message, errors?}` on failure. Transport concerns
//! (CORS, rate limiting, auth, body limits) belong to the server crate.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", folio_api::api_router(state))
//! ```

pub mod error;
pub mod health;
pub mod profile;
pub mod projects;
pub mod response;
pub mod search;
pub mod skills;
pub mod validate;


use std::{sync::Arc, time::Instant};

use axum::{
  Json, Router,
  extract::OriginalUri,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
};
use folio_core::store::PortfolioStore;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub use error::ApiError;

// ─── Environment ─────────────────────────────────────────────────────────────

/// Deployment environment, reported by the health endpoint.
///
/// Also decides how much an unclassified failure reveals: in development the
/// underlying error message is echoed in the body, elsewhere only the fixed
/// context message. The server crate additionally keys auth enforcement and
/// default config off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
  #[default]
  Development,
  Test,
  Production,
}

impl Env {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Test => "test",
      Self::Production => "production",
    }
  }

  pub fn is_development(self) -> bool {
    self == Self::Development
  }

  pub fn is_production(self) -> bool {
    self == Self::Production
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState<S: PortfolioStore> {
  pub store:      Arc<S>,
  pub env:        Env,
  /// Storage backend label echoed by the health endpoint.
  pub dialect:    &'static str,
  pub started_at: Instant,
}

impl<S: PortfolioStore> ApiState<S> {
  pub fn new(store: Arc<S>, env: Env, dialect: &'static str) -> Self {
    Self { store, env, dialect, started_at: Instant::now() }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Paths nothing matches fall through to
/// [`not_found`].
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: PortfolioStore + Clone + 'static,
{
  Router::new()
    // Health
    .route("/health", get(health::check::<S>))
    // Profile (singleton)
    .route(
      "/profile",
      get(profile::overview::<S>)
        .post(profile::create::<S>)
        .put(profile::replace::<S>)
        .patch(profile::patch::<S>),
    )
    // Skills
    .route("/skills", get(skills::list::<S>).post(skills::create::<S>))
    .route("/skills/top", get(skills::top::<S>))
    // Projects
    .route("/projects", get(projects::list::<S>).post(projects::create::<S>))
    .route(
      "/projects/{id}",
      get(projects::get_one::<S>).put(projects::update::<S>),
    )
    // Search
    .route("/search", get(search::run::<S>))
    .fallback(not_found)
    .with_state(state)
}

/// JSON 404 for unmatched paths, echoing the path the client asked for.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
  (
    StatusCode::NOT_FOUND,
    Json(json!({
      "success": false,
      "message": "API endpoint not found",
      "path":    uri.path(),
    })),
  )
    .into_response()
}
