//! API error type and its JSON wire form.
//!
//! Handlers classify store failures through [`StoreError::kind`] at the
//! boundary and fall back to [`ApiError::internal`] for anything
//! unclassified, so the concrete backend error type never leaks upward.
//!
//! [`StoreError::kind`]: folio_core::store::StoreError::kind

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::Env;

/// A single field-level validation failure, as serialised into the
/// `errors` array of a 400 response.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: &'static str,
}

/// Unified error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  /// One or more request fields failed validation. Always raised before
  /// any store access.
  #[error("validation failed")]
  Validation(Vec<FieldError>),

  #[error("{0}")]
  BadRequest(&'static str),

  #[error("{0}")]
  NotFound(&'static str),

  /// The write lost to an existing row: a duplicate unique value, or a
  /// second profile where only one may exist.
  #[error("{0}")]
  Conflict(&'static str),

  #[error("{0}")]
  Unauthorized(&'static str),

  #[error("{0}")]
  Forbidden(&'static str),

  /// An unclassified store or runtime failure. The client sees `context`;
  /// the underlying error is logged, and echoed in the body only in the
  /// development environment.
  #[error("{context}")]
  Internal {
    env:     Env,
    context: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn internal<E>(env: Env, context: &'static str, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Internal { env, context, source: Box::new(source) }
  }
}

fn plain(status: StatusCode, message: &str) -> Response {
  (status, Json(json!({ "success": false, "message": message }))).into_response()
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      Self::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        Json(json!({
          "success": false,
          "message": "Validation errors",
          "errors":  errors,
        })),
      )
        .into_response(),
      Self::BadRequest(message) => plain(StatusCode::BAD_REQUEST, message),
      Self::NotFound(message) => plain(StatusCode::NOT_FOUND, message),
      Self::Conflict(message) => plain(StatusCode::CONFLICT, message),
      Self::Unauthorized(message) => plain(StatusCode::UNAUTHORIZED, message),
      Self::Forbidden(message) => plain(StatusCode::FORBIDDEN, message),
      Self::Internal { env, context, source } => {
        tracing::error!(error = %source, "{context}");
        if env.is_development() {
          (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
              "success": false,
              "message": context,
              "errors":  source.to_string(),
            })),
          )
            .into_response()
        } else {
          plain(StatusCode::INTERNAL_SERVER_ERROR, context)
        }
      }
    }
  }
}
