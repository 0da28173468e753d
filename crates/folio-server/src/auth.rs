//! Bearer-token and API-key guards for the `/api` tree.
//!
//! Outside production the token guard is a pass-through: a request without a
//! token is assigned a fixed development identity instead of being rejected.
//! A token that IS supplied is always verified, in every environment. The
//! API-key guard only runs when a key is configured.

use std::sync::Arc;

use axum::{
  extract::{Request, State},
  http::header,
  middleware::Next,
  response::{IntoResponse, Response},
};
use folio_api::{ApiError, Env};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Signing material and enforcement mode shared by both guards.
pub struct AuthConfig {
  pub env:     Env,
  pub secret:  String,
  pub api_key: Option<String>,
}

/// The authenticated caller, attached to request extensions by
/// [`require_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
  pub id: i64,
}

/// Identity granted to tokenless callers outside production.
const DEV_IDENTITY: Identity = Identity { id: 1 };

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  id:  i64,
  exp: i64,
}

/// Sign a token for `id`, valid for seven days.
pub fn issue_token(
  config: &AuthConfig,
  id: i64,
) -> jsonwebtoken::errors::Result<String> {
  let claims = Claims {
    id,
    exp: (chrono::Utc::now() + chrono::Duration::days(7)).timestamp(),
  };
  jsonwebtoken::encode(
    &Header::default(),
    &claims,
    &EncodingKey::from_secret(config.secret.as_bytes()),
  )
}

fn bearer_token(req: &Request) -> Option<String> {
  req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::to_owned)
}

pub async fn require_token(
  State(auth): State<Arc<AuthConfig>>,
  mut req: Request,
  next: Next,
) -> Response {
  match bearer_token(&req) {
    None if auth.env.is_production() => {
      ApiError::Unauthorized("Access token required").into_response()
    }
    None => {
      req.extensions_mut().insert(DEV_IDENTITY);
      next.run(req).await
    }
    Some(token) => {
      let decoded = jsonwebtoken::decode::<Claims>(
        &token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &Validation::default(),
      );
      match decoded {
        Ok(data) => {
          req.extensions_mut().insert(Identity { id: data.claims.id });
          next.run(req).await
        }
        Err(e) => {
          tracing::warn!(error = %e, "token verification failed");
          ApiError::Forbidden("Invalid or expired token").into_response()
        }
      }
    }
  }
}

pub async fn require_api_key(
  State(auth): State<Arc<AuthConfig>>,
  req: Request,
  next: Next,
) -> Response {
  let Some(expected) = auth.api_key.as_deref() else {
    return next.run(req).await;
  };
  let provided = req.headers().get("x-api-key").and_then(|v| v.to_str().ok());
  match provided {
    None if auth.env.is_production() => {
      ApiError::Unauthorized("API key required").into_response()
    }
    None => next.run(req).await,
    Some(key) if key == expected => next.run(req).await,
    Some(_) => ApiError::Forbidden("Invalid API key").into_response(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{Extension, Router, body::Body, http::StatusCode, middleware, routing::get};
  use tower::ServiceExt as _;

  async fn whoami(Extension(identity): Extension<Identity>) -> String {
    identity.id.to_string()
  }

  fn guarded_app(env: Env, api_key: Option<&str>) -> (Router, Arc<AuthConfig>) {
    let auth = Arc::new(AuthConfig {
      env,
      secret: "test-secret".to_string(),
      api_key: api_key.map(str::to_owned),
    });
    let app = Router::new()
      .route("/probe", get(whoami))
      .layer(middleware::from_fn_with_state(auth.clone(), require_api_key))
      .layer(middleware::from_fn_with_state(auth.clone(), require_token));
    (app, auth)
  }

  async fn probe(app: Router, headers: Vec<(&str, String)>) -> (StatusCode, String) {
    let mut builder = axum::http::Request::builder().uri("/probe");
    for (name, value) in headers {
      builder = builder.header(name, value);
    }
    let resp = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  #[tokio::test]
  async fn missing_token_passes_in_development() {
    let (app, _) = guarded_app(Env::Development, None);
    let (status, body) = probe(app, vec![]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");
  }

  #[tokio::test]
  async fn missing_token_rejected_in_production() {
    let (app, _) = guarded_app(Env::Production, None);
    let (status, body) = probe(app, vec![]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Access token required"), "body: {body}");
  }

  #[tokio::test]
  async fn valid_token_attaches_claims_identity() {
    let (app, auth) = guarded_app(Env::Production, None);
    let token = issue_token(&auth, 42).unwrap();
    let (status, body) =
      probe(app, vec![("authorization", format!("Bearer {token}"))]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "42");
  }

  #[tokio::test]
  async fn garbage_token_rejected_even_in_development() {
    let (app, _) = guarded_app(Env::Development, None);
    let (status, body) =
      probe(app, vec![("authorization", "Bearer not.a.token".to_string())]).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Invalid or expired token"), "body: {body}");
  }

  #[tokio::test]
  async fn expired_token_rejected() {
    let (app, auth) = guarded_app(Env::Development, None);
    let claims = Claims {
      id:  7,
      exp: (chrono::Utc::now() - chrono::Duration::days(1)).timestamp(),
    };
    let token = jsonwebtoken::encode(
      &Header::default(),
      &claims,
      &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
    .unwrap();
    let (status, _) =
      probe(app, vec![("authorization", format!("Bearer {token}"))]).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn api_key_mismatch_rejected() {
    let (app, _) = guarded_app(Env::Development, Some("sekrit"));
    let (status, body) = probe(app, vec![("x-api-key", "wrong".to_string())]).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Invalid API key"), "body: {body}");
  }

  #[tokio::test]
  async fn api_key_missing_passes_outside_production() {
    let (app, _) = guarded_app(Env::Development, Some("sekrit"));
    let (status, _) = probe(app, vec![]).await;
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn api_key_missing_rejected_in_production() {
    let (app, auth) = guarded_app(Env::Production, Some("sekrit"));
    let token = issue_token(&auth, 1).unwrap();
    let (status, body) =
      probe(app, vec![("authorization", format!("Bearer {token}"))]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("API key required"), "body: {body}");
  }

  #[tokio::test]
  async fn matching_api_key_passes_in_production() {
    let (app, auth) = guarded_app(Env::Production, Some("sekrit"));
    let token = issue_token(&auth, 1).unwrap();
    let (status, _) = probe(
      app,
      vec![
        ("authorization", format!("Bearer {token}")),
        ("x-api-key", "sekrit".to_string()),
      ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }
}
