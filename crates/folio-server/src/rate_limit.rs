//! Fixed-window request throttle keyed by client IP.

use std::{
  collections::HashMap,
  net::SocketAddr,
  sync::Arc,
  time::{Duration, Instant},
};

use axum::{
  Json,
  extract::{ConnectInfo, Request, State},
  http::StatusCode,
  middleware::Next,
  response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy)]
struct Window {
  count:      u32,
  started_at: Instant,
}

/// At most `max` requests per `window` per client key. Counters reset when
/// a request arrives after the window has elapsed; idle keys are never
/// evicted.
pub struct RateLimiter {
  max:     u32,
  window:  Duration,
  clients: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
  pub fn new(max: u32, window: Duration) -> Self {
    Self { max, window, clients: Mutex::new(HashMap::new()) }
  }

  /// Record one request for `key`; false once the window's budget is spent.
  pub async fn allow(&self, key: &str) -> bool {
    let now = Instant::now();
    let mut clients = self.clients.lock().await;
    let window = clients
      .entry(key.to_owned())
      .or_insert(Window { count: 0, started_at: now });
    if now.duration_since(window.started_at) >= self.window {
      window.count = 0;
      window.started_at = now;
    }
    window.count += 1;
    window.count <= self.max
  }
}

/// Client key: first `X-Forwarded-For` hop when present, else the peer
/// address.
fn client_key(req: &Request) -> String {
  if let Some(forwarded) = req
    .headers()
    .get("x-forwarded-for")
    .and_then(|v| v.to_str().ok())
    && let Some(first) = forwarded.split(',').next()
  {
    let first = first.trim();
    if !first.is_empty() && first.len() <= 64 {
      return first.to_owned();
    }
  }
  req
    .extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|ConnectInfo(addr)| addr.ip().to_string())
    .unwrap_or_else(|| "unknown".to_owned())
}

pub async fn throttle(
  State(limiter): State<Arc<RateLimiter>>,
  req: Request,
  next: Next,
) -> Response {
  let key = client_key(&req);
  if limiter.allow(&key).await {
    next.run(req).await
  } else {
    tracing::warn!(client = %key, "rate limit exceeded");
    (
      StatusCode::TOO_MANY_REQUESTS,
      Json(json!({
        "success": false,
        "message": "Too many requests from this IP, please try again later",
      })),
    )
      .into_response()
  }
}
