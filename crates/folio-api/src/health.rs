//! Handler for `/health`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/health` | 200 with process vitals, 503 when the store is unreachable |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::Utc;
use folio_core::store::PortfolioStore;
use serde_json::json;
use sysinfo::{Pid, System};

use crate::ApiState;

pub async fn check<S>(State(state): State<ApiState<S>>) -> Response
where
  S: PortfolioStore + Clone + 'static,
{
  let timestamp = Utc::now().to_rfc3339();

  if let Err(e) = state.store.ping().await {
    tracing::error!(error = %e, "health check failed");
    return (
      StatusCode::SERVICE_UNAVAILABLE,
      Json(json!({
        "success":   false,
        "message":   "Service Unavailable",
        "timestamp": timestamp,
        "database":  { "status": "disconnected" },
        "error":     e.to_string(),
      })),
    )
      .into_response();
  }

  let (used, total) = process_memory();
  (
    StatusCode::OK,
    Json(json!({
      "success":     true,
      "message":     "API is healthy",
      "timestamp":   timestamp,
      "uptime":      state.started_at.elapsed().as_secs_f64(),
      "environment": state.env.as_str(),
      "version":     env!("CARGO_PKG_VERSION"),
      "database":    { "status": "connected", "dialect": state.dialect },
      "memory":      { "used": mb(used), "total": mb(total) },
    })),
  )
    .into_response()
}

/// Resident set of this process and total system memory, in bytes.
fn process_memory() -> (u64, u64) {
  let system = System::new_all();
  let used = system
    .process(Pid::from_u32(std::process::id()))
    .map_or(0, |process| process.memory());
  (used, system.total_memory())
}

fn mb(bytes: u64) -> String {
  format!("{} MB", (bytes as f64 / 1_048_576.0).round() as u64)
}
