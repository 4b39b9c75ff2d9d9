use axum::{routing::get, Json, Router};
use serde::Serialize;
use sysinfo::System;

use crate::state::AppState;

const MB: u64 = 1024 * 1024;

/// Health check response payload.
///
/// Liveness only: always reports "UP" with process vitals. No backend
/// dependency probe is performed.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Total system memory in MB.
    pub total_memory_mb: u64,
    /// Memory ceiling for this process in MB: the cgroup limit when
    /// one applies, otherwise total system memory.
    pub max_memory_mb: u64,
    /// Free system memory in MB.
    pub free_memory_mb: u64,
    /// Number of logical processors available.
    pub available_processors: usize,
}

/// GET /health -- returns service liveness and process vitals.
async fn health_check() -> Json<HealthResponse> {
    let mut sys = System::new();
    sys.refresh_memory();

    let max_memory = sys
        .cgroup_limits()
        .map(|limits| limits.total_memory)
        .unwrap_or_else(|| sys.total_memory());

    Json(HealthResponse {
        status: "UP",
        version: env!("CARGO_PKG_VERSION"),
        total_memory_mb: sys.total_memory() / MB,
        max_memory_mb: max_memory / MB,
        free_memory_mb: sys.free_memory() / MB,
        available_processors: num_cpus::get(),
    })
}

/// Mount health check routes (root-level, outside the `/data` prefix).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
