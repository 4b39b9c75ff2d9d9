//! Telemetry data retrieval endpoint.
//!
//! Translates `GET /data/{vin}/datatypes/{datatype}?lookback=<token>`
//! into one streaming Data API call and returns the collected values as
//! a single-entry JSON mapping keyed by the requested data type.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::{routing::get, Json, Router};
use serde::Deserialize;
use vts_core::lookback::parse_lookback;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for the data retrieval endpoint.
#[derive(Debug, Deserialize)]
pub struct DataQuery {
    /// Optional lookback token, e.g. `5d`. Absent or empty means
    /// "latest value only".
    pub lookback: Option<String>,
}

/// GET /data/{vin}/datatypes/{datatype}
///
/// The response body is always a single-entry mapping keyed by the
/// requested data type, even when no values were retrieved.
async fn retrieve_data(
    State(state): State<AppState>,
    Path((vin, datatype)): Path<(String, String)>,
    Query(query): Query<DataQuery>,
) -> AppResult<Json<HashMap<String, Vec<String>>>> {
    if vin.trim().is_empty() {
        return Err(AppError::BadRequest("vin must not be blank".into()));
    }
    if datatype.trim().is_empty() {
        return Err(AppError::BadRequest("datatype must not be blank".into()));
    }

    let lookback_millis = parse_lookback(query.lookback.as_deref())?;

    let result = state
        .data_api
        .retrieve_data(&vin, &datatype, lookback_millis)
        .await;

    Ok(Json(result))
}

/// Mount data retrieval routes at `/data`.
pub fn router() -> Router<AppState> {
    Router::new().route("/data/{vin}/datatypes/{datatype}", get(retrieve_data))
}
