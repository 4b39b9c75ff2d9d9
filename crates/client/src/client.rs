//! gRPC client for the backend telemetry data service.
//!
//! [`DataApiClient`] holds a lazily-connected channel to one Data API
//! instance. Call [`DataApiClient::retrieve_data`] to run a single
//! streaming query and collect the decoded values.

use std::collections::HashMap;

use chrono::Utc;
use futures::{Stream, StreamExt};
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use vts_proto::get_telemetry_data_request::TimeSelector;
use vts_proto::telemetry_data_api_client::TelemetryDataApiClient;
use vts_proto::{GetTelemetryDataRequest, TelemetryPoint, TimeRange};

/// Client handle for one Data API instance.
///
/// Cheaply cloneable; clones share the underlying channel, and
/// concurrent calls multiplex on it without extra synchronization.
#[derive(Clone)]
pub struct DataApiClient {
    inner: TelemetryDataApiClient<Channel>,
}

impl DataApiClient {
    /// Create a client for the configured endpoint.
    ///
    /// The channel connects lazily: no connection attempt is made here,
    /// so startup succeeds even while the backend is down. The first
    /// query pays the connection cost.
    pub fn connect(config: &crate::config::DataApiConfig) -> Result<Self, DataApiClientError> {
        let endpoint = Endpoint::from_shared(config.endpoint.clone()).map_err(|e| {
            DataApiClientError::InvalidEndpoint(format!("{}: {e}", config.endpoint))
        })?;

        let channel = endpoint.connect_lazy();

        tracing::info!(
            endpoint = %config.endpoint,
            username = config.username.as_deref().unwrap_or("<none>"),
            "Data API channel created"
        );

        Ok(Self {
            inner: TelemetryDataApiClient::new(channel),
        })
    }

    /// Retrieve telemetry values for one vehicle and one data type.
    ///
    /// `lookback_millis == 0` requests the latest sample(s) only;
    /// otherwise the query window is `[now - lookback, now]` in whole
    /// seconds.
    ///
    /// Backend failures (connection errors, mid-stream status errors)
    /// are logged and degrade to whatever values were received before
    /// the failure, possibly none. The returned map always has exactly
    /// one entry, keyed by `data_type`.
    pub async fn retrieve_data(
        &self,
        vin: &str,
        data_type: &str,
        lookback_millis: u64,
    ) -> HashMap<String, Vec<String>> {
        tracing::info!(%vin, %data_type, lookback_millis, "Retrieving telemetry data");

        let values = self.fetch_values(vin, data_type, lookback_millis).await;

        HashMap::from([(data_type.to_string(), values)])
    }

    async fn fetch_values(&self, vin: &str, data_type: &str, lookback_millis: u64) -> Vec<String> {
        let request = build_request(vin, data_type, lookback_millis, Utc::now().timestamp_millis());

        let mut client = self.inner.clone();
        let stream = match client.get_telemetry_data(Request::new(request)).await {
            Ok(response) => response.into_inner(),
            Err(status) => {
                tracing::error!(
                    code = ?status.code(),
                    message = %status.message(),
                    "Data API call failed"
                );
                return Vec::new();
            }
        };

        drain_stream(stream).await
    }
}

/// Build the streaming query request.
///
/// Pure function of its inputs so the time-selector logic is unit
/// testable; `now_millis` is the caller's wall clock.
fn build_request(
    vin: &str,
    data_type: &str,
    lookback_millis: u64,
    now_millis: i64,
) -> GetTelemetryDataRequest {
    let time_selector = if lookback_millis == 0 {
        TimeSelector::Latest(true)
    } else {
        // Window bounds are expressed in whole seconds; sub-second
        // precision is truncated. Lookbacks beyond the i64 range clamp
        // instead of overflowing.
        let lookback = i64::try_from(lookback_millis).unwrap_or(i64::MAX);
        let start_seconds = now_millis.saturating_sub(lookback) / 1000;
        let end_seconds = now_millis / 1000;
        TimeSelector::TimeRange(TimeRange {
            start: Some(prost_types::Timestamp {
                seconds: start_seconds,
                nanos: 0,
            }),
            end: Some(prost_types::Timestamp {
                seconds: end_seconds,
                nanos: 0,
            }),
        })
    };

    GetTelemetryDataRequest {
        vehicle_id: vin.to_string(),
        data_types: vec![data_type.to_string()],
        time_selector: Some(time_selector),
    }
}

/// Drain a telemetry point stream into a flat value sequence.
///
/// Each point's value entries are decoded as UTF-8 text and appended in
/// stream order. Field names are logged but not retained in the result.
/// A mid-stream status error stops the drain and keeps the partial
/// sequence.
async fn drain_stream<S>(mut stream: S) -> Vec<String>
where
    S: Stream<Item = Result<TelemetryPoint, Status>> + Unpin,
{
    let mut values = Vec::new();

    while let Some(next) = stream.next().await {
        match next {
            Ok(point) => {
                for (field, raw) in &point.values {
                    let value = String::from_utf8_lossy(raw).into_owned();
                    tracing::debug!(%field, %value, "Telemetry data entry");
                    values.push(value);
                }
            }
            Err(status) => {
                tracing::error!(
                    code = ?status.code(),
                    message = %status.message(),
                    "Data API stream error, returning partial result"
                );
                break;
            }
        }
    }

    values
}

/// Errors that can occur when constructing the client.
///
/// Retrieval itself never returns an error: backend failures degrade to
/// an empty (or partial) result by design.
#[derive(Debug, thiserror::Error)]
pub enum DataApiClientError {
    /// The configured endpoint URL could not be parsed.
    #[error("Invalid Data API endpoint: {0}")]
    InvalidEndpoint(String),
}
