use std::pin::Pin;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use futures::Stream;
use http_body_util::BodyExt;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Response, Status};
use tower::ServiceExt;

use vts_api::config::ServerConfig;
use vts_api::router::build_app_router;
use vts_api::state::AppState;
use vts_client::{DataApiClient, DataApiConfig};
use vts_proto::telemetry_data_api_server::{TelemetryDataApi, TelemetryDataApiServer};
use vts_proto::{GetTelemetryDataRequest, TelemetryPoint};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build a `DataApiClient` against the given endpoint (lazy channel, so
/// the endpoint does not need to be reachable).
pub fn test_client(endpoint: &str) -> DataApiClient {
    let config = DataApiConfig {
        endpoint: endpoint.to_string(),
        username: None,
        password: None,
    };
    DataApiClient::connect(&config).expect("valid test endpoint")
}

/// Build the full application router with all middleware layers.
///
/// Uses the production `build_app_router` so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(data_api: DataApiClient) -> Router {
    let config = test_config();
    let state = AppState { data_api };
    build_app_router(state, &config)
}

/// Build a telemetry point from `(field, raw value)` entries.
pub fn point(entries: &[(&str, &[u8])]) -> TelemetryPoint {
    TelemetryPoint {
        timestamp: None,
        values: entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect(),
    }
}

/// In-process mock Data API backend.
///
/// Streams the configured points (then the optional trailing error) for
/// every query, and records each request it sees so tests can assert on
/// the time selector the sampler sent.
pub struct MockDataApi {
    pub points: Vec<TelemetryPoint>,
    pub trailing_error: Option<Status>,
    pub seen_requests: Arc<Mutex<Vec<GetTelemetryDataRequest>>>,
}

impl MockDataApi {
    pub fn with_points(points: Vec<TelemetryPoint>) -> Self {
        Self {
            points,
            trailing_error: None,
            seen_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[tonic::async_trait]
impl TelemetryDataApi for MockDataApi {
    type GetTelemetryDataStream =
        Pin<Box<dyn Stream<Item = Result<TelemetryPoint, Status>> + Send>>;

    async fn get_telemetry_data(
        &self,
        request: tonic::Request<GetTelemetryDataRequest>,
    ) -> Result<Response<Self::GetTelemetryDataStream>, Status> {
        self.seen_requests.lock().unwrap().push(request.into_inner());

        let mut items: Vec<Result<TelemetryPoint, Status>> =
            self.points.iter().cloned().map(Ok).collect();
        if let Some(status) = &self.trailing_error {
            items.push(Err(status.clone()));
        }

        Ok(Response::new(Box::pin(futures::stream::iter(items))))
    }
}

/// Spawn the mock backend on an ephemeral port and return its URL.
pub async fn spawn_mock_backend(mock: MockDataApi) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(TelemetryDataApiServer::new(mock))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("mock backend crashed");
    });

    format!("http://{addr}")
}

/// Issue a GET request against the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
