use vts_client::DataApiClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the client shares its underlying channel.
#[derive(Clone)]
pub struct AppState {
    /// Data API gRPC client (shared channel, per-call multiplexing).
    pub data_api: DataApiClient,
}
