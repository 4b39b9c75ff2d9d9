/// Data API client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct DataApiConfig {
    /// Backend endpoint URL (default: `http://localhost:8080`).
    pub endpoint: String,
    /// Optional username presented to the backend.
    pub username: Option<String>,
    /// Optional password presented to the backend. Never logged.
    pub password: Option<String>,
}

impl DataApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                 |
    /// |---------------------|-------------------------|
    /// | `DATA_API_URL`      | `http://localhost:8080` |
    /// | `DATA_API_USERNAME` | unset                   |
    /// | `DATA_API_PASSWORD` | unset                   |
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("DATA_API_URL").unwrap_or_else(|_| "http://localhost:8080".into());

        let username = std::env::var("DATA_API_USERNAME").ok();
        let password = std::env::var("DATA_API_PASSWORD").ok();

        Self {
            endpoint,
            username,
            password,
        }
    }
}
