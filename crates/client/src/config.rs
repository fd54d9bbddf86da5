use reqwest::Url;

/// Endpoint used when `EVENTS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1/events";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the events endpoint.
    pub api_url: Url,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default                                |
    /// |------------------|----------------------------------------|
    /// | `EVENTS_API_URL` | `http://localhost:3000/api/v1/events`  |
    pub fn from_env() -> Self {
        let raw = std::env::var("EVENTS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let api_url = Url::parse(&raw).expect("EVENTS_API_URL must be a valid URL");
        Self { api_url }
    }

    /// Absolute URL of a stored image, resolved against the API origin.
    pub fn image_url(&self, relative: &str) -> Option<Url> {
        self.api_url
            .join(&format!("/{}", relative.trim_start_matches('/')))
            .ok()
    }
}
