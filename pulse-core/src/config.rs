/// Environment variable naming the analytics API base URL.
pub const API_URL_ENV: &str = "DECISIONPULSE_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const UPLOAD_PATH: &str = "/upload-data";
pub const HEALTH_PATH: &str = "/health";

/// Where the analytics API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    /// Build from an optional override, e.g. a CLI flag or `option_env!`.
    pub fn from_override(base_url: Option<&str>) -> Self {
        Self::new(base_url.unwrap_or(DEFAULT_API_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, HEALTH_PATH)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
