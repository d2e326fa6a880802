//! Client Configuration
//!
//! Compile-time API host and the fixed timings used by the screens.

use std::time::Duration;

/// API host used for local development builds
pub const LOCAL_API_URL: &str = "http://localhost:8000";

/// Build-time override for deployed builds
const BUILD_API_URL: Option<&str> = option_env!("TASKFLOW_API_URL");

/// Pause before a post-success redirect so the confirmation can be read
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Seconds the resend-OTP action stays disabled after a successful send
pub const OTP_RESEND_COOLDOWN_SECS: u32 = 30;

/// Endpoint layout of the external API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Host captured at build time, falling back to the local API
    pub fn from_build_env() -> Self {
        match BUILD_API_URL {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(LOCAL_API_URL),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/auth/{path}`
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `{base}/api/tasks/{path}`; an empty path yields the collection URL
    pub fn tasks_url(&self, path: &str) -> String {
        format!("{}/api/tasks/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Full-page OAuth entry point
    pub fn google_oauth_url(&self) -> String {
        self.auth_url("google")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_normalised() {
        let config = ApiConfig::new("https://api.example.com/ ");
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.auth_url("login"), "https://api.example.com/auth/login");
    }

    #[test]
    fn test_task_urls() {
        let config = ApiConfig::new(LOCAL_API_URL);
        assert_eq!(config.tasks_url(""), "http://localhost:8000/api/tasks/");
        assert_eq!(config.tasks_url("abc/status"), "http://localhost:8000/api/tasks/abc/status");
    }

    #[test]
    fn test_google_oauth_url() {
        let config = ApiConfig::new(LOCAL_API_URL);
        assert_eq!(config.google_oauth_url(), "http://localhost:8000/auth/google");
    }
}
