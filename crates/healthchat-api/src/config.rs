use std::env;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "HEALTHCHAT_API_URL";

/// Local development backend
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Backend location, resolved once and handed to the transports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_api_url(base_url),
        }
    }

    /// Read `HEALTHCHAT_API_URL`, falling back to the local default when it
    /// is unset or blank
    pub fn from_env() -> Self {
        Self::from_optional(env::var(API_URL_ENV).ok().as_deref())
    }

    pub fn from_optional(url: Option<&str>) -> Self {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::new(DEFAULT_API_URL),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Normalize a base URL: trim whitespace and trailing slashes, and assume
/// `http://` when no scheme is given
pub fn normalize_api_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_trailing_slashes() {
        assert_eq!(normalize_api_url("https://api.example.com//"), "https://api.example.com");
    }

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize_api_url(" localhost:5000 "), "http://localhost:5000");
    }

    #[test]
    fn test_missing_or_blank_url_uses_default() {
        assert_eq!(ApiConfig::from_optional(None).base_url, DEFAULT_API_URL);
        assert_eq!(ApiConfig::from_optional(Some("   ")).base_url, DEFAULT_API_URL);
        assert_eq!(ApiConfig::default().base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_explicit_url_is_normalized() {
        let config = ApiConfig::from_optional(Some("https://health.onrender.com/"));
        assert_eq!(config.base_url, "https://health.onrender.com");
    }
}
