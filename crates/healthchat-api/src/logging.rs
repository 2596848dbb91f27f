// Request logging shared by every transport
use serde_json::Value;

use crate::transport::ApiError;

/// Longest body excerpt written to the debug log
const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Log an outgoing request at debug level
pub fn log_request(url: &str, body: &Value) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    log::debug!(
        "POST {} body={}",
        url,
        safe_truncate(&body.to_string(), MAX_LOGGED_BODY_CHARS)
    );
}

/// Log a received response at debug level
pub fn log_response(url: &str, status: u16, body: &str) {
    log::debug!(
        "{} -> {} body={}",
        url,
        status,
        safe_truncate(body, MAX_LOGGED_BODY_CHARS)
    );
}

pub fn log_failure(url: &str, err: &ApiError) {
    match err.status() {
        Some(status) => log::warn!("{} failed with status {}: {}", url, status, err),
        None => log::warn!("{} failed: {}", url, err),
    }
}
