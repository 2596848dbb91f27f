use healthchat_api::{normalize_api_url, DEFAULT_API_URL};

/// Backend base URL, fixed at build time through `HEALTHCHAT_API_URL`
pub fn api_base_url() -> String {
    match option_env!("HEALTHCHAT_API_URL") {
        Some(url) if !url.trim().is_empty() => normalize_api_url(url),
        _ => DEFAULT_API_URL.to_string(),
    }
}

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'> & co"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt; &amp; co"
        );
    }

    #[test]
    fn test_api_base_url_has_scheme() {
        assert!(api_base_url().starts_with("http"));
    }
}
