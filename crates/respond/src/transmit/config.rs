//! Header-configuration collaborator.
//!
//! Supplied by the surrounding server, read-only from this crate's
//! perspective. Default headers are merged into a response on its first
//! send, and only when the response has not already set that header name.

use serde::{Deserialize, Serialize};

/// Header configuration merged into responses at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderSettings {
    /// Headers injected when not explicitly set by the caller before the
    /// first send. Name comparison is case-insensitive.
    #[serde(default)]
    pub default_headers: Vec<(String, String)>,

    /// Whether an explicit `Content-Length` header is added at all for
    /// non-chunked responses. When enabled, a bodyless response declares
    /// `Content-Length: 0` unless the caller pre-set a length.
    #[serde(default = "default_include_content_length")]
    pub include_content_length: bool,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self { default_headers: Vec::new(), include_content_length: true }
    }
}

fn default_include_content_length() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = HeaderSettings::default();
        assert!(settings.default_headers.is_empty());
        assert!(settings.include_content_length);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let settings: HeaderSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.include_content_length);

        let settings: HeaderSettings = serde_json::from_str(
            r#"{"default_headers": [["Server", "micro-respond"]], "include_content_length": false}"#,
        )
        .unwrap();
        assert_eq!(settings.default_headers, vec![("Server".to_string(), "micro-respond".to_string())]);
        assert!(!settings.include_content_length);
    }
}
