// Site configuration loaded from environment variables.
// Decision: Everything has a default so `cargo run` works with an empty environment

use axum::http::HeaderValue;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SITE_NAME: &str = "Meridian Consulting";
pub const DEFAULT_LOG_FILTER: &str = "meridian_site=debug,meridian_gate=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Listen address
    pub addr: String,
    /// Company name shown in page titles and the header
    pub site_name: String,
    /// Origins allowed to call the JSON API from a browser (empty: same-origin only)
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("SITE_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let site_name = lookup("SITE_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string());

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            addr,
            site_name,
            cors_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(|_| None);
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(config.site_name, "Meridian Consulting");
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = SiteConfig::from_lookup(|name| match name {
            "SITE_ADDR" => Some("127.0.0.1:8080".to_string()),
            "SITE_NAME" => Some("Acme Advisory".to_string()),
            "CORS_ALLOWED_ORIGINS" => {
                Some("https://a.example, https://b.example".to_string())
            }
            _ => None,
        });
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.site_name, "Acme Advisory");
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "https://b.example");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = SiteConfig::from_lookup(|name| match name {
            "SITE_NAME" => Some("   ".to_string()),
            "SITE_ADDR" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config, SiteConfig::default());
    }
}
