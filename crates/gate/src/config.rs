// Authentication configuration loaded from environment variables.
// Decision: Follow the AUTH_ prefix for all auth config
// Decision: Default to demo mode; only a real publishable key enables enforcement

use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD},
    Engine as _,
};
use std::fmt;

pub const PUBLISHABLE_KEY_VAR: &str = "AUTH_PUBLISHABLE_KEY";
pub const JWT_KEY_VAR: &str = "AUTH_JWT_KEY";
pub const SIGN_IN_URL_VAR: &str = "AUTH_SIGN_IN_URL";
pub const SIGN_UP_URL_VAR: &str = "AUTH_SIGN_UP_URL";
pub const WIDGET_SCRIPT_URL_VAR: &str = "AUTH_WIDGET_SCRIPT_URL";

/// Substring marking a key copied from a template file.
pub const PLACEHOLDER_MARKER: &str = "placeholder";
/// Literal key shipped in sample environment files.
pub const PLACEHOLDER_KEY: &str = "pk_test_xxx";

/// Whether a publishable key is a real provider credential.
///
/// Absent, empty and placeholder keys all mean "not configured"; none of
/// them is an error.
pub fn is_auth_configured(key: Option<&str>) -> bool {
    match key {
        None => false,
        Some(key) => {
            !key.is_empty() && !key.contains(PLACEHOLDER_MARKER) && key != PLACEHOLDER_KEY
        }
    }
}

/// Gate operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// No credential configured: every route is public
    #[default]
    Demo,
    /// Real credential configured: protected routes require a session
    Enforced,
}

impl AuthMode {
    /// Resolve the mode from the publishable key. The only place sentinel
    /// values are interpreted.
    pub fn resolve(publishable_key: Option<&str>) -> Self {
        if is_auth_configured(publishable_key) {
            AuthMode::Enforced
        } else {
            AuthMode::Demo
        }
    }

    pub fn is_enforced(&self) -> bool {
        *self == AuthMode::Enforced
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Demo => "demo",
            AuthMode::Enforced => "enforced",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode the provider frontend host embedded in a publishable key.
///
/// Keys look like `pk_live_<base64("clerk.example.com$")>`. Returns `None`
/// for keys that do not follow that shape.
pub fn frontend_api_host(publishable_key: &str) -> Option<String> {
    let encoded = publishable_key
        .strip_prefix("pk_live_")
        .or_else(|| publishable_key.strip_prefix("pk_test_"))?;

    let bytes = STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let host = decoded.strip_suffix('$')?;

    let valid = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    valid.then(|| host.to_string())
}

/// Widget loader URL served by the provider's frontend host.
pub fn widget_script_url(host: &str) -> String {
    format!("https://{}/npm/@clerk/clerk-js@5/dist/clerk.browser.js", host)
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Resolved gate mode
    pub mode: AuthMode,
    /// Provider publishable key, exposed to pages
    pub publishable_key: Option<String>,
    /// PEM public key for networkless session verification
    pub jwt_key: Option<String>,
    /// Where unauthenticated page requests are sent
    pub sign_in_url: String,
    pub sign_up_url: String,
    /// Widget loader script, explicit or derived from the key
    pub widget_script_url: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Demo,
            publishable_key: None,
            jwt_key: None,
            sign_in_url: "/sign-in".to_string(),
            sign_up_url: "/sign-up".to_string(),
            widget_script_url: None,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let publishable_key = lookup(PUBLISHABLE_KEY_VAR);
        let mode = AuthMode::resolve(publishable_key.as_deref());

        let jwt_key = lookup(JWT_KEY_VAR).filter(|s| !s.trim().is_empty());

        let sign_in_url = lookup(SIGN_IN_URL_VAR)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "/sign-in".to_string());
        let sign_up_url = lookup(SIGN_UP_URL_VAR)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "/sign-up".to_string());

        let widget_script_url = lookup(WIDGET_SCRIPT_URL_VAR)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                publishable_key
                    .as_deref()
                    .filter(|_| mode.is_enforced())
                    .and_then(frontend_api_host)
                    .map(|host| widget_script_url(&host))
            });

        Self {
            mode,
            publishable_key,
            jwt_key,
            sign_in_url,
            sign_up_url,
            widget_script_url,
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.mode.is_enforced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_probe_rejects_missing_and_placeholder_keys() {
        assert!(!is_auth_configured(None));
        assert!(!is_auth_configured(Some("")));
        assert!(!is_auth_configured(Some("pk_test_xxx")));
        assert!(!is_auth_configured(Some("placeholder")));
        assert!(!is_auth_configured(Some("pk_test_placeholder_key")));
        assert!(!is_auth_configured(Some("your-placeholder-here")));
    }

    #[test]
    fn test_probe_accepts_real_keys() {
        assert!(is_auth_configured(Some("pk_live_abc123realkey")));
        assert!(is_auth_configured(Some("pk_test_abc")));
        // Only the exact sentinel literal is rejected
        assert!(is_auth_configured(Some("pk_test_xxxx")));
        assert!(is_auth_configured(Some(" pk_test_xxx")));
        // Marker match is case-sensitive
        assert!(is_auth_configured(Some("pk_test_PLACEHOLDER")));
    }

    #[test]
    fn test_mode_resolution() {
        assert_eq!(AuthMode::resolve(None), AuthMode::Demo);
        assert_eq!(AuthMode::resolve(Some("pk_test_xxx")), AuthMode::Demo);
        assert_eq!(
            AuthMode::resolve(Some("pk_live_abc123realkey")),
            AuthMode::Enforced
        );
        assert_eq!(AuthMode::default(), AuthMode::Demo);
        assert_eq!(AuthMode::Enforced.to_string(), "enforced");
        assert_eq!(AuthMode::Demo.as_str(), "demo");
    }

    #[test]
    fn test_frontend_api_host_decoding() {
        let encoded = STANDARD.encode("clerk.meridian.example$");
        let key = format!("pk_live_{}", encoded);
        assert_eq!(
            frontend_api_host(&key).as_deref(),
            Some("clerk.meridian.example")
        );

        let unpadded = STANDARD_NO_PAD.encode("accounts.dev$");
        let key = format!("pk_test_{}", unpadded);
        assert_eq!(frontend_api_host(&key).as_deref(), Some("accounts.dev"));
    }

    #[test]
    fn test_frontend_api_host_rejects_opaque_keys() {
        assert_eq!(frontend_api_host("pk_live_abc123realkey"), None);
        assert_eq!(frontend_api_host("sk_live_abc"), None);
        assert_eq!(frontend_api_host("pk_test_xxx"), None);
        // Missing "$" terminator
        let key = format!("pk_live_{}", STANDARD.encode("clerk.example"));
        assert_eq!(frontend_api_host(&key), None);
    }

    #[test]
    fn test_default_config_is_demo() {
        let config = AuthConfig::from_lookup(lookup(&[]));
        assert_eq!(config.mode, AuthMode::Demo);
        assert!(!config.is_enforced());
        assert_eq!(config.sign_in_url, "/sign-in");
        assert_eq!(config.sign_up_url, "/sign-up");
        assert!(config.widget_script_url.is_none());
        assert!(config.jwt_key.is_none());
    }

    #[test]
    fn test_enforced_config_derives_widget_url() {
        let key = format!("pk_live_{}", STANDARD.encode("clerk.meridian.example$"));
        let config = AuthConfig::from_lookup(lookup(&[
            (PUBLISHABLE_KEY_VAR, key.as_str()),
            (SIGN_IN_URL_VAR, "/login"),
        ]));
        assert_eq!(config.mode, AuthMode::Enforced);
        assert_eq!(config.sign_in_url, "/login");
        assert_eq!(
            config.widget_script_url.as_deref(),
            Some("https://clerk.meridian.example/npm/@clerk/clerk-js@5/dist/clerk.browser.js")
        );
    }

    #[test]
    fn test_explicit_widget_url_wins() {
        let config = AuthConfig::from_lookup(lookup(&[
            (PUBLISHABLE_KEY_VAR, "pk_live_abc123realkey"),
            (WIDGET_SCRIPT_URL_VAR, "https://cdn.example/widget.js"),
            (JWT_KEY_VAR, "   "),
        ]));
        assert!(config.is_enforced());
        assert_eq!(
            config.widget_script_url.as_deref(),
            Some("https://cdn.example/widget.js")
        );
        assert!(config.jwt_key.is_none(), "blank key counts as unset");
    }

    #[test]
    fn test_placeholder_key_never_derives_widget_url() {
        let config = AuthConfig::from_lookup(lookup(&[(PUBLISHABLE_KEY_VAR, "pk_test_placeholder")]));
        assert_eq!(config.mode, AuthMode::Demo);
        assert!(config.widget_script_url.is_none());
    }
}
