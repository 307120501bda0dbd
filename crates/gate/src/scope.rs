//! Which requests the gate looks at.
//!
//! Internal asset paths and static files are served without a gate
//! decision. API-like prefixes are always gated, whatever their extension.

/// Prefix for site-internal assets (stylesheets, the image proxy).
pub const INTERNAL_PREFIX: &str = "/_assets";

/// Prefixes that are always gated.
pub const API_PREFIXES: [&str; 2] = ["/api", "/trpc"];

/// File extensions treated as static assets. `json` is deliberately absent.
pub const STATIC_EXTENSIONS: [&str; 21] = [
    "html",
    "htm",
    "css",
    "js",
    "jpg",
    "jpeg",
    "webp",
    "png",
    "gif",
    "svg",
    "ttf",
    "woff",
    "woff2",
    "ico",
    "csv",
    "doc",
    "docx",
    "xls",
    "xlsx",
    "zip",
    "webmanifest",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct GateScope;

impl GateScope {
    pub fn applies(path: &str) -> bool {
        if API_PREFIXES.iter().any(|prefix| has_segment_prefix(path, prefix)) {
            return true;
        }
        if path.starts_with(INTERNAL_PREFIX) {
            return false;
        }
        !is_static_asset(path)
    }
}

/// `/api`, `/api/...` and `/api?...`, but not `/apix`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

fn is_static_asset(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    let last_segment = path.rsplit('/').next().unwrap_or(path);

    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            STATIC_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_in_scope() {
        assert!(GateScope::applies("/"));
        assert!(GateScope::applies("/about"));
        assert!(GateScope::applies("/dashboard"));
        assert!(GateScope::applies("/dashboard/settings"));
        assert!(GateScope::applies("/sign-in"));
    }

    #[test]
    fn test_internal_and_static_paths_are_skipped() {
        assert!(!GateScope::applies("/_assets/site.css"));
        assert!(!GateScope::applies("/_assets/image"));
        assert!(!GateScope::applies("/favicon.ico"));
        assert!(!GateScope::applies("/images/hero.PNG"));
        assert!(!GateScope::applies("/fonts/inter.woff2"));
        assert!(!GateScope::applies("/site.webmanifest"));
        assert!(!GateScope::applies("/dashboard/export.csv"));
    }

    #[test]
    fn test_json_and_dotfiles_stay_in_scope() {
        assert!(GateScope::applies("/data/report.json"));
        assert!(GateScope::applies("/.well-known"));
        assert!(GateScope::applies("/releases/v1.2"));
    }

    #[test]
    fn test_api_prefixes_always_in_scope() {
        assert!(GateScope::applies("/api"));
        assert!(GateScope::applies("/api/accounts/1"));
        assert!(GateScope::applies("/api/export/report.csv"));
        assert!(GateScope::applies("/trpc/accounts.list"));
        assert!(GateScope::applies("/trpc"));
    }

    #[test]
    fn test_api_prefix_needs_segment_boundary() {
        assert!(!GateScope::applies("/apidocs/logo.svg"));
        assert!(GateScope::applies("/apidocs"));
    }
}
