// Protected-route matcher
// Decision: Patterns are literal paths with an optional "(.*)" suffix, compiled to anchored regexes
// Decision: Case-sensitive, no normalization; callers pass only the path component

use regex::Regex;

use crate::error::GateError;

/// Wildcard suffix meaning "this path or anything after it".
pub const WILDCARD_SUFFIX: &str = "(.*)";

/// Routes that require a session when the gate is enforced.
pub const PROTECTED_PATTERNS: [&str; 4] = [
    "/dashboard(.*)",
    "/api/accounts(.*)",
    "/api/transactions(.*)",
    "/api/profile(.*)",
];

/// A compiled set of route patterns. Any pattern matching is a match.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    patterns: Vec<String>,
    compiled: Vec<Regex>,
}

impl RouteMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let compiled = patterns
            .iter()
            .map(|pattern| compile_pattern(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns, compiled })
    }

    /// The dashboard area and the accounts, transactions and profile APIs.
    pub fn protected() -> Result<Self, GateError> {
        Self::new(PROTECTED_PATTERNS)
    }

    pub fn matches(&self, path: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(path))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, GateError> {
    let source = match pattern.strip_suffix(WILDCARD_SUFFIX) {
        Some(prefix) => format!("^{}(.*)$", regex::escape(prefix)),
        None => format!("^{}$", regex::escape(pattern)),
    };

    Regex::new(&source).map_err(|source| GateError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
