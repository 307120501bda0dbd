//! Remote image allowlist and proxy.
//!
//! Pages reference third-party imagery through `/_assets/image?url=...` so
//! that only allow-listed hosts can be fetched on the site's behalf.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use meridian_gate::ErrorResponse;
use serde::Deserialize;
use thiserror::Error;
use reqwest::redirect::Policy;
use url::Url;

use crate::state::AppState;

/// Hosts images may be loaded from.
pub const ALLOWED_IMAGE_HOSTS: [&str; 2] = ["images.unsplash.com", "img.clerk.com"];

/// Largest image body the proxy will relay.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const MAX_REDIRECTS: usize = 5;
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("invalid image url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("image scheme {0:?} is not allowed")]
    Scheme(String),

    #[error("image host {0:?} is not allowed")]
    Host(String),

    #[error("image fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("image upstream returned {0}")]
    Upstream(StatusCode),

    #[error("image redirect rejected: {0}")]
    Redirect(String),

    #[error("image exceeds {0} bytes")]
    TooLarge(usize),

    #[error("upstream content type {0:?} is not an image")]
    ContentType(String),
}

impl IntoResponse for ImageError {
    fn into_response(self) -> Response {
        let status = match self {
            ImageError::InvalidUrl(_) | ImageError::Scheme(_) | ImageError::Host(_) => {
                StatusCode::BAD_REQUEST
            }
            ImageError::Fetch(_)
            | ImageError::Upstream(_)
            | ImageError::Redirect(_)
            | ImageError::TooLarge(_)
            | ImageError::ContentType(_) => {
                tracing::warn!(error = %self, "Image proxy upstream failure");
                StatusCode::BAD_GATEWAY
            }
        };
        ErrorResponse::new(self.to_string()).with_status(status)
    }
}

/// One allowed remote source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePattern {
    pub protocol: &'static str,
    pub hostname: &'static str,
}

#[derive(Debug, Clone)]
pub struct RemoteImagePolicy {
    patterns: Vec<RemotePattern>,
}

impl Default for RemoteImagePolicy {
    fn default() -> Self {
        Self {
            patterns: ALLOWED_IMAGE_HOSTS
                .iter()
                .map(|&hostname| RemotePattern {
                    protocol: "https",
                    hostname,
                })
                .collect(),
        }
    }
}

impl RemoteImagePolicy {
    pub fn new(patterns: Vec<RemotePattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[RemotePattern] {
        &self.patterns
    }

    /// Parse `raw` and accept it only if scheme and host are allow-listed.
    pub fn check(&self, raw: &str) -> Result<Url, ImageError> {
        let url = Url::parse(raw)?;
        let host = url.host_str().unwrap_or_default();

        let host_allowed = self.patterns.iter().any(|p| p.hostname == host);
        if !host_allowed {
            return Err(ImageError::Host(host.to_string()));
        }
        let scheme_allowed = self
            .patterns
            .iter()
            .any(|p| p.hostname == host && p.protocol == url.scheme());
        if !scheme_allowed {
            return Err(ImageError::Scheme(url.scheme().to_string()));
        }

        Ok(url)
    }
}

/// Redirect policy that re-applies the allowlist to every hop.
fn redirect_policy(policy: RemoteImagePolicy) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error(ImageError::Redirect("too many redirects".to_string()));
        }
        match policy.check(attempt.url().as_str()) {
            Ok(_) => attempt.follow(),
            Err(e) => attempt.error(e),
        }
    })
}

/// Allow-list plus the shared HTTP client used to fetch images.
#[derive(Debug, Clone)]
pub struct ImageProxy {
    policy: RemoteImagePolicy,
    client: reqwest::Client,
    max_bytes: usize,
}

impl ImageProxy {
    pub fn new(policy: RemoteImagePolicy) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(redirect_policy(policy.clone()))
            .build()?;
        Ok(Self {
            policy,
            client,
            max_bytes: MAX_IMAGE_BYTES,
        })
    }

    /// Override the body size cap.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn policy(&self) -> &RemoteImagePolicy {
        &self.policy
    }

    async fn fetch(&self, raw: &str) -> Result<Response, ImageError> {
        let url = self.policy.check(raw)?;

        let mut upstream = self.client.get(url).send().await.map_err(|e| {
            if e.is_redirect() {
                let reason = std::error::Error::source(&e)
                    .map(|source| source.to_string())
                    .unwrap_or_else(|| e.to_string());
                ImageError::Redirect(reason)
            } else {
                ImageError::Fetch(e)
            }
        })?;
        let status = upstream.status();
        if !status.is_success() {
            return Err(ImageError::Upstream(status));
        }

        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
        let is_image = content_type
            .to_str()
            .map(|value| value.trim_start().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            let shown = String::from_utf8_lossy(content_type.as_bytes()).into_owned();
            return Err(ImageError::ContentType(shown));
        }

        if upstream
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(ImageError::TooLarge(self.max_bytes));
        }

        // Content-Length may be absent or wrong, so the cap is enforced while reading too.
        let mut bytes = Vec::new();
        while let Some(chunk) = upstream.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(ImageError::TooLarge(self.max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok((
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
            ],
            bytes,
        )
            .into_response())
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub url: String,
}

/// GET /_assets/image?url=...
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Response, ImageError> {
    state.images.fetch(&query.url).await
}
