// Authentication delegate
// Decision: The provider's middleware sits behind a trait so the gate never depends on one vendor
// Decision: Page requests are redirected to sign-in, everything else gets 401

use async_trait::async_trait;
use axum::{
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    config::AuthConfig,
    error::{DelegateError, ErrorResponse, GateError, SessionError},
    routes::RouteMatcher,
    session::{extract_session_token, SessionClaims, SessionVerifier},
};

/// Per-request execution context handed to the delegate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegateContext {
    /// Request correlation id, when one is known
    pub request_id: Option<String>,
}

/// What the delegate decided about a request.
#[derive(Debug)]
pub enum Disposition {
    /// Let the request through, with the session if one was resolved
    Continue(Option<SessionClaims>),
    /// Answer the request without running the handler
    Reject(Response),
}

/// The external provider's request handling, invoked only in enforced mode.
#[async_trait]
pub trait AuthDelegate: Send + Sync {
    async fn authorize(
        &self,
        parts: &Parts,
        context: DelegateContext,
        protected: &RouteMatcher,
    ) -> Result<Disposition, DelegateError>;
}

/// Delegate that verifies provider session tokens and protects matched routes.
#[derive(Debug, Clone)]
pub struct ProviderDelegate {
    verifier: Option<SessionVerifier>,
    sign_in_url: String,
}

impl ProviderDelegate {
    pub fn new(verifier: Option<SessionVerifier>, sign_in_url: impl Into<String>) -> Self {
        Self {
            verifier,
            sign_in_url: sign_in_url.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, GateError> {
        let verifier = match config.jwt_key.as_deref() {
            Some(pem) => Some(SessionVerifier::from_rsa_pem(pem)?),
            None => {
                if config.is_enforced() {
                    tracing::warn!(
                        "AUTH_JWT_KEY not set, every session will be treated as signed out"
                    );
                }
                None
            }
        };

        Ok(Self::new(verifier, config.sign_in_url.clone()))
    }

    /// Verify a session token with the configured key.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, SessionError> {
        self.verifier
            .as_ref()
            .ok_or(SessionError::NoKey)?
            .verify(token)
    }

    /// Resolve the caller's session. Invalid tokens count as signed out.
    pub fn resolve_session(&self, parts: &Parts) -> Option<SessionClaims> {
        let token = extract_session_token(&parts.headers)?;

        match self.verify_token(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                None
            }
        }
    }

    /// Response for an unauthenticated request to a protected route.
    pub fn protect(&self, parts: &Parts) -> Response {
        if wants_document(parts) {
            let return_to = parts
                .uri
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or_else(|| parts.uri.path());
            let encoded: String = url::form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
            let separator = if self.sign_in_url.contains('?') { '&' } else { '?' };
            let location = format!("{}{}redirect_url={}", self.sign_in_url, separator, encoded);
            return Redirect::temporary(&location).into_response();
        }

        ErrorResponse::new("Unauthenticated").with_status(StatusCode::UNAUTHORIZED)
    }
}

#[async_trait]
impl AuthDelegate for ProviderDelegate {
    async fn authorize(
        &self,
        parts: &Parts,
        context: DelegateContext,
        protected: &RouteMatcher,
    ) -> Result<Disposition, DelegateError> {
        let session = self.resolve_session(parts);
        let path = parts.uri.path();

        if session.is_none() && protected.matches(path) {
            tracing::debug!(
                path = %path,
                request_id = ?context.request_id,
                "Protected route requested without a session"
            );
            return Ok(Disposition::Reject(self.protect(parts)));
        }

        Ok(Disposition::Continue(session))
    }
}

fn wants_document(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &[u8] = b"delegate-test-secret";

    fn parts(uri: &str, accept: Option<&str>, token: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(accept) = accept {
            builder = builder.header(header::ACCEPT, accept);
        }
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("__session={}", token));
        }
        builder.body(Body::empty()).unwrap().into_parts().0
    }

    fn token() -> String {
        let claims = SessionClaims {
            sub: "user_42".to_string(),
            sid: None,
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            iat: Utc::now().timestamp(),
            email: None,
            name: Some("Grace".to_string()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    fn delegate() -> ProviderDelegate {
        ProviderDelegate::new(Some(SessionVerifier::from_secret(SECRET)), "/sign-in")
    }

    #[tokio::test]
    async fn test_protected_page_redirects_to_sign_in() {
        let protected = RouteMatcher::protected().unwrap();
        let parts = parts("/dashboard?tab=usage", Some("text/html,application/xhtml+xml"), None);

        let disposition = delegate()
            .authorize(&parts, DelegateContext::default(), &protected)
            .await
            .unwrap();

        let Disposition::Reject(response) = disposition else {
            panic!("expected rejection");
        };
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/sign-in?redirect_url=%2Fdashboard%3Ftab%3Dusage"
        );
    }

    #[tokio::test]
    async fn test_protected_api_returns_401() {
        let protected = RouteMatcher::protected().unwrap();
        let parts = parts("/api/accounts/1", Some("application/json"), None);

        let disposition = delegate()
            .authorize(&parts, DelegateContext::default(), &protected)
            .await
            .unwrap();

        let Disposition::Reject(response) = disposition else {
            panic!("expected rejection");
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_session_continues_with_claims() {
        let protected = RouteMatcher::protected().unwrap();
        let token = token();
        let parts = parts("/dashboard", Some("text/html"), Some(&token));

        let disposition = delegate()
            .authorize(&parts, DelegateContext::default(), &protected)
            .await
            .unwrap();

        match disposition {
            Disposition::Continue(Some(claims)) => assert_eq!(claims.sub, "user_42"),
            other => panic!("unexpected disposition: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_public_route_never_protected() {
        let protected = RouteMatcher::protected().unwrap();
        let parts = parts("/about", Some("text/html"), Some("garbage-token"));

        let disposition = delegate()
            .authorize(&parts, DelegateContext::default(), &protected)
            .await
            .unwrap();

        assert!(matches!(disposition, Disposition::Continue(None)));
    }

    #[tokio::test]
    async fn test_without_verifier_everyone_is_signed_out() {
        let protected = RouteMatcher::protected().unwrap();
        let delegate = ProviderDelegate::new(None, "/sign-in");
        let token = token();
        let parts = parts("/api/profile", None, Some(&token));

        let disposition = delegate
            .authorize(&parts, DelegateContext::default(), &protected)
            .await
            .unwrap();

        assert!(matches!(disposition, Disposition::Reject(_)));
    }

    #[test]
    fn test_verify_token_without_key() {
        let delegate = ProviderDelegate::new(None, "/sign-in");
        assert!(matches!(
            delegate.verify_token(&token()),
            Err(SessionError::NoKey)
        ));
        assert_eq!(self::delegate().verify_token(&token()).unwrap().sub, "user_42");
    }

    #[test]
    fn test_redirect_appends_to_existing_query() {
        let delegate = ProviderDelegate::new(None, "https://accounts.example/sign-in?lang=en");
        let response = delegate.protect(&parts("/dashboard", Some("text/html"), None));
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://accounts.example/sign-in?lang=en&redirect_url=%2Fdashboard"
        );
    }

    #[test]
    fn test_from_config_without_key() {
        let config = AuthConfig::default();
        let delegate = ProviderDelegate::from_config(&config).unwrap();
        assert!(delegate.verifier.is_none());
        assert_eq!(delegate.sign_in_url, "/sign-in");
    }
}
