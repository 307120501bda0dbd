// Request gate middleware
// Decision: Demo mode forwards every request untouched and never calls the delegate
// Decision: Enforced mode makes exactly one delegate call per in-scope request, no retry
// Decision: Delegate failures surface as a plain 500, the same as any unhandled handler error

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{convert::Infallible, sync::Arc};

use crate::{
    config::{AuthConfig, AuthMode},
    delegate::{AuthDelegate, DelegateContext, Disposition, ProviderDelegate},
    error::GateError,
    routes::RouteMatcher,
    scope::GateScope,
    session::SessionClaims,
};

/// Gate state shared across requests
#[derive(Clone)]
pub struct GateState {
    mode: AuthMode,
    protected: Arc<RouteMatcher>,
    delegate: Arc<dyn AuthDelegate>,
}

impl GateState {
    pub fn new(mode: AuthMode, protected: RouteMatcher, delegate: Arc<dyn AuthDelegate>) -> Self {
        Self {
            mode,
            protected: Arc::new(protected),
            delegate,
        }
    }

    /// Gate backed by the provider delegate and the fixed protected routes.
    pub fn from_config(config: &AuthConfig) -> Result<Self, GateError> {
        let delegate = ProviderDelegate::from_config(config)?;
        Ok(Self::new(
            config.mode,
            RouteMatcher::protected()?,
            Arc::new(delegate),
        ))
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn protected(&self) -> &RouteMatcher {
        &self.protected
    }
}

/// Axum middleware deciding pass-through vs. delegation for each request.
pub async fn auth_gate(State(state): State<GateState>, request: Request, next: Next) -> Response {
    if !GateScope::applies(request.uri().path()) {
        return next.run(request).await;
    }

    match state.mode {
        AuthMode::Demo => next.run(request).await,
        AuthMode::Enforced => {
            let (mut parts, body) = request.into_parts();

            // The delegate gets an empty context, not this request's id.
            let outcome = state
                .delegate
                .authorize(&parts, DelegateContext::default(), &state.protected)
                .await;

            match outcome {
                Ok(Disposition::Continue(session)) => {
                    if let Some(claims) = session {
                        parts.extensions.insert(claims);
                    }
                    next.run(Request::from_parts(parts, body)).await
                }
                Ok(Disposition::Reject(response)) => response,
                Err(e) => {
                    tracing::error!(error = %e, path = %parts.uri.path(), "Auth delegate failed");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    }
}

/// Session resolved by the gate, if any. Always `None` in demo mode.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<SessionClaims>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(parts.extensions.get::<SessionClaims>().cloned()))
    }
}
