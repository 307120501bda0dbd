// Meridian authentication gate
// Decision: Mode resolution, route matching and session checks are plain functions/types;
// the axum middleware in `gate` is the only place they meet a request.

pub mod config;
pub mod delegate;
pub mod error;
pub mod gate;
pub mod routes;
pub mod scope;
pub mod session;

pub use config::{is_auth_configured, AuthConfig, AuthMode};
pub use delegate::{AuthDelegate, DelegateContext, Disposition, ProviderDelegate};
pub use error::{DelegateError, ErrorResponse, GateError, SessionError};
pub use gate::{auth_gate, CurrentSession, GateState};
pub use routes::RouteMatcher;
pub use scope::GateScope;
pub use session::{SessionClaims, SessionVerifier};
