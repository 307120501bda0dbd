// Meridian site library
// Decision: Router assembly lives here so the binary and the integration tests build the same app

pub mod api;
pub mod assets;
pub mod config;
pub mod images;
pub mod pages;
pub mod request_id;
pub mod state;
pub mod telemetry;

use anyhow::{Context, Result};
use axum::{middleware, routing::get, Router};
use meridian_gate::{auth_gate, AuthConfig, GateState};

pub use config::SiteConfig;
pub use state::AppState;

use crate::{
    images::{ImageProxy, RemoteImagePolicy},
    pages::Templates,
    request_id::assign_request_id,
};

/// Page routes, including the provider's catch-all sign-in/sign-up paths.
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::marketing::home))
        .route("/about", get(pages::marketing::about))
        .route("/services", get(pages::marketing::services))
        .route("/contact", get(pages::marketing::contact))
        .route("/dashboard", get(pages::dashboard::dashboard))
        .route("/sign-in", get(pages::auth::sign_in))
        .route("/sign-in/*rest", get(pages::auth::sign_in))
        .route("/sign-up", get(pages::auth::sign_up))
        .route("/sign-up/*rest", get(pages::auth::sign_up))
}

fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/_assets/site.css", get(assets::stylesheet))
        .route("/_assets/widget.js", get(assets::widget_script))
        .route("/_assets/image", get(images::proxy_image))
}

/// Full router: pages, API and assets behind the auth gate.
pub fn build_router(state: AppState, gate: GateState) -> Router {
    Router::new()
        .merge(page_routes())
        .merge(api::routes())
        .merge(asset_routes())
        .fallback(pages::not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, auth_gate))
        .layer(middleware::from_fn(assign_request_id))
}

/// Build state and gate from configuration and return the ready router.
pub fn build_app(site: SiteConfig, auth: AuthConfig) -> Result<Router> {
    let templates = Templates::new().context("Failed to compile page templates")?;
    let images =
        ImageProxy::new(RemoteImagePolicy::default()).context("Failed to build image client")?;
    let gate = GateState::from_config(&auth).context("Failed to configure auth gate")?;

    tracing::info!(
        mode = %gate.mode(),
        protected = ?gate.protected().patterns(),
        widget_script = ?auth.widget_script_url,
        "Authentication gate configured"
    );
    if auth.is_enforced() && auth.widget_script_url.is_none() {
        tracing::warn!(
            "Publishable key does not encode a frontend host and AUTH_WIDGET_SCRIPT_URL is unset, sign-in widgets will not load"
        );
    }

    let state = AppState::new(site, auth, templates, images);
    Ok(build_router(state, gate))
}
