//! Server-rendered pages.
//!
//! Templates are compiled once at startup into a shared minijinja
//! environment. Every page extends `base.html`, which receives a [`Layout`]
//! and the page's own data under `page`.

pub mod auth;
pub mod dashboard;
pub mod marketing;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use meridian_gate::{CurrentSession, SessionClaims};
use minijinja::{context, Environment};
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;

const TEMPLATES: [(&str, &str); 10] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("about.html", include_str!("../../templates/about.html")),
    ("services.html", include_str!("../../templates/services.html")),
    ("contact.html", include_str!("../../templates/contact.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("sign_in.html", include_str!("../../templates/sign_in.html")),
    ("sign_up.html", include_str!("../../templates/sign_up.html")),
    ("widget.html", include_str!("../../templates/widget.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
];

#[derive(Debug, Error)]
pub enum PageError {
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Page rendering failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1>"),
        )
            .into_response()
    }
}

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

/// Data every page's layout needs
#[derive(Debug, Serialize)]
pub struct Layout<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub active: &'a str,
    pub demo_mode: bool,
    pub signed_in: bool,
    pub sign_in_url: &'a str,
    pub sign_up_url: &'a str,
}

impl<'a> Layout<'a> {
    pub fn new(
        state: &'a AppState,
        session: Option<&SessionClaims>,
        title: &'a str,
        active: &'a str,
    ) -> Self {
        Self {
            site_name: &state.site.site_name,
            title,
            active,
            demo_mode: !state.auth_mode().is_enforced(),
            signed_in: session.is_some(),
            sign_in_url: &state.auth.sign_in_url,
            sign_up_url: &state.auth.sign_up_url,
        }
    }
}

/// Render `template` inside the shared layout.
pub fn render_page<S: Serialize>(
    state: &AppState,
    session: Option<&SessionClaims>,
    template: &str,
    title: &str,
    active: &str,
    page: S,
) -> Result<Html<String>, PageError> {
    let layout = Layout::new(state, session, title, active);
    let html = state
        .templates
        .render(template, context! { layout => layout, page => page })?;
    Ok(Html(html))
}

/// Fallback for unknown paths
pub async fn not_found(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<(StatusCode, Html<String>), PageError> {
    let html = render_page(
        &state,
        session.as_ref(),
        "not_found.html",
        "Page not found",
        "",
        (),
    )?;
    Ok((StatusCode::NOT_FOUND, html))
}
