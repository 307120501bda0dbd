//! Sign-in and sign-up pages.
//!
//! The provider's interactive widget is only loaded when authentication is
//! really configured. In demo mode the page shows a static notice instead.
//! Otherwise it renders a skeleton and an `async` script tag: the browser
//! fetches the widget once, the mount script swaps the skeleton out when
//! it resolves, and a failed load leaves the skeleton in place.

use axum::{extract::State, response::Html};
use meridian_gate::{AuthConfig, CurrentSession};
use serde::Serialize;

use super::{render_page, PageError};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetSlot {
    /// Static panel explaining authentication is not configured
    DemoNotice,
    /// Skeleton now, provider widget once its script loads
    Deferred {
        script_url: Option<String>,
        publishable_key: String,
    },
}

impl WidgetSlot {
    pub fn for_config(config: &AuthConfig) -> Self {
        match (config.is_enforced(), config.publishable_key.as_ref()) {
            (true, Some(key)) => WidgetSlot::Deferred {
                script_url: config.widget_script_url.clone(),
                publishable_key: key.clone(),
            },
            _ => WidgetSlot::DemoNotice,
        }
    }
}

#[derive(Debug, Serialize)]
struct AuthPage {
    flow: &'static str,
    widget: WidgetSlot,
}

pub async fn sign_in(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, PageError> {
    render_page(
        &state,
        session.as_ref(),
        "sign_in.html",
        "Sign in",
        "",
        AuthPage {
            flow: "sign-in",
            widget: WidgetSlot::for_config(&state.auth),
        },
    )
}

pub async fn sign_up(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, PageError> {
    render_page(
        &state,
        session.as_ref(),
        "sign_up.html",
        "Create an account",
        "",
        AuthPage {
            flow: "sign-up",
            widget: WidgetSlot::for_config(&state.auth),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Layout, Templates};
    use meridian_gate::AuthMode;
    use minijinja::context;

    fn enforced(script_url: Option<&str>) -> AuthConfig {
        AuthConfig {
            mode: AuthMode::Enforced,
            publishable_key: Some("pk_live_abc123realkey".to_string()),
            widget_script_url: script_url.map(str::to_string),
            ..Default::default()
        }
    }

    fn render(widget: WidgetSlot) -> String {
        let layout = Layout {
            site_name: "Meridian",
            title: "Create an account",
            active: "",
            demo_mode: widget == WidgetSlot::DemoNotice,
            signed_in: false,
            sign_in_url: "/sign-in",
            sign_up_url: "/sign-up",
        };
        Templates::new()
            .unwrap()
            .render(
                "sign_up.html",
                context! {
                    layout => layout,
                    page => AuthPage { flow: "sign-up", widget },
                },
            )
            .unwrap()
    }

    #[test]
    fn test_demo_config_gets_notice() {
        assert_eq!(
            WidgetSlot::for_config(&AuthConfig::default()),
            WidgetSlot::DemoNotice
        );

        let placeholder = AuthConfig {
            publishable_key: Some("pk_test_xxx".to_string()),
            ..Default::default()
        };
        assert_eq!(WidgetSlot::for_config(&placeholder), WidgetSlot::DemoNotice);
    }

    #[test]
    fn test_enforced_config_defers_widget() {
        let slot = WidgetSlot::for_config(&enforced(Some("https://clerk.example/clerk.js")));
        assert_eq!(
            slot,
            WidgetSlot::Deferred {
                script_url: Some("https://clerk.example/clerk.js".to_string()),
                publishable_key: "pk_live_abc123realkey".to_string(),
            }
        );
    }

    #[test]
    fn test_demo_notice_renders_without_widget_script() {
        let html = render(WidgetSlot::DemoNotice);
        assert!(html.contains("Authentication is not configured"));
        assert!(!html.contains("widget-skeleton"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_deferred_widget_renders_skeleton_and_async_loader() {
        let html = render(WidgetSlot::for_config(&enforced(Some(
            "https://clerk.example/clerk.js",
        ))));
        assert!(html.contains("widget-skeleton"));
        assert!(html.contains("data-auth-widget=\"sign-up\""));
        assert!(html.contains("<script async"));
        assert!(html.contains("pk_live_abc123realkey"));
        assert!(!html.contains("Authentication is not configured"));
    }

    #[test]
    fn test_deferred_without_script_url_keeps_skeleton_only() {
        let html = render(WidgetSlot::for_config(&enforced(None)));
        assert!(html.contains("widget-skeleton"));
        assert!(!html.contains("<script"));
    }
}
