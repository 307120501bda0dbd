// Meridian site server
// Decision: Demo mode unless AUTH_PUBLISHABLE_KEY holds a real key
// Decision: CORS only when CORS_ALLOWED_ORIGINS is set (the site itself is same-origin)

use anyhow::{Context, Result};
use axum::http::{header, Method};
use meridian_gate::AuthConfig;
use meridian_site::{build_app, config::DEFAULT_LOG_FILTER, telemetry, SiteConfig};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    telemetry::init_tracing(DEFAULT_LOG_FILTER);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env"),
    }

    tracing::info!("meridian-site starting...");

    let site_config = SiteConfig::from_env();
    let auth_config = AuthConfig::from_env();

    let cors_origins = site_config.cors_origins.clone();
    let addr = site_config.addr.clone();

    let app = build_app(site_config, auth_config)?;

    let app = if !cors_origins.is_empty() {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
                .allow_credentials(true),
        )
    } else {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    };

    let app = app.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
