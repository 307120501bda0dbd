// Application state shared by page, API and asset handlers

use std::sync::Arc;

use meridian_gate::{AuthConfig, AuthMode};

use crate::{config::SiteConfig, images::ImageProxy, pages::Templates};

#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub auth: Arc<AuthConfig>,
    pub templates: Arc<Templates>,
    pub images: Arc<ImageProxy>,
}

impl AppState {
    pub fn new(
        site: SiteConfig,
        auth: AuthConfig,
        templates: Templates,
        images: ImageProxy,
    ) -> Self {
        Self {
            site: Arc::new(site),
            auth: Arc::new(auth),
            templates: Arc::new(templates),
            images: Arc::new(images),
        }
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth.mode
    }
}
