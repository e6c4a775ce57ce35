//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use integration_mailtm::TempMailClient;

use crate::views::TemplateEngine;

/// Cookie names resolved from configuration
#[derive(Debug, Clone)]
pub struct CookieNames {
    /// Session cookie name
    pub session: String,
    /// Flash-message cookie name
    pub flash: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Temporary-mail provider client
    pub mail: Arc<dyn TempMailClient>,
    /// Compiled page templates
    pub templates: Arc<TemplateEngine>,
    /// Key for signing session and flash cookies
    pub cookie_key: Key,
    /// Configured cookie names
    pub cookies: Arc<CookieNames>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}

// Lets SignedCookieJar extract its key from the router state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
