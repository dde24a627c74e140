//! Query strings of the browser-facing callback pages.

use serde::Deserialize;

/// `GET /success?name=...`
#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    pub name: Option<String>,
}

/// `GET /failure?error=...`
#[derive(Debug, Default, Deserialize)]
pub struct FailureQuery {
    pub error: Option<String>,
}

/// `GET /linkedin/callback?code=...&state=...&error=...`
#[derive(Debug, Default, Deserialize)]
pub struct LinkedInCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
