//! Direct LinkedIn OAuth2 integration, kept for manual debugging only.
//!
//! The primary flow goes through Unipile's hosted UI; this client backs the
//! deprecated `GET /linkedin/callback` route.

mod client;

pub use client::{LinkedInOAuthClient, LinkedInProfile, OAuthError};
