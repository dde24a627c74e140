//! Account providers supported by the hosted auth flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider a hosted auth link can be scoped to.
///
/// Serialized in the upper-case form the upstream API expects
/// (`"LINKEDIN"`, `"WHATSAPP"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provider {
    Linkedin,
    Whatsapp,
    Instagram,
    Messenger,
    Telegram,
    Google,
    Outlook,
    Mail,
    Twitter,
}

impl Provider {
    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linkedin => "LINKEDIN",
            Self::Whatsapp => "WHATSAPP",
            Self::Instagram => "INSTAGRAM",
            Self::Messenger => "MESSENGER",
            Self::Telegram => "TELEGRAM",
            Self::Google => "GOOGLE",
            Self::Outlook => "OUTLOOK",
            Self::Mail => "MAIL",
            Self::Twitter => "TWITTER",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a provider name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    /// Parses a provider name case-insensitively (`linkedin`, `LinkedIn`, `LINKEDIN`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LINKEDIN" => Ok(Self::Linkedin),
            "WHATSAPP" => Ok(Self::Whatsapp),
            "INSTAGRAM" => Ok(Self::Instagram),
            "MESSENGER" => Ok(Self::Messenger),
            "TELEGRAM" => Ok(Self::Telegram),
            "GOOGLE" => Ok(Self::Google),
            "OUTLOOK" => Ok(Self::Outlook),
            "MAIL" => Ok(Self::Mail),
            "TWITTER" => Ok(Self::Twitter),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}
