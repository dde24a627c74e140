//! Path prefixes relayed to the upstream API and how they are rewritten.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProxyRouteError {
    #[error("No proxy prefix given")]
    Empty,

    #[error("Invalid proxy prefix '{0}'")]
    Invalid(String),

    #[error("Unknown proxy prefix option '{0}', expected 'strip'")]
    UnknownOption(String),

    #[error("Proxy prefixes '{0}' and '{1}' overlap")]
    Overlap(String, String),
}

/// One mounted proxy prefix.
///
/// A request under `prefix` is forwarded to the upstream at the same path,
/// or with `prefix` removed when `strip_prefix` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    pub prefix: String,
    pub strip_prefix: bool,
}

impl ProxyRoute {
    pub fn new(prefix: impl Into<String>, strip_prefix: bool) -> Self {
        let prefix = prefix.into();
        let prefix = format!("/{}", prefix.trim_matches('/'));
        Self {
            prefix,
            strip_prefix,
        }
    }

    /// `/api/v1` passed through as-is and `/unipile-api` stripped.
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("/api/v1", false), Self::new("/unipile-api", true)]
    }

    /// Parses a comma-separated prefix list such as `/api/v1,/unipile-api:strip`.
    ///
    /// A `:strip` suffix removes the prefix before forwarding. Prefixes must
    /// be absolute, must not be `/`, must not contain route syntax and must
    /// not nest inside one another, since overlapping routes cannot be mounted.
    pub fn parse_list(value: &str) -> Result<Vec<Self>, ProxyRouteError> {
        let mut routes: Vec<Self> = Vec::new();

        for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (prefix, strip_prefix) = match entry.split_once(':') {
                Some((prefix, option)) if option.trim().eq_ignore_ascii_case("strip") => {
                    (prefix.trim(), true)
                }
                Some((_, option)) => {
                    return Err(ProxyRouteError::UnknownOption(option.trim().to_string()));
                }
                None => (entry, false),
            };

            if !is_valid_prefix(prefix) {
                return Err(ProxyRouteError::Invalid(prefix.to_string()));
            }

            let route = Self::new(prefix, strip_prefix);
            if let Some(existing) = routes.iter().find(|r| r.overlaps(&route)) {
                return Err(ProxyRouteError::Overlap(
                    existing.prefix.clone(),
                    route.prefix,
                ));
            }
            routes.push(route);
        }

        if routes.is_empty() {
            return Err(ProxyRouteError::Empty);
        }
        Ok(routes)
    }

    /// Whether either prefix lies under the other (or they are equal).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.matches(&other.prefix) || other.matches(&self.prefix)
    }

    /// Whether `path` sits under this prefix on a segment boundary.
    ///
    /// `/unipile-api/x` matches `/unipile-api`, `/unipile-apix` does not.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Upstream path for an inbound `path`, or `None` if it is not under the prefix.
    ///
    /// The prefix is removed at most once.
    pub fn rewrite(&self, path: &str) -> Option<String> {
        if !self.matches(path) {
            return None;
        }

        if !self.strip_prefix {
            return Some(path.to_string());
        }

        let rest = &path[self.prefix.len()..];
        if rest.is_empty() {
            Some("/".to_string())
        } else {
            Some(rest.to_string())
        }
    }

    /// Axum route pattern catching everything under the prefix.
    pub fn wildcard_pattern(&self) -> String {
        format!("{}/{{*rest}}", self.prefix)
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    let trimmed = prefix.trim_matches('/');
    prefix.starts_with('/')
        && !trimmed.is_empty()
        && trimmed.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
        })
}
