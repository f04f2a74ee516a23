//! Shared-token access gate for mutating operations.
//!
//! A single process-wide secret authorizes every mutation. The secret is
//! injected at construction (from config), never read from the environment
//! here, so tests can build gates freely.
//!
//! Callers may present the token through three carriers, checked in order:
//!
//! 1. `token` query parameter
//! 2. `X-Admin-Token` header
//! 3. `admin_token` cookie
//!
//! The first carrier that yields a value wins; carriers are never merged.
//! An unconfigured gate (no secret, or an empty one) denies everything,
//! including an empty presented token.

/// Remediation hint returned with every 401.
pub const REMEDIATION_HINT: &str = "Unauthorized. Configure admin_token (or the ADMIN_TOKEN \
     environment variable) and pass ?token=<token>, the X-Admin-Token header, or the \
     admin_token cookie.";

/// Name of the cookie carrier, also set by the admin dashboard.
pub const TOKEN_COOKIE: &str = "admin_token";

/// Name of the header carrier.
pub const TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    /// Build a gate from an optionally-configured secret.
    ///
    /// An empty string counts as unconfigured.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// True only when a configured secret exactly equals the presented token.
    pub fn authorize(&self, presented: Option<&str>) -> bool {
        match (&self.secret, presented) {
            (Some(secret), Some(token)) => secret == token,
            _ => false,
        }
    }
}

/// Pick the token to check: first present carrier wins, no merging.
pub fn first_carrier<'a>(
    query: Option<&'a str>,
    header: Option<&'a str>,
    cookie: Option<&'a str>,
) -> Option<&'a str> {
    query.or(header).or(cookie)
}

/// Extract a named cookie's value from a `Cookie:` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
