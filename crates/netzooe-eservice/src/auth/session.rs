use std::fmt;

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Name of the cookie the portal uses to hand out the XSRF token
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Client-side view of the portal session.
///
/// The portal identifies an authenticated session by the XSRF token echoed
/// back in every request. A token is only ever stored after a complete
/// login + session fetch, so `is_authenticated` is true exactly when one
/// succeeded and has not been invalidated since.
#[derive(Default)]
pub struct Session {
    xsrf_token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, token: String) {
        self.xsrf_token = Some(token);
    }

    pub fn clear(&mut self) {
        self.xsrf_token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.xsrf_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.xsrf_token.is_some()
    }
}

/// Find the XSRF token among the `Set-Cookie` headers of a response.
///
/// Each header value is parsed on its own; only a cookie named exactly
/// `XSRF-TOKEN` with a non-empty value matches. If the server sets it more
/// than once, the last value wins, the same as a browser cookie jar.
pub fn extract_xsrf_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(parse_cookie_pair)
        .filter(|(name, value)| *name == XSRF_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .last()
}

/// Split the leading `name=value` pair off a `Set-Cookie` value, ignoring
/// the attributes after the first `;`.
fn parse_cookie_pair(set_cookie: &str) -> Option<(&str, &str)> {
    let pair = set_cookie.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let value = value.trim().trim_matches('"');
    Some((name.trim(), value))
}
