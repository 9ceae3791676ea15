use std::fmt;

use serde::Serialize;

/// eService login credentials. Fixed for the lifetime of a client.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// JSON body for the portal's `j_security_check` endpoint
    pub(crate) fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            j_username: &self.username,
            j_password: &self.password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    j_username: &'a str,
    j_password: &'a str,
}
