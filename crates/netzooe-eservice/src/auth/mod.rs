//! Authentication state for the eService portal.
//!
//! This module provides:
//! - `Credentials`: username/password supplied once at client construction
//! - `Session`: the XSRF token that marks an authenticated portal session
//!
//! Sessions live in memory only; a new client always starts logged out.

pub mod credentials;
pub mod session;

pub use credentials::Credentials;
pub use session::{extract_xsrf_token, Session, XSRF_COOKIE};
