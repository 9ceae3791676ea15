//! REST API client module for the Netz OÖ eService portal.
//!
//! This module provides the `EServiceClient` for reading dashboard,
//! consent, contract account and consumption data.
//!
//! The portal uses cookie sessions protected by an XSRF token, which is
//! obtained after posting the credentials to `j_security_check`.

pub mod client;
pub mod error;

pub use client::EServiceClient;
pub use error::{describe_status, ApiError};
