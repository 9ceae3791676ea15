//! Async client for the Netz OÖ eService portal.
//!
//! ```no_run
//! use netzooe_eservice::{ClientConfig, ConsentStatus, EServiceClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let http = ClientConfig::default().http_client()?;
//! let mut client = EServiceClient::new("user@example.com", "password", http);
//!
//! let dashboard = client.dashboard().await?;
//! let consents = client.consents(&[ConsentStatus::Active]).await?;
//! println!("{dashboard} / {} consents", consents.len());
//!
//! client.logout().await;
//! # Ok(())
//! # }
//! ```
//!
//! The first call logs in implicitly. Expired sessions are renewed once per
//! call; see [`EServiceClient::request`].

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiError, EServiceClient};
pub use auth::Credentials;
pub use config::ClientConfig;
pub use models::{ConsentStatus, ConsumptionBranch, Pod, TimeRange};
