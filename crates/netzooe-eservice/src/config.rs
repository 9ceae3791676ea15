//! Client configuration.
//!
//! Holds the portal location, the static identifying headers the portal
//! expects, and the transport timeout. Every field has a default, so a
//! partial JSON file (or none at all) is a valid configuration.
//!
//! The default file location is `~/.config/netzooe-eservice/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "netzooe-eservice";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Production portal
pub const DEFAULT_PORTAL_URL: &str = "https://eservice.netzooe.at";

/// HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";
const DEFAULT_CLIENT_ID: &str = "netzonline";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub portal_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept: String,
    pub client_id: String,
    /// Drop the client's connection handle when a call fails fatally
    /// (transport failure, or a 401 that survives re-login).
    pub release_on_fatal_error: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            release_on_fatal_error: true,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a different portal, e.g. a test server
    pub fn with_portal_url(portal_url: &str) -> Self {
        Self {
            portal_url: portal_url.to_string(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build an HTTP client suitable for the portal.
    ///
    /// The cookie store must stay enabled: the portal keeps its session in a
    /// cookie set by `j_security_check` and expects it back on every call.
    pub fn http_client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .cookie_store(true)
            .timeout(self.timeout())
            .build()
    }

    fn portal(&self) -> &str {
        self.portal_url.trim_end_matches('/')
    }

    /// URL below `<portal>/service`
    pub fn service_url(&self, path: &str) -> String {
        format!("{}/service/{}", self.portal(), path.trim_start_matches('/'))
    }

    /// URL below the versioned REST API, `<portal>/service/v1.0`
    pub fn api_url(&self, path: &str) -> String {
        self.service_url(&format!("v1.0/{}", path.trim_start_matches('/')))
    }

    pub fn login_page_url(&self) -> String {
        format!("{}/app/login", self.portal())
    }
}
