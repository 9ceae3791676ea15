//! API client for the Netz OÖ eService portal.
//!
//! `EServiceClient` owns the portal session: it logs in on demand, attaches
//! the XSRF token to every call, and re-authenticates once when the portal
//! answers 401 before giving up.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::{extract_xsrf_token, Credentials, Session};
use crate::config::ClientConfig;
use crate::models::{ConsentStatus, ConsumptionBranch, Pod, ProfileRequest};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Attempts per call: the first one plus a single retry after re-login.
const MAX_ATTEMPTS: u32 = 2;

const XSRF_HEADER: &str = "x-xsrf-token";
const CLIENT_ID_HEADER: &str = "client-id";

/// Authenticated client for one eService account.
///
/// The `reqwest::Client` is supplied by the caller and must have its cookie
/// store enabled (see [`ClientConfig::http_client`]). The client keeps its
/// own handle to it until `logout`, or until a fatal error when
/// `release_on_fatal_error` is set; after that every call fails with
/// [`ApiError::ConnectionReleased`].
///
/// All calls take `&mut self`: one instance serves one caller at a time.
pub struct EServiceClient {
    http: Option<Client>,
    config: ClientConfig,
    credentials: Credentials,
    session: Session,
}

impl EServiceClient {
    /// Create a client for the production portal
    pub fn new(username: impl Into<String>, password: impl Into<String>, http: Client) -> Self {
        Self::with_config(Credentials::new(username, password), http, ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, http: Client, config: ClientConfig) -> Self {
        Self {
            http: Some(http),
            config,
            credentials,
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Current XSRF token, if logged in
    pub fn xsrf_token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// True once the connection handle has been given up
    pub fn is_released(&self) -> bool {
        self.http.is_none()
    }

    // ===== Session =====

    /// Authenticate against the portal and fetch a fresh XSRF token.
    ///
    /// Any failure leaves the client logged out.
    pub async fn login(&mut self) -> Result<(), ApiError> {
        self.session.clear();
        debug!("Logging in to eService");

        let url = self.config.service_url("j_security_check");
        let mut headers = self.common_headers()?;
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let request = self
            .http()?
            .post(&url)
            .headers(headers)
            .json(&self.credentials.login_request());

        let response = self.send(request).await?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => {
                warn!("eService rejected the credentials");
                return Err(ApiError::authentication(StatusCode::UNAUTHORIZED));
            }
            status => return Err(Self::status_error(response, status).await),
        }

        let token = self.fetch_xsrf_token().await?;
        self.session.update(token);
        info!("Logged in to eService");
        Ok(())
    }

    /// Fetch session info; the response carries the XSRF cookie.
    async fn fetch_xsrf_token(&mut self) -> Result<String, ApiError> {
        let url = self.config.api_url("session");
        let mut headers = self.common_headers()?;
        headers.insert(header::REFERER, HeaderValue::from_str(&self.config.login_page_url())?);
        let request = self.http()?.get(&url).headers(headers);

        let response = self.send(request).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Self::status_error(response, status).await);
        }

        extract_xsrf_token(response.headers()).ok_or_else(|| {
            warn!(url = %url, "Session response carried no XSRF token");
            ApiError::MissingXsrfToken
        })
    }

    /// Best-effort logout. Always releases the connection handle and never
    /// fails, whether or not the client was logged in.
    pub async fn logout(&mut self) {
        let Some(http) = self.http.take() else {
            self.session.clear();
            return;
        };

        let url = self.config.service_url("logout");
        match self.common_headers() {
            Ok(headers) => {
                if let Err(e) = http.get(&url).headers(headers).send().await {
                    debug!(error = %e, "Logout request failed");
                }
            }
            Err(e) => debug!(error = %e, "Skipping logout request"),
        }

        self.session.clear();
        info!("Logged out of eService");
    }

    // ===== Requests =====

    /// Authenticated request primitive behind every endpoint call.
    ///
    /// Logs in first when no token is held. A 401 triggers one re-login and
    /// one retry; a second 401 is final.
    pub async fn request<T, B>(&mut self, method: Method, url: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        if !self.session.is_authenticated() {
            debug!(url = url, "No XSRF token, logging in first");
            self.login().await?;
        }

        let mut attempt = 1;
        loop {
            let mut request = self
                .http()?
                .request(method.clone(), url)
                .headers(self.auth_headers()?);
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = self.send(request).await?;
            let status = response.status();

            match status {
                StatusCode::OK => return self.decode(response).await,
                StatusCode::UNAUTHORIZED if attempt < MAX_ATTEMPTS => {
                    warn!(url = url, attempt = attempt, "Session expired, logging in again");
                    if let Err(e) = self.login().await {
                        // Credentials rejected mid-call: the session is gone for good
                        return Err(if e.is_authentication() { self.fatal(e) } else { e });
                    }
                    attempt += 1;
                }
                StatusCode::UNAUTHORIZED => {
                    warn!(url = url, attempt = attempt, "Still unauthorized after re-login");
                    self.session.clear();
                    return Err(self.fatal(ApiError::authentication(status)));
                }
                _ => {
                    debug!(url = url, status = %status, "eService request failed");
                    return Err(Self::status_error(response, status).await);
                }
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&mut self, url: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, url, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &mut self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, url, Some(body)).await
    }

    fn http(&self) -> Result<&Client, ApiError> {
        self.http.as_ref().ok_or(ApiError::ConnectionReleased)
    }

    fn common_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_str(&self.config.user_agent)?);
        headers.insert(header::ACCEPT, HeaderValue::from_str(&self.config.accept)?);
        headers.insert(CLIENT_ID_HEADER, HeaderValue::from_str(&self.config.client_id)?);
        Ok(headers)
    }

    fn auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = self.common_headers()?;
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            headers.insert(XSRF_HEADER, HeaderValue::from_str(token)?);
        }
        Ok(headers)
    }

    /// Send a request; a transport failure is fatal.
    async fn send(&mut self, request: RequestBuilder) -> Result<Response, ApiError> {
        match request.send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!(error = %e, "eService transport error");
                Err(self.fatal(ApiError::Transport(e)))
            }
        }
    }

    async fn decode<T: DeserializeOwned>(&mut self, response: Response) -> Result<T, ApiError> {
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Err(self.fatal(ApiError::Transport(e))),
        };
        // An empty 200 decodes like a JSON null
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ApiError::InvalidJson(e.to_string()))
    }

    async fn status_error(response: Response, status: StatusCode) -> ApiError {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, status = %status, "Failed to read error body");
                String::new()
            }
        };
        ApiError::from_status(status, &body)
    }

    /// Release the connection handle if configured to, then hand back `err`.
    fn fatal(&mut self, err: ApiError) -> ApiError {
        if self.config.release_on_fatal_error && self.http.take().is_some() {
            self.session.clear();
            info!("Released eService connection after fatal error");
        }
        err
    }

    // ===== Data Fetching Methods =====

    /// Fetch the dashboard snapshot
    pub async fn dashboard(&mut self) -> Result<Value, ApiError> {
        let url = self.config.api_url("dashboard");
        self.get(&url).await
    }

    /// Fetch data sharing consents, optionally filtered by status.
    /// An empty filter fetches all of them.
    pub async fn consents(&mut self, status: &[ConsentStatus]) -> Result<Vec<Value>, ApiError> {
        let url = with_filter(
            self.config.api_url("consents"),
            "status",
            status.iter().map(ConsentStatus::as_str),
        );
        self.get(&url).await
    }

    /// Fetch consumption profiles, optionally filtered by energy branch
    pub async fn consumption_profiles(&mut self, branch: &[ConsumptionBranch]) -> Result<Vec<Value>, ApiError> {
        let url = with_filter(
            self.config.api_url("consumptions/profiles"),
            "branch",
            branch.iter().map(ConsumptionBranch::as_str),
        );
        self.get(&url).await
    }

    pub async fn contract_account(
        &mut self,
        business_partner_number: &str,
        contract_account_number: &str,
    ) -> Result<Value, ApiError> {
        let url = self.config.api_url(&format!(
            "contract-accounts/{}/{}",
            business_partner_number, contract_account_number
        ));
        self.get(&url).await
    }

    /// Fetch consumption values for a batch of metering points
    pub async fn consumption_profile(&mut self, pods: &[Pod]) -> Result<Vec<Value>, ApiError> {
        let url = self.config.api_url("consumptions/profile/active");
        self.post(&url, &ProfileRequest::new(pods)).await
    }
}

/// Append `?name=a,b,c` to `url`, or nothing when there are no values.
/// Commas stay unescaped; the portal expects them literally.
fn with_filter<'a>(url: String, name: &str, values: impl Iterator<Item = &'a str>) -> String {
    let values: Vec<&str> = values.collect();
    if values.is_empty() {
        url
    } else {
        format!("{}?{}={}", url, name, values.join(","))
    }
}
