//! Engine API connection handle
//!
//! A [`Connection`] holds the HTTP client, credentials and SSO session for
//! one engine. It authenticates lazily on the first request and logs out
//! when closed or dropped, so the session is released on every exit path:
//!
//! ```ignore
//! let mut connection = Connection::builder()
//!     .url("https://engine.example.com/ovirt-engine/api")
//!     .username("admin@internal")
//!     .password(password)
//!     .ca_file("/etc/pki/ovirt-engine/ca.pem")
//!     .build()?;
//! let api = connection.get("")?;
//! connection.close()?;
//! ```

use crate::crypto::TlsConfig;
use crate::error::{EngineError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Path of the REST API below the engine URL
pub const API_PATH: &str = "/ovirt-engine/api";

const SSO_TOKEN_PATH: &str = "/ovirt-engine/sso/oauth/token";
const SSO_LOGOUT_PATH: &str = "/ovirt-engine/services/sso-logout";
const SSO_SCOPE: &str = "ovirt-app-api";
const API_VERSION: &str = "4";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builder for [`Connection`]
#[derive(Default)]
pub struct ConnectionBuilder {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    ca_file: Option<PathBuf>,
    insecure: bool,
    debug: bool,
    log_target: Option<String>,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
}

impl ConnectionBuilder {
    /// Full API URL, e.g. `https://engine.example.com/ovirt-engine/api`
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Use an existing SSO access token instead of logging in
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// CA bundle the engine certificate must chain to
    pub fn ca_file(mut self, ca_file: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(ca_file.into());
        self
    }

    /// Optional variant of [`ca_file`](Self::ca_file)
    pub fn maybe_ca_file(mut self, ca_file: Option<PathBuf>) -> Self {
        self.ca_file = ca_file;
        self
    }

    /// Skip certificate and host name verification
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Trace requests and responses at DEBUG level on the log target
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Log target for connection traces; without one nothing is traced
    pub fn log_target(mut self, target: impl Into<String>) -> Self {
        self.log_target = Some(target.into());
        self
    }

    /// Per-request timeout, `None` to wait forever
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extra header sent with every API request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Validate the parameters and create the connection.
    ///
    /// No request is sent; TLS material is loaded and the HTTP client is
    /// created here.
    pub fn build(self) -> Result<Connection> {
        let url = self
            .url
            .ok_or_else(|| EngineError::Config("The engine URL is mandatory".to_string()))?;
        let parsed = Url::parse(&url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EngineError::Config(format!(
                "Unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        let has_credentials = self.username.is_some() && self.password.is_some();
        if self.token.is_none() && !has_credentials {
            return Err(EngineError::Config(
                "Either a token or a username and password are required".to_string(),
            ));
        }

        let tls = TlsConfig::new(self.ca_file.as_deref(), self.insecure)?;
        let http = Client::builder()
            .use_preconfigured_tls((*tls.client_config()).clone())
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        let origin = parsed.origin().ascii_serialization();

        Ok(Connection {
            url,
            sso_token_url: format!("{origin}{SSO_TOKEN_PATH}"),
            sso_logout_url: format!("{origin}{SSO_LOGOUT_PATH}"),
            username: self.username,
            password: self.password,
            token: self.token,
            headers: self.headers,
            http,
            debug: self.debug,
            log_target: self.log_target,
            insecure: self.insecure,
            closed: false,
        })
    }
}

impl fmt::Debug for ConnectionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionBuilder")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "*****"))
            .field("token", &self.token.as_ref().map(|_| "*****"))
            .field("ca_file", &self.ca_file)
            .field("insecure", &self.insecure)
            .field("debug", &self.debug)
            .field("log_target", &self.log_target)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SsoResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Fault {
    reason: Option<String>,
    detail: Option<String>,
}

/// Authenticated session with an engine
///
/// Dropping the connection logs out of the SSO session. Use
/// [`close`](Self::close) to find out whether the logout succeeded.
pub struct Connection {
    url: String,
    sso_token_url: String,
    sso_logout_url: String,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    headers: Vec<(String, String)>,
    http: Client,
    debug: bool,
    log_target: Option<String>,
    insecure: bool,
    closed: bool,
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::default()
    }

    /// API URL this connection talks to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// SSO endpoint used to obtain access tokens
    pub fn sso_token_url(&self) -> &str {
        &self.sso_token_url
    }

    /// SSO endpoint used to revoke the access token
    pub fn sso_logout_url(&self) -> &str {
        &self.sso_logout_url
    }

    /// Whether server certificate verification is disabled
    pub fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Whether an access token is currently held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Obtain an access token unless one is already held
    pub fn authenticate(&mut self) -> Result<()> {
        if self.token.is_none() {
            let token = self.request_token()?;
            self.token = Some(token);
        }
        Ok(())
    }

    /// GET `path` relative to the API URL and decode the JSON body.
    ///
    /// An empty path requests the API root.
    pub fn get(&mut self, path: &str) -> Result<Value> {
        self.authenticate()?;

        let url = if path.is_empty() {
            self.url.clone()
        } else {
            format!(
                "{}/{}",
                self.url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        self.trace(format_args!("> GET {url}"));
        let response = self.api_request(self.http.get(&url)).send()?;
        let status = response.status();
        let body = response.text()?;
        self.trace(format_args!("< {status} {body}"));

        if status == StatusCode::UNAUTHORIZED {
            self.token = None;
        }
        if !status.is_success() {
            return Err(EngineError::Api {
                status: status.as_u16(),
                detail: fault_detail(status, &body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Check that the engine answers on the API root
    pub fn test(&mut self) -> Result<()> {
        self.get("").map(|_| ())
    }

    /// Log out and release the connection
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.logout()
    }

    /// Release the connection without revoking the access token, so the
    /// token can be handed to another process.
    pub fn disconnect(mut self) {
        self.closed = true;
    }

    fn api_request(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request
            .header(ACCEPT, "application/json")
            .header("Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }

    fn request_token(&self) -> Result<String> {
        let (Some(username), Some(password)) = (&self.username, &self.password) else {
            return Err(EngineError::Config(
                "A username and password are required to log in".to_string(),
            ));
        };

        self.trace(format_args!(
            "> POST {} username={username} password=*****",
            self.sso_token_url
        ));
        let response = self
            .http
            .post(&self.sso_token_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", "password"),
                ("scope", SSO_SCOPE),
                ("username", username.as_str()),
                ("password", password.as_str()),
            ])
            .send()?;
        let status = response.status();
        let body = response.text()?;
        self.trace(format_args!("< {status}"));

        let sso: SsoResponse = match serde_json::from_str(&body) {
            Ok(sso) => sso,
            Err(_) if !status.is_success() => {
                return Err(EngineError::Api {
                    status: status.as_u16(),
                    detail: fault_detail(status, &body),
                })
            }
            Err(e) => return Err(e.into()),
        };

        match sso {
            SsoResponse {
                error: Some(message),
                error_code,
                ..
            } => Err(EngineError::Authentication {
                code: error_code.unwrap_or_else(|| "unknown".to_string()),
                message,
            }),
            SsoResponse {
                access_token: Some(token),
                ..
            } => Ok(token),
            _ => Err(EngineError::Authentication {
                code: "invalid_response".to_string(),
                message: "SSO response contains no access token".to_string(),
            }),
        }
    }

    fn logout(&mut self) -> Result<()> {
        let Some(token) = self.token.take() else {
            return Ok(());
        };

        self.trace(format_args!("> POST {} token=*****", self.sso_logout_url));
        let response = self
            .http
            .post(&self.sso_logout_url)
            .form(&[("scope", ""), ("token", token.as_str())])
            .send()?;
        let status = response.status();
        self.trace(format_args!("< {status}"));

        if !status.is_success() {
            let body = response.text()?;
            return Err(EngineError::Api {
                status: status.as_u16(),
                detail: fault_detail(status, &body),
            });
        }
        Ok(())
    }

    fn trace(&self, message: fmt::Arguments<'_>) {
        if !self.debug {
            return;
        }
        if let Some(target) = &self.log_target {
            log::debug!(target: target.as_str(), "{message}");
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("authenticated", &self.token.is_some())
            .field("debug", &self.debug)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.logout() {
            log::warn!("Failed to log out of {}: {e}", self.url);
        }
    }
}

fn fault_detail(status: StatusCode, body: &str) -> String {
    if let Ok(fault) = serde_json::from_str::<Fault>(body) {
        if let Some(detail) = fault.detail.or(fault.reason) {
            return detail;
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
