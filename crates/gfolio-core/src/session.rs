//! Authenticated session: credentials, token, request headers and the
//! portfolio store.
//!
//! A session starts unauthenticated. [`Session::login`] exchanges the
//! credentials for a token and installs the `Authorization` header; every
//! portfolio operation checks for the token before sending anything.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::config::GfolioConfig;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, HttpResponse};
use crate::market::MarketData;
use crate::store::PortfolioStore;
use crate::FinanceError;

pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_ATOM: &str = "application/atom+xml";

/// Login identity. Fixed for the lifetime of a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
    service: String,
    source: String,
}

impl Credentials {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        service: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            service: service.into(),
            source: source.into(),
        }
    }

    /// Service name and client identifier taken from configuration.
    pub fn from_config(
        email: impl Into<String>,
        password: impl Into<String>,
        config: &GfolioConfig,
    ) -> Self {
        Self::new(email, password, config.service.clone(), config.source.clone())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn form_body(&self) -> String {
        [
            ("Email", self.email.as_str()),
            ("Passwd", self.password.as_str()),
            ("service", self.service.as_str()),
            ("source", self.source.as_str()),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("service", &self.service)
            .field("source", &self.source)
            .finish()
    }
}

/// Opaque token returned by the auth endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Read the token from a ClientLogin body: the first three lines are
/// `SID=`, `LSID=` and `Auth=` in that order; the token is the third value.
pub fn parse_login_body(body: &str) -> Result<AuthToken, FinanceError> {
    let values = body
        .lines()
        .take(3)
        .map(|line| line.trim().split_once('=').map(|(_, value)| value))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| FinanceError::AuthenticationFailed {
            reason: String::from("login response lines are not key=value pairs"),
        })?;

    match values.as_slice() {
        [_sid, _lsid, auth] if !auth.is_empty() => Ok(AuthToken::new(*auth)),
        _ => Err(FinanceError::AuthenticationFailed {
            reason: String::from("login response is missing the auth token"),
        }),
    }
}

pub struct Session {
    credentials: Credentials,
    token: Option<AuthToken>,
    headers: BTreeMap<String, String>,
    portfolios: PortfolioStore,
    config: GfolioConfig,
    http_client: Arc<dyn HttpClient>,
}

impl Session {
    pub fn new(
        credentials: Credentials,
        config: GfolioConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        let headers = BTreeMap::from([
            (String::from("gdata-version"), config.gdata_version.clone()),
            (String::from("content-type"), String::from(CONTENT_TYPE_FORM)),
        ]);
        Self {
            credentials,
            token: None,
            headers,
            portfolios: PortfolioStore::new(),
            config,
            http_client,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &GfolioConfig {
        &self.config
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Headers attached to every request sent through this session.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn portfolios(&self) -> &PortfolioStore {
        &self.portfolios
    }

    /// Unauthenticated market data client sharing this session's transport.
    pub fn market_data(&self) -> MarketData {
        MarketData::new(self.config.clone(), Arc::clone(&self.http_client))
    }

    /// Exchange credentials for a token. On any failure the session stays
    /// unauthenticated and no `Authorization` header is set.
    pub async fn login(&mut self) -> Result<(), FinanceError> {
        self.token = None;
        HttpAuth::None.apply(&mut self.headers);

        let request = HttpRequest::post(&self.config.auth_url).with_body(self.credentials.form_body());
        tracing::info!(email = %self.credentials.email, "authenticating");
        let response = self.send(request).await?;

        if response.status != 200 {
            tracing::warn!(status = response.status, "authentication rejected");
            return Err(FinanceError::AuthenticationFailed {
                reason: format!("auth endpoint returned status {}", response.status),
            });
        }

        let token = parse_login_body(&response.body)?;
        HttpAuth::ClientLogin {
            scheme: self.config.auth_scheme.clone(),
            token: token.as_str().to_owned(),
        }
        .apply(&mut self.headers);
        self.token = Some(token);
        tracing::info!("authenticated");
        Ok(())
    }

    pub(crate) fn require_token(&self) -> Result<(), FinanceError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(FinanceError::NotAuthenticated)
        }
    }

    pub(crate) fn set_content_type(&mut self, content_type: &str) {
        self.headers
            .insert(String::from("content-type"), content_type.to_owned());
    }

    pub(crate) fn store_mut(&mut self) -> &mut PortfolioStore {
        &mut self.portfolios
    }

    /// Send one request with the session headers. Non-success statuses come
    /// back as ordinary responses for the caller to branch on.
    pub(crate) async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FinanceError> {
        let request = request
            .with_headers(&self.headers)
            .with_timeout_ms(self.config.timeout_ms);
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let response = self.http_client.execute(request).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("authenticated", &self.is_authenticated())
            .field("portfolios", &self.portfolios.len())
            .field("config", &self.config)
            .finish()
    }
}
