//! `reqwest` transports for the authentication and data-access contracts.
//!
//! ERROR HANDLING
//! ==============
//! Connection failures and timeouts surface as `Unreachable` (auth) or
//! `Failed` (data). Non-2xx answers are decoded as `{ "message" }`; a 401 is
//! invalid credentials on login, an invalid token on resolve, and
//! [`AccessError::Unauthorized`] on data calls.

use std::time::Duration;

use async_trait::async_trait;
use records::{AccessError, DataAccess, ErrorBody, Question, Record};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use session::{AuthCollaborator, AuthError, AuthGrant, Credentials, User};

pub const HEALTH_PATH: &str = "/healthz";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const ME_PATH: &str = "/api/auth/me";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Shared HTTP client bound to one API origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /healthz`; returns the status code.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn ping(&self) -> Result<StatusCode, reqwest::Error> {
        Ok(self.http.get(self.url(HEALTH_PATH)).send().await?.status())
    }
}

async fn error_message(resp: Response) -> Option<String> {
    resp.json::<ErrorBody>().await.ok().map(|b| b.message)
}

/// Map a failed auth response. A 401 means `on_unauthorized`.
pub(crate) fn auth_failure(status: StatusCode, message: Option<String>, on_unauthorized: AuthError) -> AuthError {
    match records::classify_status(status.as_u16(), message) {
        AccessError::Unauthorized => on_unauthorized,
        AccessError::NotFound(m) | AccessError::Failed(m) => AuthError::Rejected(m),
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Authentication collaborator backed by `/api/auth/*`.
#[derive(Debug, Clone)]
pub struct ApiAuth {
    client: ApiClient,
}

impl ApiAuth {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Drop the server-side session for `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn revoke(&self, token: &str) -> Result<StatusCode, reqwest::Error> {
        let resp = self
            .client
            .http
            .post(self.client.url(LOGOUT_PATH))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(resp.status())
    }
}

#[async_trait(?Send)]
impl AuthCollaborator for ApiAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        let resp = self
            .client
            .http
            .post(self.client.url(LOGIN_PATH))
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return resp.json::<AuthGrant>().await.map_err(|e| AuthError::Rejected(e.to_string()));
        }
        Err(auth_failure(status, error_message(resp).await, AuthError::InvalidCredentials))
    }

    async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        let resp = self
            .client
            .http
            .get(self.client.url(ME_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return resp.json::<User>().await.map_err(|e| AuthError::Rejected(e.to_string()));
        }
        Err(auth_failure(status, error_message(resp).await, AuthError::InvalidToken))
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Data-access collaborator backed by `/api/{collection}`.
#[derive(Debug, Clone)]
pub struct ApiRecords {
    client: ApiClient,
    token: Option<String>,
}

impl ApiRecords {
    #[must_use]
    pub fn new(client: ApiClient, token: Option<String>) -> Self {
        Self { client, token }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AccessError> {
        let resp = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AccessError::Failed(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        Err(records::classify_status(status.as_u16(), error_message(resp).await))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AccessError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| AccessError::Failed(e.to_string()))
    }
}

#[async_trait(?Send)]
impl DataAccess for ApiRecords {
    async fn list<R: Record>(&self) -> Result<Vec<R>, AccessError> {
        let url = self.client.url(&records::collection_path(R::COLLECTION));
        self.fetch(self.client.http.get(url)).await
    }

    async fn get<R: Record>(&self, id: u64) -> Result<R, AccessError> {
        let url = self.client.url(&records::item_path(R::COLLECTION, id));
        self.fetch(self.client.http.get(url)).await
    }

    async fn create<R: Record>(&self, record: &R) -> Result<R, AccessError> {
        let url = self.client.url(&records::collection_path(R::COLLECTION));
        self.fetch(self.client.http.post(url).json(record)).await
    }

    async fn update<R: Record>(&self, record: &R) -> Result<R, AccessError> {
        let url = self.client.url(&records::item_path(R::COLLECTION, record.id()));
        self.fetch(self.client.http.put(url).json(record)).await
    }

    async fn delete<R: Record>(&self, id: u64) -> Result<(), AccessError> {
        let url = self.client.url(&records::item_path(R::COLLECTION, id));
        self.send(self.client.http.delete(url)).await.map(|_| ())
    }

    async fn questions(&self, test_id: u64) -> Result<Vec<Question>, AccessError> {
        let url = self.client.url(&records::questions_path(test_id));
        self.fetch(self.client.http.get(url)).await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
