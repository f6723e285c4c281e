//! REST transports for the mock API.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests, tooling): every call fails with an "unavailable"
//! error since these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are decoded as `{ "message" }` when possible. A 401 on
//! a data call becomes [`AccessError::Unauthorized`] so the screen controller
//! can expire the session; a 401 on login is an invalid-credentials failure.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use records::{AccessError, DataAccess, Question, Record};
use session::{AuthCollaborator, AuthError, AuthGrant, Credentials, User};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const ME_PATH: &str = "/api/auth/me";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

#[cfg(not(feature = "csr"))]
const UNAVAILABLE: &str = "HTTP transport is only available in the browser";

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a failed auth response. A 401 means `on_unauthorized`.
#[cfg(any(test, feature = "csr"))]
fn auth_failure(status: u16, message: Option<String>, on_unauthorized: AuthError) -> AuthError {
    if status == 401 {
        return on_unauthorized;
    }
    match records::classify_status(status, message) {
        AccessError::Unauthorized => on_unauthorized,
        AccessError::NotFound(m) | AccessError::Failed(m) => AuthError::Rejected(m),
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Authentication collaborator backed by `/api/auth/*`.
#[derive(Clone, Debug, Default)]
pub struct HttpAuth {
    base_url: String,
}

impl HttpAuth {
    /// `base_url` is prefixed to every path; empty means same origin.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Best-effort server-side logout; failures are only logged.
    pub async fn revoke(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            let sent = gloo_net::http::Request::post(&self.url(LOGOUT_PATH))
                .header("Authorization", &bearer(token))
                .send()
                .await;
            if let Err(e) = sent {
                log::warn!("logout request failed: {e}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (token, self.url(LOGOUT_PATH));
        }
    }
}

#[async_trait(?Send)]
impl AuthCollaborator for HttpAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url(LOGIN_PATH))
                .json(credentials)
                .map_err(|e| AuthError::Rejected(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Unreachable(e.to_string()))?;
            if resp.ok() {
                return resp.json::<AuthGrant>().await.map_err(|e| AuthError::Rejected(e.to_string()));
            }
            let message = resp.json::<records::ErrorBody>().await.ok().map(|b| b.message);
            Err(auth_failure(resp.status(), message, AuthError::InvalidCredentials))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (credentials, self.url(LOGIN_PATH));
            Err(AuthError::Unreachable(UNAVAILABLE.to_owned()))
        }
    }

    async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&self.url(ME_PATH))
                .header("Authorization", &bearer(token))
                .send()
                .await
                .map_err(|e| AuthError::Unreachable(e.to_string()))?;
            if resp.ok() {
                return resp.json::<User>().await.map_err(|e| AuthError::Rejected(e.to_string()));
            }
            let message = resp.json::<records::ErrorBody>().await.ok().map(|b| b.message);
            Err(auth_failure(resp.status(), message, AuthError::InvalidToken))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (bearer(token), self.url(ME_PATH));
            Err(AuthError::Unreachable(UNAVAILABLE.to_owned()))
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Data-access collaborator backed by `/api/{collection}`.
#[derive(Clone, Debug, Default)]
pub struct HttpRecords {
    base_url: String,
    token: Option<String>,
}

impl HttpRecords {
    /// Calls carry `token` as a bearer credential when present.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned(), token }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    #[cfg(feature = "csr")]
    fn authorize(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &bearer(token)),
            None => builder,
        }
    }

    #[cfg(feature = "csr")]
    async fn expect_ok(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, AccessError> {
        if resp.ok() {
            return Ok(resp);
        }
        let message = resp.json::<records::ErrorBody>().await.ok().map(|b| b.message);
        Err(records::classify_status(resp.status(), message))
    }

    #[cfg(feature = "csr")]
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: Result<gloo_net::http::Request, gloo_net::Error>,
    ) -> Result<T, AccessError> {
        let request = request.map_err(|e| AccessError::Failed(e.to_string()))?;
        let resp = request.send().await.map_err(|e| AccessError::Failed(e.to_string()))?;
        let resp = Self::expect_ok(resp).await?;
        resp.json::<T>().await.map_err(|e| AccessError::Failed(e.to_string()))
    }
}

#[async_trait(?Send)]
impl DataAccess for HttpRecords {
    async fn list<R: Record>(&self) -> Result<Vec<R>, AccessError> {
        let url = self.url(&records::collection_path(R::COLLECTION));
        #[cfg(feature = "csr")]
        {
            self.fetch(self.authorize(gloo_net::http::Request::get(&url)).build()).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(AccessError::Failed(format!("{UNAVAILABLE}: GET {url}")))
        }
    }

    async fn get<R: Record>(&self, id: u64) -> Result<R, AccessError> {
        let url = self.url(&records::item_path(R::COLLECTION, id));
        #[cfg(feature = "csr")]
        {
            self.fetch(self.authorize(gloo_net::http::Request::get(&url)).build()).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(AccessError::Failed(format!("{UNAVAILABLE}: GET {url}")))
        }
    }

    async fn create<R: Record>(&self, record: &R) -> Result<R, AccessError> {
        let url = self.url(&records::collection_path(R::COLLECTION));
        #[cfg(feature = "csr")]
        {
            self.fetch(self.authorize(gloo_net::http::Request::post(&url)).json(record)).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = record;
            Err(AccessError::Failed(format!("{UNAVAILABLE}: POST {url}")))
        }
    }

    async fn update<R: Record>(&self, record: &R) -> Result<R, AccessError> {
        let url = self.url(&records::item_path(R::COLLECTION, record.id()));
        #[cfg(feature = "csr")]
        {
            self.fetch(self.authorize(gloo_net::http::Request::put(&url)).json(record)).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(AccessError::Failed(format!("{UNAVAILABLE}: PUT {url}")))
        }
    }

    async fn delete<R: Record>(&self, id: u64) -> Result<(), AccessError> {
        let url = self.url(&records::item_path(R::COLLECTION, id));
        #[cfg(feature = "csr")]
        {
            let request = self
                .authorize(gloo_net::http::Request::delete(&url))
                .build()
                .map_err(|e| AccessError::Failed(e.to_string()))?;
            let resp = request.send().await.map_err(|e| AccessError::Failed(e.to_string()))?;
            Self::expect_ok(resp).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(AccessError::Failed(format!("{UNAVAILABLE}: DELETE {url}")))
        }
    }

    async fn questions(&self, test_id: u64) -> Result<Vec<Question>, AccessError> {
        let url = self.url(&records::questions_path(test_id));
        #[cfg(feature = "csr")]
        {
            self.fetch(self.authorize(gloo_net::http::Request::get(&url)).build()).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(AccessError::Failed(format!("{UNAVAILABLE}: GET {url}")))
        }
    }
}
