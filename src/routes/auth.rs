//! Auth routes: credential login, identity lookup, logout.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use records::UserAccount;
use session::auth::INVALID_CREDENTIALS_MESSAGE;
use session::{AuthGrant, Credentials, User};

use crate::routes::ApiError;
use crate::services::auth as auth_svc;
use crate::state::AppState;

const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

/// Token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated account extracted from the bearer token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub account: UserAccount,
    pub token: String,
}

impl AuthUser {
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] unless the account has the admin role.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if auth_svc::identity(&self.account).is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let unauthorized = || ApiError::Unauthorized(AUTH_REQUIRED_MESSAGE.to_owned());
        let token = bearer_token(&parts.headers).ok_or_else(unauthorized)?;

        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .sessions
            .read()
            .await
            .validate(token)
            .ok_or_else(unauthorized)?;
        let account = app_state
            .tables
            .read()
            .await
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(unauthorized)?;

        Ok(Self { account, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: verify credentials and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<AuthGrant>, ApiError> {
    let Json(credentials) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let account = {
        let tables = state.tables.read().await;
        auth_svc::verify_credentials(&tables, &credentials).cloned()
    };
    let Some(account) = account else {
        tracing::info!(email = %credentials.identifier, "login rejected");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_owned()));
    };

    let (token, active) = {
        let mut sessions = state.sessions.write().await;
        let token = sessions.create(account.user_id, state.session_ttl);
        (token, sessions.len())
    };
    tracing::info!(user_id = account.user_id, active_sessions = active, "login succeeded");
    let user = auth_svc::identity(&account);
    Ok(Json(AuthGrant { user, token }))
}

/// `GET /api/auth/me`: return the current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth_svc::identity(&auth.account))
}

/// `POST /api/auth/logout`: drop the server-side session.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> StatusCode {
    state.sessions.write().await.remove(&auth.token);
    tracing::info!(user_id = auth.account.user_id, "logged out");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
