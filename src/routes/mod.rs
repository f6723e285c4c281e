//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The mock API answers the console's auth and data-access calls under
//! `/api`. Every `/api` request first waits out the configured artificial
//! delay so loading states are visible. When a static directory is
//! configured the compiled console bundle is served for everything else.

pub mod auth;
pub mod collections;

use std::path::Path;

use records::{DashboardCounts, Device, ErrorBody, Lab, LabTest, Record, Schedule, UserAccount, collection_path};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::routes::auth::AuthUser;
use crate::services::crud::{self, CrudError, Stored};
use crate::state::AppState;

// =============================================================================
// ERRORS
// =============================================================================

/// Failure of an API handler, rendered as `{ "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("Admin access required")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<CrudError> for ApiError {
    fn from(err: CrudError) -> Self {
        match err {
            CrudError::NotFound { .. } => Self::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { message: self.to_string() })).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Full application router; `static_dir` enables serving the console bundle.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/dashboard", get(dashboard))
        .route("/api/tests/{id}/questions", get(collections::questions));
    let api = collection::<Lab>(api);
    let api = collection::<Device>(api);
    let api = collection::<Schedule>(api);
    let api = collection::<LabTest>(api);
    let api = collection::<UserAccount>(api)
        .layer(middleware::from_fn_with_state(state.clone(), artificial_delay))
        .route("/healthz", get(healthz));

    let router = api
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        // Client-side routes (`/labs`, `/login`, ...) all load the shell.
        Some(dir) => {
            let shell = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(shell))
        }
        None => router,
    }
}

/// `GET/POST /api/{c}` and `GET/PUT/DELETE /api/{c}/{id}` for one entity type.
fn collection<R: Stored>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            &collection_path(<R as Record>::COLLECTION),
            get(collections::list::<R>).post(collections::create::<R>),
        )
        .route(
            &format!("{}/{{id}}", collection_path(<R as Record>::COLLECTION)),
            get(collections::get::<R>)
                .put(collections::update::<R>)
                .delete(collections::delete::<R>),
        )
}

async fn artificial_delay(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.simulate_latency().await;
    next.run(request).await
}

/// `GET /api/dashboard`: per-collection counts.
pub async fn dashboard(State(state): State<AppState>, _auth: AuthUser) -> Json<DashboardCounts> {
    Json(crud::dashboard(&*state.tables.read().await))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
