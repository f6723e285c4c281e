//! Entity collection routes, generic over the stored record type.
//!
//! Reads are open to any signed-in account. Writes to the `users`
//! collection additionally require the admin role.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use records::{Question, Record, UserAccount};

use crate::routes::ApiError;
use crate::routes::auth::AuthUser;
use crate::services::crud::{self, Stored};
use crate::state::AppState;

fn guard_write<R: Record>(auth: &AuthUser) -> Result<(), ApiError> {
    if R::COLLECTION == UserAccount::COLLECTION {
        auth.require_admin()?;
    }
    Ok(())
}

fn body<R>(payload: Result<Json<R>, JsonRejection>) -> Result<R, ApiError> {
    payload.map(|Json(r)| r).map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// `GET /api/{c}`
pub async fn list<R: Stored>(State(state): State<AppState>, _auth: AuthUser) -> Json<Vec<R>> {
    Json(crud::list::<R>(&*state.tables.read().await))
}

/// `GET /api/{c}/{id}`
pub async fn get<R: Stored>(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<R>, ApiError> {
    Ok(Json(crud::get::<R>(&*state.tables.read().await, id)?))
}

/// `POST /api/{c}`: responds 201 with the stored record.
pub async fn create<R: Stored>(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<R>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    guard_write::<R>(&auth)?;
    let record = body(payload)?;
    let created = crud::create(&mut *state.tables.write().await, record);
    tracing::info!(collection = R::COLLECTION, id = created.id(), "record created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/{c}/{id}`
pub async fn update<R: Stored>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<u64>,
    payload: Result<Json<R>, JsonRejection>,
) -> Result<Json<R>, ApiError> {
    guard_write::<R>(&auth)?;
    let record = body(payload)?;
    let updated = crud::update(&mut *state.tables.write().await, id, record)?;
    tracing::info!(collection = R::COLLECTION, id, "record updated");
    Ok(Json(updated))
}

/// `DELETE /api/{c}/{id}`: responds 204.
pub async fn delete<R: Stored>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    guard_write::<R>(&auth)?;
    crud::delete::<R>(&mut *state.tables.write().await, id)?;
    if R::COLLECTION == UserAccount::COLLECTION {
        state.sessions.write().await.remove_user(id);
    }
    tracing::info!(collection = R::COLLECTION, id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/tests/{id}/questions`
pub async fn questions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(test_id): Path<u64>,
) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(crud::questions(&*state.tables.read().await, test_id)?))
}

#[cfg(test)]
#[path = "collections_test.rs"]
mod tests;
