//! Handlers for `/applicants/{id}` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/applicants/{id}` | 404 if not found |
//! | `PATCH` | `/applicants/{id}` | Body: [`ApplicantRevision`]; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use intake_core::{
  applicant::{Applicant, ApplicantRevision},
  store::ApplicantStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Ids are opaque to callers, so a malformed one is simply an id that
/// resolves to nothing.
fn resolve(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw)
    .map_err(|_| ApiError::NotFound(format!("applicant {raw} not found")))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /applicants/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw): Path<String>,
) -> Result<Json<Applicant>, ApiError>
where
  S: ApplicantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = resolve(&raw)?;
  let applicant = store
    .get_applicant(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("applicant {id} not found")))?;
  Ok(Json(applicant))
}

// ─── Revise ───────────────────────────────────────────────────────────────────

/// `PATCH /applicants/{id}` — body: any of `status`, `wbsPresent`,
/// `numberOfPersons`.
pub async fn revise<S>(
  State(store): State<Arc<S>>,
  Path(raw): Path<String>,
  body: Result<Json<ApplicantRevision>, JsonRejection>,
) -> Result<Json<Applicant>, ApiError>
where
  S: ApplicantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = resolve(&raw)?;
  let Json(revision) = body?;
  if revision.is_empty() {
    return Err(ApiError::BadRequest("revision names no fields".into()));
  }

  let applicant = store
    .revise(id, revision)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("applicant {id} not found")))?;

  tracing::info!(applicant_id = %id, status = ?applicant.status, "applicant revised");
  Ok(Json(applicant))
}
