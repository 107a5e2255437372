//! Handlers for `/properties/{property_id}/...` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/properties/{id}/applicants` | Body: [`ManualApplicantBody`]; 201 + `Location` |
//! | `POST` | `/properties/{id}/external-applicants` | Body: [`PortalApplicantBody`]; 201 + `Location` |
//! | `GET`  | `/properties/{id}/applicants` | Optional `status`, `numberOfPersons`, `wbsPresent`, `partOfEmail` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use intake_core::{
  applicant::{
    Applicant, NewManualApplicant, NewPortalApplicant, Salutation, Status,
  },
  filter::ApplicantFilter,
  store::ApplicantStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /properties/{id}/applicants`.
///
/// Required fields are optional here so a missing field surfaces as a
/// validation error rather than a deserialisation failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualApplicantBody {
  pub email:        Option<String>,
  pub first_name:   Option<String>,
  pub last_name:    Option<String>,
  /// Older clients send this as `comment`.
  #[serde(alias = "comment")]
  pub user_comment: Option<String>,
  pub salutation:   Option<Salutation>,
}

impl From<ManualApplicantBody> for NewManualApplicant {
  fn from(b: ManualApplicantBody) -> Self {
    NewManualApplicant {
      email:        b.email.unwrap_or_default(),
      first_name:   b.first_name.unwrap_or_default(),
      last_name:    b.last_name.unwrap_or_default(),
      user_comment: b.user_comment,
      salutation:   b.salutation,
    }
  }
}

/// JSON body accepted by `POST /properties/{id}/external-applicants`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalApplicantBody {
  pub email:                 Option<String>,
  pub first_name:            Option<String>,
  pub last_name:             Option<String>,
  pub applicant_comment:     Option<String>,
  pub salutation:            Option<Salutation>,
  #[serde(default)]
  pub wbs_present:           bool,
  #[serde(default)]
  pub pets:                  bool,
  #[serde(default)]
  pub number_of_persons:     u32,
  pub earliest_move_in_date: Option<String>,
}

impl From<PortalApplicantBody> for NewPortalApplicant {
  fn from(b: PortalApplicantBody) -> Self {
    NewPortalApplicant {
      email:                 b.email.unwrap_or_default(),
      first_name:            b.first_name,
      last_name:             b.last_name.unwrap_or_default(),
      applicant_comment:     b.applicant_comment,
      salutation:            b.salutation,
      wbs_present:           b.wbs_present,
      pets:                  b.pets,
      number_of_persons:     b.number_of_persons,
      earliest_move_in_date: b.earliest_move_in_date,
    }
  }
}

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedBody {
  pub id: Uuid,
}

fn created(applicant: &Applicant) -> Response {
  let location = format!("/applicants/{}", applicant.id);
  (
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(CreatedBody { id: applicant.id }),
  )
    .into_response()
}

/// `POST /properties/{id}/applicants` — operator-entered applicant.
pub async fn create_manual<S>(
  State(store): State<Arc<S>>,
  property: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<ManualApplicantBody>, JsonRejection>,
) -> Result<Response, ApiError>
where
  S: ApplicantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(property_id) = property?;
  let Json(body) = body?;
  let applicant = store
    .create_manual(property_id, NewManualApplicant::from(body))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    applicant_id = %applicant.id,
    %property_id,
    "manual applicant created"
  );
  Ok(created(&applicant))
}

/// `POST /properties/{id}/external-applicants` — portal submission.
pub async fn create_portal<S>(
  State(store): State<Arc<S>>,
  property: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<PortalApplicantBody>, JsonRejection>,
) -> Result<Response, ApiError>
where
  S: ApplicantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(property_id) = property?;
  let Json(body) = body?;
  let applicant = store
    .create_portal(property_id, NewPortalApplicant::from(body))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    applicant_id = %applicant.id,
    %property_id,
    "portal applicant created"
  );
  Ok(created(&applicant))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub status:            Option<Status>,
  pub number_of_persons: Option<u32>,
  pub wbs_present:       Option<bool>,
  pub part_of_email:     Option<String>,
}

impl From<ListParams> for ApplicantFilter {
  fn from(p: ListParams) -> Self {
    ApplicantFilter {
      status:            p.status,
      number_of_persons: p.number_of_persons,
      wbs_present:       p.wbs_present,
      part_of_email:     p.part_of_email,
    }
  }
}

/// `GET /properties/{id}/applicants[?status=..][&numberOfPersons=..][&wbsPresent=..][&partOfEmail=..]`
///
/// Newest applicants first.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  property: Result<Path<Uuid>, PathRejection>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Applicant>>, ApiError>
where
  S: ApplicantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(property_id) = property?;
  let Query(params) = params?;
  let filter = ApplicantFilter::from(params);

  let applicants = store
    .list_applicants(property_id, &filter)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(applicants))
}
