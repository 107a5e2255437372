//! The applicant record and its creation inputs.
//!
//! An applicant is created exactly once, through one of two pathways: typed in
//! by an operator ([`NewManualApplicant`]) or submitted by a listing portal
//! ([`NewPortalApplicant`]). Identity, creation source, status and timestamp
//! are always assigned by the store, never by callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// How the applicant should be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Salutation {
  Mr,
  Mrs,
  Ms,
}

/// Which creation pathway produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreationSource {
  /// Entered by an operator.
  Manual,
  /// Submitted through an external listing portal.
  Portal,
}

/// Where the applicant stands in the letting workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
  Created,
  Invited,
  Declined,
}

// ─── Applicant ───────────────────────────────────────────────────────────────

/// One person's interest in one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
  pub id:                    Uuid,
  pub property_id:           Uuid,
  pub email:                 String,
  pub first_name:            Option<String>,
  pub last_name:             String,
  /// Operator-entered note; only set on the manual pathway.
  pub user_comment:          Option<String>,
  /// Applicant-written message; only set on the portal pathway.
  pub applicant_comment:     Option<String>,
  pub salutation:            Option<Salutation>,
  pub creation_source:       CreationSource,
  pub status:                Status,
  /// Server-assigned; never changes after creation.
  #[serde(with = "timestamp")]
  pub creation_timestamp:    DateTime<Utc>,
  pub wbs_present:           bool,
  pub pets:                  bool,
  pub number_of_persons:     Option<u32>,
  pub earliest_move_in_date: Option<String>,
}

// ─── Creation inputs ─────────────────────────────────────────────────────────

/// Input to [`crate::store::ApplicantStore::create_manual`].
#[derive(Debug, Clone, Default)]
pub struct NewManualApplicant {
  pub email:        String,
  pub first_name:   String,
  pub last_name:    String,
  pub user_comment: Option<String>,
  pub salutation:   Option<Salutation>,
}

/// Input to [`crate::store::ApplicantStore::create_portal`].
#[derive(Debug, Clone, Default)]
pub struct NewPortalApplicant {
  pub email:                 String,
  pub first_name:            Option<String>,
  pub last_name:             String,
  pub applicant_comment:     Option<String>,
  pub salutation:            Option<Salutation>,
  pub wbs_present:           bool,
  pub pets:                  bool,
  pub number_of_persons:     u32,
  pub earliest_move_in_date: Option<String>,
}

impl Applicant {
  /// Build a manual-pathway record. The caller supplies the identity and the
  /// timestamp it is about to persist.
  pub fn manual(
    id: Uuid,
    property_id: Uuid,
    input: NewManualApplicant,
    creation_timestamp: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      property_id,
      email: input.email,
      first_name: Some(input.first_name),
      last_name: input.last_name,
      user_comment: input.user_comment,
      applicant_comment: None,
      salutation: input.salutation,
      creation_source: CreationSource::Manual,
      status: Status::Created,
      creation_timestamp,
      wbs_present: false,
      pets: false,
      number_of_persons: None,
      earliest_move_in_date: None,
    }
  }

  /// Build a portal-pathway record.
  pub fn portal(
    id: Uuid,
    property_id: Uuid,
    input: NewPortalApplicant,
    creation_timestamp: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      property_id,
      email: input.email,
      first_name: input.first_name,
      last_name: input.last_name,
      user_comment: None,
      applicant_comment: input.applicant_comment,
      salutation: input.salutation,
      creation_source: CreationSource::Portal,
      status: Status::Created,
      creation_timestamp,
      wbs_present: input.wbs_present,
      pets: input.pets,
      number_of_persons: Some(input.number_of_persons),
      earliest_move_in_date: input.earliest_move_in_date,
    }
  }
}

// ─── Revision ────────────────────────────────────────────────────────────────

/// The attributes a downstream workflow may change after intake. Absent
/// fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRevision {
  pub status:            Option<Status>,
  pub wbs_present:       Option<bool>,
  pub number_of_persons: Option<u32>,
}

impl ApplicantRevision {
  pub fn is_empty(&self) -> bool {
    self.status.is_none()
      && self.wbs_present.is_none()
      && self.number_of_persons.is_none()
  }
}

// ─── Timestamp rendering ─────────────────────────────────────────────────────

/// Render creation timestamps as `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
pub mod timestamp {
  use chrono::{DateTime, SecondsFormat, Utc};
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
  }

  pub fn serialize<S: Serializer>(
    dt: &DateTime<Utc>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(dt))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(serde::de::Error::custom)
  }
}
