//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with microsecond
//! precision, so lexical order equals chronological order. UUIDs are stored
//! as hyphenated lowercase strings. Enums are stored by their wire names.

use chrono::{DateTime, Utc};
use intake_core::{
  applicant::{Applicant, CreationSource, Salutation, Status, timestamp},
  filter::Predicate,
};
use rusqlite::types::Value;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { timestamp::format(&dt) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ────────────────────────────────────────────────────────────────────

pub fn encode_salutation(s: Salutation) -> &'static str {
  match s {
    Salutation::Mr => "MR",
    Salutation::Mrs => "MRS",
    Salutation::Ms => "MS",
  }
}

pub fn decode_salutation(s: &str) -> Result<Salutation> {
  match s {
    "MR" => Ok(Salutation::Mr),
    "MRS" => Ok(Salutation::Mrs),
    "MS" => Ok(Salutation::Ms),
    other => Err(unknown("salutation", other)),
  }
}

pub fn encode_source(s: CreationSource) -> &'static str {
  match s {
    CreationSource::Manual => "MANUAL",
    CreationSource::Portal => "PORTAL",
  }
}

pub fn decode_source(s: &str) -> Result<CreationSource> {
  match s {
    "MANUAL" => Ok(CreationSource::Manual),
    "PORTAL" => Ok(CreationSource::Portal),
    other => Err(unknown("creation_source", other)),
  }
}

pub fn encode_status(s: Status) -> &'static str {
  match s {
    Status::Created => "CREATED",
    Status::Invited => "INVITED",
    Status::Declined => "DECLINED",
  }
}

pub fn decode_status(s: &str) -> Result<Status> {
  match s {
    "CREATED" => Ok(Status::Created),
    "INVITED" => Ok(Status::Invited),
    "DECLINED" => Ok(Status::Declined),
    other => Err(unknown("status", other)),
  }
}

fn unknown(column: &'static str, value: &str) -> Error {
  Error::UnknownVariant { column, value: value.to_owned() }
}

// ─── Predicates ──────────────────────────────────────────────────────────────

/// Render one filter predicate as a SQL condition with a single positional
/// parameter.
///
/// `instr` is used for the email test because `LIKE` folds ASCII case.
pub fn encode_predicate(p: &Predicate<'_>) -> (&'static str, Value) {
  match *p {
    Predicate::Status(s) => {
      ("status = ?", Value::Text(encode_status(s).to_owned()))
    }
    Predicate::NumberOfPersons(n) => {
      ("number_of_persons = ?", Value::Integer(i64::from(n)))
    }
    Predicate::WbsPresent(w) => {
      ("wbs_present = ?", Value::Integer(i64::from(w)))
    }
    Predicate::EmailContains(part) => {
      ("instr(email, ?) > 0", Value::Text(part.to_owned()))
    }
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawApplicant::from_row`].
pub const APPLICANT_COLUMNS: &str = "id, property_id, email, first_name, \
   last_name, user_comment, applicant_comment, salutation, creation_source, \
   status, creation_timestamp, wbs_present, pets, number_of_persons, \
   earliest_move_in_date";

/// Raw values read directly from an `applicants` row.
pub struct RawApplicant {
  pub id:                    String,
  pub property_id:           String,
  pub email:                 String,
  pub first_name:            Option<String>,
  pub last_name:             String,
  pub user_comment:          Option<String>,
  pub applicant_comment:     Option<String>,
  pub salutation:            Option<String>,
  pub creation_source:       String,
  pub status:                String,
  pub creation_timestamp:    String,
  pub wbs_present:           bool,
  pub pets:                  bool,
  pub number_of_persons:     Option<u32>,
  pub earliest_move_in_date: Option<String>,
}

impl RawApplicant {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                    row.get(0)?,
      property_id:           row.get(1)?,
      email:                 row.get(2)?,
      first_name:            row.get(3)?,
      last_name:             row.get(4)?,
      user_comment:          row.get(5)?,
      applicant_comment:     row.get(6)?,
      salutation:            row.get(7)?,
      creation_source:       row.get(8)?,
      status:                row.get(9)?,
      creation_timestamp:    row.get(10)?,
      wbs_present:           row.get(11)?,
      pets:                  row.get(12)?,
      number_of_persons:     row.get(13)?,
      earliest_move_in_date: row.get(14)?,
    })
  }

  pub fn into_applicant(self) -> Result<Applicant> {
    Ok(Applicant {
      id:                    decode_uuid(&self.id)?,
      property_id:           decode_uuid(&self.property_id)?,
      email:                 self.email,
      first_name:            self.first_name,
      last_name:             self.last_name,
      user_comment:          self.user_comment,
      applicant_comment:     self.applicant_comment,
      salutation:            self
        .salutation
        .as_deref()
        .map(decode_salutation)
        .transpose()?,
      creation_source:       decode_source(&self.creation_source)?,
      status:                decode_status(&self.status)?,
      creation_timestamp:    decode_dt(&self.creation_timestamp)?,
      wbs_present:           self.wbs_present,
      pets:                  self.pets,
      number_of_persons:     self.number_of_persons,
      earliest_move_in_date: self.earliest_move_in_date,
    })
  }
}
