//! [`SqliteStore`] — the SQLite implementation of [`ApplicantStore`].

use std::path::Path;

use chrono::Utc;
use intake_core::{
  applicant::{
    Applicant, ApplicantRevision, NewManualApplicant, NewPortalApplicant,
  },
  filter::ApplicantFilter,
  store::ApplicantStore,
};
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    APPLICANT_COLUMNS, RawApplicant, decode_dt, encode_dt, encode_predicate,
    encode_salutation, encode_source, encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An applicant store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Applicant`] in one transaction.
  ///
  /// The stored timestamp is the later of the record's own timestamp and the
  /// newest timestamp already stored for the same property, so timestamps
  /// never decrease in insertion order even if the wall clock steps back.
  /// The returned applicant carries the timestamp actually stored.
  async fn insert(&self, mut applicant: Applicant) -> Result<Applicant> {
    let id_str          = encode_uuid(applicant.id);
    let property_id_str = encode_uuid(applicant.property_id);
    let now_str         = encode_dt(applicant.creation_timestamp);
    let salutation      = applicant.salutation.map(encode_salutation);
    let source          = encode_source(applicant.creation_source);
    let status          = encode_status(applicant.status);
    let email           = applicant.email.clone();
    let first_name      = applicant.first_name.clone();
    let last_name       = applicant.last_name.clone();
    let user_comment    = applicant.user_comment.clone();
    let app_comment     = applicant.applicant_comment.clone();
    let wbs_present     = applicant.wbs_present;
    let pets            = applicant.pets;
    let persons         = applicant.number_of_persons;
    let move_in         = applicant.earliest_move_in_date.clone();

    let stamp: String = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let latest: Option<String> = tx.query_row(
          "SELECT MAX(creation_timestamp) FROM applicants WHERE property_id = ?1",
          rusqlite::params![property_id_str],
          |r| r.get(0),
        )?;
        let stamp = match latest {
          Some(latest) if latest > now_str => latest,
          _ => now_str,
        };

        tx.execute(
          "INSERT INTO applicants (
             id, property_id, email, first_name, last_name,
             user_comment, applicant_comment, salutation,
             creation_source, status, creation_timestamp,
             wbs_present, pets, number_of_persons, earliest_move_in_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
          rusqlite::params![
            id_str,
            property_id_str,
            email,
            first_name,
            last_name,
            user_comment,
            app_comment,
            salutation,
            source,
            status,
            stamp,
            wbs_present,
            pets,
            persons,
            move_in,
          ],
        )?;
        tx.commit()?;
        Ok(stamp)
      })
      .await?;

    applicant.creation_timestamp = decode_dt(&stamp)?;
    tracing::debug!(
      applicant_id = %applicant.id,
      property_id = %applicant.property_id,
      source = source,
      "applicant stored"
    );
    Ok(applicant)
  }
}

// ─── ApplicantStore impl ─────────────────────────────────────────────────────

impl ApplicantStore for SqliteStore {
  type Error = crate::Error;

  // ── Creation ──────────────────────────────────────────────────────────────

  async fn create_manual(
    &self,
    property_id: Uuid,
    input: NewManualApplicant,
  ) -> Result<Applicant> {
    input.validate()?;
    let applicant =
      Applicant::manual(Uuid::new_v4(), property_id, input, Utc::now());
    self.insert(applicant).await
  }

  async fn create_portal(
    &self,
    property_id: Uuid,
    input: NewPortalApplicant,
  ) -> Result<Applicant> {
    input.validate()?;
    let applicant =
      Applicant::portal(Uuid::new_v4(), property_id, input, Utc::now());
    self.insert(applicant).await
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_applicant(&self, id: Uuid) -> Result<Option<Applicant>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawApplicant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {APPLICANT_COLUMNS} FROM applicants WHERE id = ?1"),
              rusqlite::params![id_str],
              RawApplicant::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawApplicant::into_applicant).transpose()
  }

  async fn list_applicants(
    &self,
    property_id: Uuid,
    filter: &ApplicantFilter,
  ) -> Result<Vec<Applicant>> {
    // Conjoin one condition per present criterion; absent criteria add
    // nothing to the WHERE clause.
    let mut conds  = String::new();
    let mut values = vec![Value::Text(encode_uuid(property_id))];
    for predicate in filter.predicates() {
      let (cond, value) = encode_predicate(&predicate);
      conds.push_str(" AND ");
      conds.push_str(cond);
      values.push(value);
    }

    let sql = format!(
      "SELECT {APPLICANT_COLUMNS}
       FROM applicants
       WHERE property_id = ?{conds}
       ORDER BY creation_timestamp DESC, seq DESC"
    );

    let raws: Vec<RawApplicant> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values), RawApplicant::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    tracing::debug!(
      %property_id,
      constrained = !filter.is_unconstrained(),
      matches = raws.len(),
      "applicants listed"
    );
    raws.into_iter().map(RawApplicant::into_applicant).collect()
  }

  // ── Workflow updates ──────────────────────────────────────────────────────

  async fn revise(
    &self,
    id: Uuid,
    revision: ApplicantRevision,
  ) -> Result<Option<Applicant>> {
    let id_str  = encode_uuid(id);
    let status  = revision.status.map(encode_status);
    let wbs     = revision.wbs_present;
    let persons = revision.number_of_persons;

    let raw: Option<RawApplicant> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE applicants SET
             status            = COALESCE(?2, status),
             wbs_present       = COALESCE(?3, wbs_present),
             number_of_persons = COALESCE(?4, number_of_persons)
           WHERE id = ?1",
          rusqlite::params![id_str, status, wbs, persons],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {APPLICANT_COLUMNS} FROM applicants WHERE id = ?1"),
          rusqlite::params![id_str],
          RawApplicant::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    if raw.is_some() {
      tracing::debug!(applicant_id = %id, ?revision, "applicant revised");
    }
    raw.map(RawApplicant::into_applicant).transpose()
  }
}
