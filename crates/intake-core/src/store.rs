//! The `ApplicantStore` trait.
//!
//! Implemented by storage backends (e.g. `intake-store-sqlite`). The API layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  applicant::{
    Applicant, ApplicantRevision, NewManualApplicant, NewPortalApplicant,
  },
  filter::ApplicantFilter,
};

/// Abstraction over an applicant store backend.
///
/// Every create is a single atomic insert. The store assigns `id`,
/// `creation_source`, `status` and `creation_timestamp`; none of them is
/// accepted from callers. Inputs are validated before anything is written.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded runtime (e.g. tokio with `axum`).
pub trait ApplicantStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Creation ──────────────────────────────────────────────────────────

  /// Persist an operator-entered applicant for `property_id`.
  fn create_manual(
    &self,
    property_id: Uuid,
    input: NewManualApplicant,
  ) -> impl Future<Output = Result<Applicant, Self::Error>> + Send + '_;

  /// Persist a portal-submitted applicant for `property_id`.
  fn create_portal(
    &self,
    property_id: Uuid,
    input: NewPortalApplicant,
  ) -> impl Future<Output = Result<Applicant, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve an applicant by id, regardless of property. Returns `None` if
  /// not found.
  fn get_applicant(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Applicant>, Self::Error>> + Send + '_;

  /// All applicants of `property_id` matching every present criterion of
  /// `filter`, newest first. Ties on the creation timestamp put the later
  /// insert first.
  fn list_applicants<'a>(
    &'a self,
    property_id: Uuid,
    filter: &'a ApplicantFilter,
  ) -> impl Future<Output = Result<Vec<Applicant>, Self::Error>> + Send + 'a;

  // ── Workflow updates ──────────────────────────────────────────────────

  /// Apply the present fields of `revision`. Returns the updated applicant,
  /// or `None` if no applicant has that id.
  fn revise(
    &self,
    id: Uuid,
    revision: ApplicantRevision,
  ) -> impl Future<Output = Result<Option<Applicant>, Self::Error>> + Send + '_;
}
