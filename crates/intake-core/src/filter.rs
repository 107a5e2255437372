//! Filter criteria for listing a property's applicants.
//!
//! Each criterion is optional. A present criterion becomes one typed
//! [`Predicate`]; the filter matches when every predicate holds. An absent
//! criterion constrains nothing. Store backends render the same predicates
//! into their own query language, so the in-memory [`Predicate::matches`] is
//! the reference semantics.

use crate::applicant::{Applicant, Status};

/// Parameters for [`crate::store::ApplicantStore::list_applicants`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantFilter {
  pub status:            Option<Status>,
  pub number_of_persons: Option<u32>,
  pub wbs_present:       Option<bool>,
  /// Case-sensitive substring of the stored email.
  pub part_of_email:     Option<String>,
}

/// A single equality or containment test against an applicant attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
  Status(Status),
  NumberOfPersons(u32),
  WbsPresent(bool),
  EmailContains(&'a str),
}

impl Predicate<'_> {
  pub fn matches(&self, applicant: &Applicant) -> bool {
    match *self {
      Self::Status(s) => applicant.status == s,
      Self::NumberOfPersons(n) => applicant.number_of_persons == Some(n),
      Self::WbsPresent(w) => applicant.wbs_present == w,
      Self::EmailContains(part) => applicant.email.contains(part),
    }
  }
}

impl ApplicantFilter {
  /// The predicates for every criterion that is present, in a fixed order.
  pub fn predicates(&self) -> Vec<Predicate<'_>> {
    [
      self.status.map(Predicate::Status),
      self.number_of_persons.map(Predicate::NumberOfPersons),
      self.wbs_present.map(Predicate::WbsPresent),
      self.part_of_email.as_deref().map(Predicate::EmailContains),
    ]
    .into_iter()
    .flatten()
    .collect()
  }

  /// `true` if no criterion is present.
  pub fn is_unconstrained(&self) -> bool { self.predicates().is_empty() }

  pub fn matches(&self, applicant: &Applicant) -> bool {
    self.predicates().iter().all(|p| p.matches(applicant))
  }
}
