//! Intake validation for both creation pathways.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
  Error, Result,
  applicant::{NewManualApplicant, NewPortalApplicant},
};

/// RFC 5322-style local part, a single `@`, and a dotted domain.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-Z0-9_!#$%&'*+/=?`{|}~^.-]+@[a-zA-Z0-9.-]+$")
    .expect("email pattern is a valid regex")
});

fn require(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::BlankField(field));
  }
  Ok(())
}

/// Reject blank or syntactically invalid email addresses.
pub fn email(value: &str) -> Result<()> {
  require("email", value)?;
  if !EMAIL.is_match(value) {
    return Err(Error::InvalidEmail(value.to_owned()));
  }
  Ok(())
}

impl NewManualApplicant {
  pub fn validate(&self) -> Result<()> {
    email(&self.email)?;
    require("firstName", &self.first_name)?;
    require("lastName", &self.last_name)
  }
}

impl NewPortalApplicant {
  /// Portal submissions may omit the first name.
  pub fn validate(&self) -> Result<()> {
    email(&self.email)?;
    require("lastName", &self.last_name)
  }
}
