//! Error types for `intake-core`.

use thiserror::Error;

/// A rejected applicant submission. Every variant is a client-input error;
/// none of them is raised after a write has started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{0} must not be blank")]
  BlankField(&'static str),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
