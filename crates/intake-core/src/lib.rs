//! Core types and trait definitions for the applicant intake service.
//!
//! This crate is free of HTTP and database dependencies. The store backend
//! and the API layer both depend on it.

pub mod applicant;
pub mod error;
pub mod filter;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
