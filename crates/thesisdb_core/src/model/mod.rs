//! Input records and field validators for users and papers.
//!
//! # Responsibility
//! - Define the raw input shapes accepted by the entity writers.
//! - Turn raw input into validated records, rejecting at the first rule
//!   violation.
//!
//! # Invariants
//! - A validated record holds plain strings only; optional inputs default
//!   to the empty string.
//! - Lengths are counted in characters, not bytes.

pub mod paper;
pub mod user;
pub mod validation;
