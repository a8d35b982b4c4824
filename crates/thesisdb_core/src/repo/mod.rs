//! Persistence layer for users and papers.
//!
//! # Responsibility
//! - Own the writer connection and route every write through the
//!   transaction runner.
//! - Provide the read collaborator used by uniqueness checks.
//!
//! # Invariants
//! - Writes validate input before any SQL mutation.
//! - Each entity write issues exactly one statement per transaction.

pub mod reader;
pub mod writer;
