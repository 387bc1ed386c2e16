//! Storage engine implementations.
//!
//! This module provides concrete implementations of the `Persistence`
//! contract defined in `protosql_core::storage`:
//!
//! - `postgres`: builds parameterized PostgreSQL-dialect statements and runs
//!   them through an externally supplied connection collaborator.
//! - `inmemory`: process-local indexed collections with the same contract,
//!   for testing and substitution. No database required.

pub mod inmemory;
pub mod postgres;
