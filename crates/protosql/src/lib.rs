//! Storage engines for protosql.
//!
//! Derives SQL DDL from message schemas and performs CRUD between message
//! instances and relational rows. Two engines implement the shared
//! [`protosql_core::storage::Persistence`] contract: a PostgreSQL-dialect
//! engine driving an external SQL connection, and an in-memory engine used
//! for testing and substitution.

pub mod storage;

pub use storage::inmemory::InMemoryRepository;
pub use storage::postgres::{DdlGenerator, DdlOptions, PostgresRepository};
