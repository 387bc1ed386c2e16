//! PostgreSQL-dialect backend: DDL generation, row marshalling, and the
//! statement-building persistence engine.

mod conversions;
mod ddl;
mod repository;

pub use conversions::{message_to_params, row_to_message};
pub use ddl::{DdlGenerator, DdlOptions};
pub use repository::PostgresRepository;
