//! In-memory backend, a drop-in stand-in for the SQL engine in tests and
//! prototypes.

mod repository;

pub use repository::InMemoryRepository;
