//! Core domain model and boundary traits for protosql.
//!
//! protosql maps structured messages — named typed fields, enums, nested
//! messages, repeated values — onto a relational store. This crate holds the
//! pieces every engine shares: the schema descriptor abstraction, field values
//! and message instances, the embedded-message JSON codec, the `Persistence`
//! CRUD contract, the SQL connection collaborator traits, and the error
//! taxonomy. The concrete engines live in the `protosql` crate.

pub mod message;
pub mod storage;
