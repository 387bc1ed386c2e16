mod connection;
mod error;
mod traits;
mod types;

pub use connection::{ConnectionSource, SqlConnection};
pub use error::{PersistenceError, Result};
pub use traits::Persistence;
pub use types::{table_name, SqlRow, SqlValue, DEFAULT_ID_NAME};
