mod error;
mod instance;
pub mod json;
mod schema;

pub use error::MessageError;
pub use instance::{FieldValue, MessageInstance};
pub use schema::{Descriptor, EnumDescriptor, FieldDescriptor, FieldKind, MessageSchema};
