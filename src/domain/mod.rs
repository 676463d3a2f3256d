mod schema;

pub use schema::{FieldKind, FieldSchema, RecordSchema};
