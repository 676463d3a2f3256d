mod loader;

pub use loader::{load_record_schema, load_record_schema_str};
