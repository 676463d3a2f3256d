#![deny(rust_2018_idioms)]

mod domain;
mod io;
mod record;
mod schema;
mod settings;

pub use domain::{FieldKind, FieldSchema, RecordSchema};
pub use io::{
    OutputDestination, OutputOptions, emit, from_json, parse_document_str, to_json, to_json_pretty,
};
pub use record::{FieldViolation, RecordInstance, ValidationError, ViolationKind, validate};
pub use schema::{load_record_schema, load_record_schema_str};
pub use settings::{SettingsError, SettingsOptions, load_settings, merge_sources, parse_env_file};

pub mod prelude {
    pub use super::{
        FieldKind, FieldSchema, RecordInstance, RecordSchema, SettingsOptions, ValidationError,
        from_json, load_settings, to_json, validate,
    };
}
