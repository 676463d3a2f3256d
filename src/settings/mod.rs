mod env_file;

pub use env_file::parse_env_file;

use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::RecordSchema;
use crate::record::{RecordInstance, ValidationError, validate};

/// Controls how the settings source is assembled.
#[derive(Debug, Clone)]
pub struct SettingsOptions {
    /// Optional `KEY=VALUE` overlay file, merged beneath the environment.
    pub env_file: Option<PathBuf>,
    /// Exact variable-name matching when true (the default); otherwise the
    /// first ASCII-case-insensitive match in merge order is used.
    pub case_sensitive: bool,
}

impl Default for SettingsOptions {
    fn default() -> Self {
        Self {
            env_file: None,
            case_sensitive: true,
        }
    }
}

impl SettingsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }
}

/// Failure to produce settings: either the overlay file could not be read,
/// or the merged source did not validate.
#[derive(Debug)]
pub enum SettingsError {
    File { path: PathBuf, source: io::Error },
    Validation(ValidationError),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::File { path, source } => {
                write!(f, "failed to read env file {}: {source}", path.display())
            }
            SettingsError::Validation(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::File { source, .. } => Some(source),
            SettingsError::Validation(err) => Some(err),
        }
    }
}

impl From<ValidationError> for SettingsError {
    fn from(err: ValidationError) -> Self {
        SettingsError::Validation(err)
    }
}

/// Merge file-defined variables with the environment. The environment wins:
/// an env value replaces a file value under the same key, while the key
/// keeps its original position in the mapping.
pub fn merge_sources(
    file_vars: IndexMap<String, String>,
    env: &IndexMap<String, String>,
) -> IndexMap<String, String> {
    let mut merged = file_vars;
    for (key, value) in env {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Load and validate settings for `schema` from an explicit environment
/// snapshot plus the optional env file named in `options`.
///
/// The environment is an explicit parameter, never read from the process.
/// Values are all text at this point; the per-kind coercion rules turn them
/// into typed fields during validation.
pub fn load_settings(
    schema: &RecordSchema,
    env: &IndexMap<String, String>,
    options: &SettingsOptions,
) -> Result<RecordInstance, SettingsError> {
    let file_vars = match &options.env_file {
        Some(path) => env_file::read_env_file(path)
            .map_err(|source| SettingsError::File {
                path: path.clone(),
                source,
            })?
            .unwrap_or_default(),
        None => IndexMap::new(),
    };
    let merged = merge_sources(file_vars, env);

    let mut mapping = Map::new();
    for field in schema.fields() {
        if let Some(value) = lookup(&merged, &field.name, options.case_sensitive) {
            mapping.insert(field.name.clone(), Value::String(value.clone()));
        }
    }
    validate(schema, &mapping).map_err(SettingsError::from)
}

fn lookup<'a>(
    vars: &'a IndexMap<String, String>,
    name: &str,
    case_sensitive: bool,
) -> Option<&'a String> {
    if case_sensitive {
        vars.get(name)
    } else {
        vars.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}
