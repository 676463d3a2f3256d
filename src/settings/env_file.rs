use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;

/// Parse `KEY=VALUE` lines into an ordered mapping.
///
/// Blank lines and lines whose first non-space character is `#` are
/// skipped, as are lines with no `=` at all. The value is the literal text
/// after the first `=`; there are no quoting or escaping rules. A later
/// line redefining a key wins.
pub fn parse_env_file(contents: &str) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();
    for line in contents.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim_end();
        if key.is_empty() {
            continue;
        }
        vars.insert(key.to_string(), value.to_string());
    }
    vars
}

/// Read and parse an env file. A missing file is not an error (the file is
/// an optional overlay); any other I/O failure is.
pub(super) fn read_env_file(path: &Path) -> io::Result<Option<IndexMap<String, String>>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse_env_file(&contents))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
