use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indexmap::IndexMap;

use schemaval::{
    OutputDestination, OutputOptions, RecordInstance, RecordSchema, SettingsError,
    SettingsOptions, ValidationError, emit, from_json, load_record_schema_str, load_settings,
};

#[derive(Debug, Parser)]
#[command(
    name = "schemaval",
    version,
    about = "Validate JSON documents and environments against record schemas"
)]
struct Cli {
    /// Schema spec: file path, inline JSON payload, or "-" for stdin
    #[arg(short = 's', long = "schema", value_name = "SPEC")]
    schema: String,

    /// Document spec: file path, inline JSON payload, or "-" for stdin
    #[arg(short = 'd', long = "data", value_name = "SPEC")]
    data: Option<String>,

    /// Validate the process environment against the schema instead of a document
    #[arg(long = "from-env", conflicts_with = "data")]
    from_env: bool,

    /// Overlay file merged beneath the environment (KEY=VALUE lines)
    #[arg(long = "env-file", value_name = "PATH", requires = "from_env")]
    env_file: Option<PathBuf>,

    /// Match environment variables ignoring ASCII case
    #[arg(long = "case-insensitive", requires = "from_env")]
    case_insensitive: bool,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let schema_stdin = cli.schema == "-";
    let data_stdin = cli.data.as_deref() == Some("-");
    if schema_stdin && data_stdin {
        return Err(eyre!(
            "cannot read schema and data from stdin simultaneously; provide inline content or files"
        ));
    }

    let schema_text = read_spec(&cli.schema).wrap_err("failed to load schema")?;
    let schema = load_record_schema_str(&schema_text).map_err(|e| eyre!(e))?;

    let record = if cli.from_env {
        match validate_environment(&cli, &schema) {
            Ok(record) => record,
            Err(SettingsError::Validation(err)) => return Ok(report_rejection(&err)),
            Err(err) => return Err(eyre!(err)),
        }
    } else {
        let data_spec = cli
            .data
            .as_deref()
            .ok_or_else(|| eyre!("either --data or --from-env is required"))?;
        let contents = read_spec(data_spec).wrap_err("failed to load data")?;
        match from_json(&schema, &contents) {
            Ok(record) => record,
            Err(err) => return Ok(report_rejection(&err)),
        }
    };

    emit(&record, &output_options(&cli)).map_err(|e| eyre!(e))?;
    Ok(ExitCode::SUCCESS)
}

fn validate_environment(cli: &Cli, schema: &RecordSchema) -> Result<RecordInstance, SettingsError> {
    let env: IndexMap<String, String> = std::env::vars().collect();
    let mut options = SettingsOptions::new().with_case_sensitive(!cli.case_insensitive);
    if let Some(path) = &cli.env_file {
        options = options.with_env_file(path);
    }
    load_settings(schema, &env, &options)
}

fn report_rejection(err: &ValidationError) -> ExitCode {
    match err {
        ValidationError::MalformedInput { message } => {
            eprintln!("malformed input: {message}");
        }
        ValidationError::Rejected { violations } => {
            eprintln!(
                "validation failed with {} violation{}:",
                violations.len(),
                if violations.len() == 1 { "" } else { "s" }
            );
            for violation in violations {
                eprintln!("  {violation}");
            }
        }
    }
    ExitCode::FAILURE
}

/// Resolve a spec argument: "-" reads stdin, a payload starting with "{" is
/// taken inline, anything else is a file path.
fn read_spec(spec: &str) -> Result<String> {
    if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read stdin")?;
        return Ok(buffer);
    }
    if spec.trim_start().starts_with('{') {
        return Ok(spec.to_string());
    }
    fs::read_to_string(spec).wrap_err_with(|| format!("failed to read {spec}"))
}

fn output_options(cli: &Cli) -> OutputOptions {
    let mut destinations: Vec<OutputDestination> = cli
        .outputs
        .iter()
        .map(|dest| {
            if dest == "-" {
                OutputDestination::Stdout
            } else {
                OutputDestination::file(dest)
            }
        })
        .collect();
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }
    OutputOptions::default()
        .with_pretty(!cli.no_pretty)
        .with_destinations(destinations)
}
