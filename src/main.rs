//! Purpose: `snowtable` CLI entry point and command dispatch bootstrap.
//! Role: Binary crate root; parses args, builds the client, emits JSON on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Credentials come from flags or environment, never from files.
#![allow(clippy::result_large_err)]
use std::io::{self, IsTerminal, Read};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use snowtable::api::{ClientConfig, Error, ErrorKind, TableClient, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Run `snowtable --help` for usage."));
            }
        },
    };

    init_tracing();
    command_dispatch::dispatch_command(cli.command, &cli.connection)
}

#[derive(Parser)]
#[command(
    name = "snowtable",
    version,
    about = "Create, read, update and delete records on ServiceNow-style table endpoints",
    long_about = None,
    after_help = r#"EXAMPLES
  $ export SNOW_INSTANCE_URL=https://dev12345.service-now.com SNOW_USERNAME=admin SNOW_PASSWORD=...
  $ snowtable tables
  $ snowtable create widget '{"name": "w1", "public": "true"}'
  $ snowtable get widget 0123456789abcdef0123456789abcdef
  $ snowtable find role x_acme.admin
  $ snowtable update widget 0123456789abcdef0123456789abcdef '{"public": "false"}'
  $ snowtable delete widget 0123456789abcdef0123456789abcdef

<TABLE> is a short name from `snowtable tables` or a raw endpoint such as sp_widget.do."#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone, Debug)]
struct ConnectionArgs {
    #[arg(
        long,
        env = "SNOW_INSTANCE_URL",
        global = true,
        help = "Instance root url, e.g. https://dev12345.service-now.com"
    )]
    instance_url: Option<String>,
    #[arg(long, env = "SNOW_USERNAME", global = true, help = "Basic auth username")]
    username: Option<String>,
    #[arg(
        long,
        env = "SNOW_PASSWORD",
        global = true,
        hide_env_values = true,
        help = "Basic auth password"
    )]
    password: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Per-request timeout (e.g. 500ms, 30s, 2m)"
    )]
    timeout: Option<String>,
}

impl ConnectionArgs {
    fn config(&self) -> Result<ClientConfig, Error> {
        let instance_url = required_setting(&self.instance_url, "--instance-url", "SNOW_INSTANCE_URL")?;
        let username = required_setting(&self.username, "--username", "SNOW_USERNAME")?;
        let password = required_setting(&self.password, "--password", "SNOW_PASSWORD")?;
        let mut config = ClientConfig::new(instance_url, username, password);
        if let Some(timeout) = &self.timeout {
            config = config.with_timeout(parse_duration(timeout)?);
        }
        Ok(config)
    }

    fn client(&self) -> Result<TableClient, Error> {
        TableClient::new(&self.config()?)
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "List the tables known by short name")]
    Tables {
        #[arg(long, help = "Emit JSON instead of human-readable output")]
        json: bool,
    },
    #[command(about = "Fetch one record by sys_id")]
    Get {
        #[arg(help = "Table short name or endpoint")]
        table: String,
        #[arg(help = "Record sys_id")]
        sys_id: String,
    },
    #[command(about = "Fetch one record by its name field")]
    Find {
        #[arg(help = "Table short name or endpoint")]
        table: String,
        #[arg(help = "Value of the record's name field")]
        name: String,
    },
    #[command(about = "Insert a record and print what the instance stored")]
    Create {
        #[arg(help = "Table short name or endpoint")]
        table: String,
        #[arg(help = "Record fields as a JSON object, or - to read stdin")]
        json: String,
        #[arg(long, help = "Application scope to create the record in")]
        scope: Option<String>,
    },
    #[command(about = "Update fields of an existing record")]
    Update {
        #[arg(help = "Table short name or endpoint")]
        table: String,
        #[arg(help = "Record sys_id")]
        sys_id: String,
        #[arg(help = "Fields to write as a JSON object, or - to read stdin")]
        json: String,
    },
    #[command(about = "Delete a record by sys_id")]
    Delete {
        #[arg(help = "Table short name or endpoint")]
        table: String,
        #[arg(help = "Record sys_id")]
        sys_id: String,
    },
}

fn required_setting(value: &Option<String>, flag: &str, env: &str) -> Result<String, Error> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message(format!("missing {flag}"))
            .with_hint(format!("Pass {flag} or set {env}."))),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error:").trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn parse_duration(input: &str) -> Result<Duration, Error> {
    let invalid = || {
        Error::new(ErrorKind::Usage)
            .with_message("invalid duration")
            .with_hint("Use a number plus ms|s|m|h (e.g. 30s).")
    };
    let trimmed = input.trim();
    let split = trimmed.char_indices().find(|(_, ch)| !ch.is_ascii_digit());
    let (num_str, unit) = match split {
        Some((idx, _)) => trimmed.split_at(idx),
        None => ("", ""),
    };
    if num_str.is_empty() || unit.is_empty() {
        return Err(invalid());
    }
    let value: u64 = num_str.parse().map_err(|_| invalid())?;
    let millis = match unit {
        "ms" => value,
        "s" => value.saturating_mul(1_000),
        "m" => value.saturating_mul(60_000),
        "h" => value.saturating_mul(3_600_000),
        _ => return Err(invalid()),
    };
    if millis == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_millis(millis))
}

/// Parses a record argument; `-` reads the object from stdin.
fn read_record_json(arg: &str) -> Result<Value, Error> {
    let text = if arg == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("failed to read record json from stdin")
                .with_source(err)
        })?;
        buf
    } else {
        arg.to_string()
    };
    let value: Value = serde_json::from_str(&text).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("record json is not valid json")
            .with_source(err)
    })?;
    if !value.is_object() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("record json must be an object")
            .with_hint("Wrap fields in braces, e.g. '{\"name\": \"w1\"}'."));
    }
    Ok(value)
}

fn emit_json(value: Value) {
    let pretty = io::stdout().is_terminal();
    let json = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Transport => "request failed".to_string(),
        ErrorKind::MalformedEnvelope => "malformed response envelope".to_string(),
        ErrorKind::MalformedRecord => "malformed record".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::AmbiguousResult => "more than one record matched".to_string(),
        ErrorKind::Remote => "rejected by the instance".to_string(),
        ErrorKind::PreconditionFailed => "precondition failed".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(endpoint) = err.endpoint() {
        inner.insert("endpoint".to_string(), json!(endpoint));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    if let Some(reason) = err.reason() {
        inner.insert("reason".to_string(), json!(reason));
    }
    if let Some(body) = err.body() {
        inner.insert("body".to_string(), json!(body));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(reason) = err.reason() {
        lines.push(format!("reason: {reason}"));
    }
    if let Some(status) = err.status() {
        lines.push(format!("status: {status}"));
    }
    if let Some(endpoint) = err.endpoint() {
        lines.push(format!("endpoint: {endpoint}"));
    }
    for cause in error_causes(err) {
        lines.push(format!("caused by: {cause}"));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    lines.join("\n")
}
