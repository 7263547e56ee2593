//! Purpose: Hold top-level CLI command dispatch for `snowtable`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Known tables are validated locally before any request is sent.
//! Invariants: Every successful command prints exactly one JSON document.

use super::*;
use snowtable::api::GenericRecord;
use snowtable::tables::{self, TableInfo};

pub(super) fn dispatch_command(
    command: Command,
    connection: &ConnectionArgs,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Tables { json } => {
            if json {
                let tables: Vec<Value> = tables::all()
                    .iter()
                    .map(|info| json!({"name": info.name, "endpoint": info.endpoint}))
                    .collect();
                emit_json(json!({ "tables": tables }));
            } else {
                for info in tables::all() {
                    println!("{:<28} {}", info.name, info.endpoint);
                }
            }
            Ok(RunOutcome::ok())
        }
        Command::Get { table, sys_id } => {
            let target = Target::resolve(&table)?;
            let client = connection.client()?;
            let record: GenericRecord = client.fetch_by_id(target.endpoint(), &sys_id)?;
            emit_json(record_json(&record)?);
            Ok(RunOutcome::ok())
        }
        Command::Find { table, name } => {
            let target = Target::resolve(&table)?;
            let client = connection.client()?;
            let record: GenericRecord = client.fetch_by_name(target.endpoint(), &name)?;
            emit_json(record_json(&record)?);
            Ok(RunOutcome::ok())
        }
        Command::Create { table, json, scope } => {
            let target = Target::resolve(&table)?;
            let mut record = target.record_from(read_record_json(&json)?)?;
            if let Some(scope) = scope {
                record.base.scope = scope;
            }
            let client = connection.client()?;
            let created = client.create(target.endpoint(), &record)?;
            emit_json(record_json(&created)?);
            Ok(RunOutcome::ok())
        }
        Command::Update {
            table,
            sys_id,
            json,
        } => {
            let target = Target::resolve(&table)?;
            let mut record = target.record_from(read_record_json(&json)?)?;
            record.base.id = sys_id;
            let client = connection.client()?;
            client.update(target.endpoint(), &record)?;
            emit_json(json!({
                "updated": {"endpoint": target.endpoint(), "sys_id": record.base.id}
            }));
            Ok(RunOutcome::ok())
        }
        Command::Delete { table, sys_id } => {
            let target = Target::resolve(&table)?;
            let client = connection.client()?;
            client.delete(target.endpoint(), &sys_id)?;
            emit_json(json!({
                "deleted": {"endpoint": target.endpoint(), "sys_id": sys_id}
            }));
            Ok(RunOutcome::ok())
        }
    }
}

/// A table named on the command line: a registered table or a raw `.do` endpoint.
enum Target {
    Known(&'static TableInfo),
    Raw(String),
}

impl Target {
    fn resolve(name: &str) -> Result<Self, Error> {
        if let Some(info) = tables::lookup(name) {
            return Ok(Target::Known(info));
        }
        if name.ends_with(".do") {
            return Ok(Target::Raw(name.to_string()));
        }
        Err(Error::new(ErrorKind::Usage)
            .with_message(format!("unknown table: {name}"))
            .with_hint("Run `snowtable tables`, or pass an endpoint ending in .do."))
    }

    fn endpoint(&self) -> &str {
        match self {
            Target::Known(info) => info.endpoint,
            Target::Raw(endpoint) => endpoint,
        }
    }

    fn record_from(&self, fields: Value) -> Result<GenericRecord, Error> {
        if let Target::Known(info) = self {
            info.validate(&fields).map_err(|err| {
                err.with_hint("Encode booleans and integers as strings, e.g. \"true\" or \"100\".")
            })?;
        }
        serde_json::from_value(fields).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("record json is not a flat object")
                .with_source(err)
        })
    }
}

fn record_json(record: &GenericRecord) -> Result<Value, Error> {
    serde_json::to_value(record).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode record")
            .with_source(err)
    })
}
