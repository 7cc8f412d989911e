// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Env command.

use anyhow::Context;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::cli::env::EnvArgs;
use crate::config::Definitions;
use crate::env::{EnvironmentSchema, Namespace, current_env};
use crate::error::Result;

/// Run the env command against a snapshot of the process environment.
///
/// # Errors
///
/// Returns an error if the schema cannot be compiled, a required variable
/// is missing, or a value fails to decode.
pub fn run_env_command(args: &EnvArgs, definitions: &Definitions) -> Result<()> {
    let schema = definitions
        .environment(&args.schema)
        .with_context(|| format!("failed to compile schema '{}'", args.schema))?;

    for line in env_report(&schema, current_env(), args.json)? {
        println!("{line}");
    }
    Ok(())
}

/// Reads every declared variable, as `NAME=value` lines or one JSON object.
///
/// # Errors
///
/// Returns an error if a required variable is missing or a value fails to
/// decode.
pub fn env_report<N: Namespace>(
    schema: &EnvironmentSchema,
    namespace: N,
    json: bool,
) -> Result<Vec<String>> {
    let proxy = schema.bind(namespace)?;
    let snapshot = proxy.snapshot()?;

    if json {
        let object: JsonMap<String, JsonValue> = snapshot
            .into_iter()
            .map(|(name, value)| (name, value.to_json()))
            .collect();
        return Ok(vec![JsonValue::Object(object).to_string()]);
    }

    Ok(snapshot
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect())
}
