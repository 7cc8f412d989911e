// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Map command.

use anyhow::Context;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::cli::map::MapArgs;
use crate::config::Definitions;
use crate::error::Result;
use crate::schema::mapping::MappingSchema;

/// Run the map command.
///
/// # Errors
///
/// Returns an error if the schema cannot be compiled, the input is not
/// JSON, or any object fails to build.
pub fn run_map_command(args: &MapArgs, definitions: &Definitions) -> Result<()> {
    let schema = definitions
        .mapping(&args.schema)
        .with_context(|| format!("failed to compile schema '{}'", args.schema))?;
    let bytes = super::read_input(args.file.as_deref())?;
    let input: JsonValue = serde_json::from_slice(&bytes).context("input is not valid JSON")?;

    let output = map_documents(&schema, input)?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

/// Builds one object, or every object of an array, through `schema`.
///
/// # Errors
///
/// Returns the first build failure, naming the array index.
pub fn map_documents(schema: &Arc<MappingSchema>, input: JsonValue) -> Result<JsonValue> {
    match input {
        JsonValue::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                schema
                    .build_json(item)
                    .map(|map| map.to_json())
                    .with_context(|| format!("item {index}"))
            })
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),
        other => Ok(schema.build_json(other)?.to_json()),
    }
}
