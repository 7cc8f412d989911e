// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transform command.

use anyhow::Context;
use std::io::Write;
use tracing::{debug, info};

use crate::cli::transform::TransformArgs;
use crate::config::Definitions;
use crate::error::Result;
use crate::schema::pattern::PatternSchema;
use crate::schema::transform::transform_text;
use crate::utility::encoding::decode_input;

/// Run the transform command.
///
/// # Errors
///
/// Returns an error if the schema cannot be compiled, the input cannot be
/// read, or a line fails in strict mode.
pub fn run_transform_command(args: &TransformArgs, definitions: &Definitions) -> Result<()> {
    let schema = definitions
        .pattern(&args.schema)
        .with_context(|| format!("failed to compile schema '{}'", args.schema))?;
    let bytes = super::read_input(args.file.as_deref())?;
    let text = decode_input(args.encoding, &bytes);
    debug!(schema = %args.schema, bytes = bytes.len(), "Transforming input");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = write_transformed(&schema, &text, args.strict, &mut out)?;
    info!(lines = written, "Transform complete");
    Ok(())
}

/// Writes each transformed line to `out` as it is produced.
///
/// Lines written before a strict failure stay written. Returns the number
/// of lines written.
///
/// # Errors
///
/// Returns the first line failure in strict mode, or any write error.
pub fn write_transformed<W: Write>(
    schema: &PatternSchema,
    text: &str,
    strict: bool,
    out: &mut W,
) -> Result<usize> {
    let mut written = 0;
    for (index, line) in transform_text(schema, text, strict).enumerate() {
        let line = line.with_context(|| format!("line {}", index + 1))?;
        writeln!(out, "{line}").context("failed to write output")?;
        written += 1;
    }
    out.flush().context("failed to write output")?;
    Ok(written)
}
