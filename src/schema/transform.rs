// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lazy line transformation through a pattern schema.
//!
//! ```text
//! line --parse--> record --render--> Ok(rendered)
//!   |                |
//!   +-- no match ----+-- render error
//!           |
//!   strict:  Err(e), then the iterator is exhausted
//!   lenient: Ok(line) unchanged (e.g. a header row)
//! ```

use std::iter::FusedIterator;

use tracing::trace;

use crate::error::PatternError;
use crate::schema::pattern::PatternSchema;

/// Iterator returned by [`transform_lines`].
#[derive(Debug)]
pub struct TransformLines<'s, I> {
    schema: &'s PatternSchema,
    lines: I,
    strict: bool,
    failed: bool,
}

impl<I, S> Iterator for TransformLines<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<String, PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = self.lines.next()?;
        let line = line.as_ref();

        match self.schema.parse(line).and_then(|record| record.render()) {
            Ok(rendered) => Some(Ok(rendered)),
            Err(e) if self.strict => {
                self.failed = true;
                Some(Err(e))
            }
            Err(e) => {
                trace!(error = %e, "Passing line through unchanged");
                Some(Ok(line.to_string()))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            let (_, upper) = self.lines.size_hint();
            (0, upper)
        }
    }
}

impl<I, S> FusedIterator for TransformLines<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
}

/// Transforms each line through `schema`, lazily.
///
/// Every call forms a new, independent sequence.
///
/// # Example
///
/// ```
/// use schemata::schema::pattern::{PatternOptions, PatternSchema};
/// use schemata::schema::transform::transform_lines;
/// use schemata::schema::types::{FieldSpec, TypeTag};
///
/// let schema = PatternSchema::compile(
///     r"(?P<item>[^,]+),\$?(?P<cost>[0-9.]+)",
///     vec![FieldSpec::new("item", TypeTag::Str), FieldSpec::new("cost", TypeTag::Float)],
///     PatternOptions::builder().with_template("{item},${cost:.2f}").build(),
/// )?;
/// let out: Vec<String> =
///     transform_lines(&schema, ["item,cost", "apple,$2"], false).collect::<Result<_, _>>()?;
/// assert_eq!(out, ["item,cost", "apple,$2.00"]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn transform_lines<I>(
    schema: &PatternSchema,
    lines: I,
    strict: bool,
) -> TransformLines<'_, I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    TransformLines {
        schema,
        lines: lines.into_iter(),
        strict,
        failed: false,
    }
}

/// Splits `text` into lines and transforms each one.
pub fn transform_text<'a>(
    schema: &'a PatternSchema,
    text: &'a str,
    strict: bool,
) -> TransformLines<'a, std::str::Lines<'a>> {
    transform_lines(schema, text.lines(), strict)
}
