// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pattern schemas: typed fields extracted from a string by capture groups.
//!
//! # Binding
//!
//! ```text
//! named groups        (?P<num>[0-9]+) (?P<fruit>.+)     -> by name
//! explicit names      ^([0-9]+) things  + ["qty"]       -> by position
//!
//! checked at compile time, in order:
//!   names given + named groups present     -> GroupMismatch
//!   names given + count differs            -> GroupMismatch
//!   no names    + unnamed groups present   -> GroupMismatch
//!   group bound to an undeclared name      -> UnknownGroup
//!   declared field without a group         -> GroupMismatch
//! ```
//!
//! # Records
//!
//! ```text
//! parse(raw) --match--> PatternRecord { values[], spans[] }
//!     | no match
//!     v
//! PatternError::NoMatch
//!
//! render(): template given -> template(values)
//!           no template    -> raw with changed spans spliced
//! ```

pub mod template;


use std::ops::Range;

use bon::Builder;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorClass, PatternError, SchemaError};
use crate::schema::types::{FieldSpec, SchemaOptions};
use crate::schema::value::Value;
use crate::schema::{SchemaDescriptor, coerce, compile_with_reserved};
use template::Template;

/// Names a pattern record owns; fields may not shadow them.
pub const RESERVED_NAMES: &[&str] = &[
    "capitalize", "count", "delete", "encode", "endswith", "find", "format", "get", "index",
    "join", "len", "lower", "raw", "render", "replace", "schema", "set", "split", "startswith",
    "strip", "upper",
];

/// How much of the input the pattern must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Match must start at the beginning of the input.
    #[default]
    Prefix,
    /// Match must cover the whole input.
    Full,
}

/// Options for [`PatternSchema::compile`].
#[derive(Debug, Clone, Builder)]
pub struct PatternOptions {
    #[builder(into, setters(name = with_name), default = String::from("pattern"))]
    name: String,
    #[builder(setters(name = with_strict), default = false)]
    strict: bool,
    /// Field names paired positionally with unnamed groups.
    #[builder(setters(name = with_names), default)]
    names: Vec<String>,
    #[builder(into, setters(name = with_template))]
    template: Option<String>,
    #[builder(setters(name = with_anchor), default)]
    anchor: Anchor,
    #[builder(setters(name = with_reserved), default)]
    reserved: Vec<String>,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A compiled pattern and its group-to-field binding.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    /// Capture group index per field, in field declaration order.
    groups: Vec<usize>,
}

impl CompiledPattern {
    /// The pattern as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Capture group index bound to the field at `position`.
    #[must_use]
    pub fn group_of(&self, position: usize) -> Option<usize> {
        self.groups.get(position).copied()
    }
}

/// Schema whose raw form is a string matched by a regular expression.
#[derive(Debug, Clone)]
pub struct PatternSchema {
    descriptor: SchemaDescriptor,
    pattern: CompiledPattern,
    template: Option<Template>,
}

impl PatternSchema {
    /// Compiles a pattern schema.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the fields are invalid, the pattern does
    /// not compile, groups and fields are not in 1:1 correspondence, or the
    /// template is malformed.
    ///
    /// # Example
    ///
    /// ```
    /// use schemata::schema::pattern::{PatternOptions, PatternSchema};
    /// use schemata::schema::types::{FieldSpec, TypeTag};
    ///
    /// let schema = PatternSchema::compile(
    ///     r"(?P<num>[0-9]+) (?P<fruit>.+)",
    ///     vec![FieldSpec::new("num", TypeTag::Int), FieldSpec::new("fruit", TypeTag::Str)],
    ///     PatternOptions::default(),
    /// )?;
    /// let record = schema.parse("34 bananas")?;
    /// assert_eq!(record.get("num")?.as_int(), Some(34));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn compile(
        pattern: &str,
        fields: impl IntoIterator<Item = FieldSpec>,
        options: PatternOptions,
    ) -> Result<Self, SchemaError> {
        let schema_options = SchemaOptions::builder()
            .with_name(options.name.clone())
            .with_strict(options.strict)
            .with_reserved(options.reserved.clone())
            .build();
        let descriptor = compile_with_reserved(
            fields,
            &schema_options,
            RESERVED_NAMES,
            ErrorClass::Value,
        )?;

        let anchored = match options.anchor {
            Anchor::Prefix => format!("^(?:{pattern})"),
            Anchor::Full => format!("^(?:{pattern})$"),
        };
        let regex = Regex::new(&anchored).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let groups = bind_groups(&regex, &options.names, &descriptor)?;
        let template = options
            .template
            .as_deref()
            .map(|source| Template::compile(source, &descriptor))
            .transpose()?;

        Ok(Self {
            descriptor,
            pattern: CompiledPattern {
                source: pattern.to_string(),
                regex,
                groups,
            },
            template,
        })
    }

    #[must_use]
    pub const fn descriptor(&self) -> &SchemaDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    #[must_use]
    pub const fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Returns `true` if `raw` matches the pattern.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.pattern.regex.is_match(raw)
    }

    /// Matches `raw` and decodes every field.
    ///
    /// Groups that did not participate in the match decode to the field's
    /// default (or [`Value::None`]).
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::NoMatch`] when `raw` does not match,
    /// [`PatternError::MissingRequired`] when a required field's group did not
    /// participate, and [`PatternError::Field`] for strict decode failures.
    pub fn parse(&self, raw: &str) -> Result<PatternRecord<'_>, PatternError> {
        let captures =
            self.pattern
                .regex
                .captures(raw)
                .ok_or_else(|| PatternError::NoMatch {
                    pattern: self.pattern.source.clone(),
                    input: raw.to_string(),
                })?;

        let strict = self.descriptor.is_strict();
        let fields = self.descriptor.fields();
        let mut values = Vec::with_capacity(fields.len());
        let mut spans = Vec::with_capacity(fields.len());

        for (field, group) in fields.iter().zip(&self.pattern.groups) {
            match captures.get(*group) {
                Some(m) => {
                    let value = coerce::decode_text(field.tag(), m.as_str(), strict).map_err(
                        |source| PatternError::Field {
                            field: field.name().to_string(),
                            source,
                        },
                    )?;
                    values.push(value);
                    spans.push(Some(m.range()));
                }
                None if field.is_required() => {
                    return Err(PatternError::MissingRequired {
                        field: field.name().to_string(),
                    });
                }
                None => {
                    values.push(field.default_value());
                    spans.push(None);
                }
            }
        }

        Ok(PatternRecord {
            schema: self,
            raw: raw.to_string(),
            changed: vec![false; values.len()],
            values,
            spans,
        })
    }
}

fn bind_groups(
    regex: &Regex,
    names: &[String],
    descriptor: &SchemaDescriptor,
) -> Result<Vec<usize>, SchemaError> {
    let mut named: Vec<(usize, &str)> = Vec::new();
    let mut unnamed: Vec<usize> = Vec::new();
    for (index, name) in regex.capture_names().enumerate().skip(1) {
        match name {
            Some(name) => named.push((index, name)),
            None => unnamed.push(index),
        }
    }

    let bound: Vec<(usize, &str)> = if names.is_empty() {
        if !unnamed.is_empty() {
            return Err(SchemaError::GroupMismatch {
                message: format!(
                    "pattern has {} unnamed group(s) but no field names were given",
                    unnamed.len()
                ),
            });
        }
        named
    } else {
        if !named.is_empty() {
            return Err(SchemaError::GroupMismatch {
                message: "named groups cannot be combined with explicit field names".to_string(),
            });
        }
        if unnamed.len() != names.len() {
            return Err(SchemaError::GroupMismatch {
                message: format!(
                    "pattern has {} group(s) but {} field name(s) were given",
                    unnamed.len(),
                    names.len()
                ),
            });
        }
        if let Some(name) = names
            .iter()
            .enumerate()
            .find_map(|(i, name)| names[..i].contains(name).then_some(name))
        {
            return Err(SchemaError::GroupMismatch {
                message: format!("field name '{name}' is given more than once"),
            });
        }
        unnamed
            .into_iter()
            .zip(names.iter().map(String::as_str))
            .collect()
    };

    if let Some((_, name)) = bound.iter().find(|(_, name)| descriptor.field(name).is_none()) {
        return Err(SchemaError::UnknownGroup {
            name: (*name).to_string(),
        });
    }

    descriptor
        .field_names()
        .map(|field| {
            bound
                .iter()
                .find(|(_, name)| *name == field)
                .map(|(index, _)| *index)
                .ok_or_else(|| SchemaError::GroupMismatch {
                    message: format!("field '{field}' has no capture group"),
                })
        })
        .collect()
}

/// A string that matched a [`PatternSchema`], viewed as typed fields.
#[derive(Debug, Clone)]
pub struct PatternRecord<'s> {
    schema: &'s PatternSchema,
    raw: String,
    values: Vec<Value>,
    spans: Vec<Option<Range<usize>>>,
    changed: Vec<bool>,
}

impl<'s> PatternRecord<'s> {
    #[must_use]
    pub const fn schema(&self) -> &'s PatternSchema {
        self.schema
    }

    /// The input this record was parsed from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    fn position(&self, name: &str) -> Result<usize, PatternError> {
        self.schema
            .descriptor
            .position(name)
            .ok_or_else(|| PatternError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Reads a field.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownField`] for undeclared names.
    pub fn get(&self, name: &str) -> Result<&Value, PatternError> {
        let position = self.position(name)?;
        Ok(&self.values[position])
    }

    /// Writes a field, coercing the value to its declared type.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownField`] for undeclared names and
    /// [`PatternError::Field`] when a strict schema rejects the value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PatternError> {
        let position = self.position(name)?;
        let field = &self.schema.descriptor.fields()[position];
        let value = coerce::coerce_value(field.tag(), value.into(), self.schema.descriptor.is_strict())
            .map_err(|source| PatternError::Field {
                field: name.to_string(),
                source,
            })?;
        self.values[position] = value;
        self.changed[position] = true;
        Ok(())
    }

    /// Resets a field to its default (or [`Value::None`]).
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownField`] for undeclared names.
    pub fn delete(&mut self, name: &str) -> Result<(), PatternError> {
        let position = self.position(name)?;
        self.values[position] = self.schema.descriptor.fields()[position].default_value();
        self.changed[position] = true;
        Ok(())
    }

    /// Field names and values in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.descriptor.field_names().zip(&self.values)
    }

    /// Renders the record back to its string form.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Render`] when a template spec does not fit a
    /// field's current value, or when a changed field cannot be spliced back
    /// into the input.
    pub fn render(&self) -> Result<String, PatternError> {
        match &self.schema.template {
            Some(template) => template.render(&self.values).map_err(|(index, message)| {
                PatternError::Render {
                    field: self.schema.descriptor.fields()[index].name().to_string(),
                    message,
                }
            }),
            None => self.splice(),
        }
    }

    /// Replaces the spans of changed fields in the original input.
    ///
    /// A changed field whose group did not take part in the match has
    /// nowhere to go; that is an error unless the field holds its default.
    /// Changed spans must not overlap.
    fn splice(&self) -> Result<String, PatternError> {
        let fields = self.schema.descriptor.fields();
        let mut edits: Vec<(usize, Range<usize>, String)> = Vec::new();
        for (i, span) in self.spans.iter().enumerate() {
            if !self.changed[i] {
                continue;
            }
            let field = &fields[i];
            let Some(span) = span.clone() else {
                if self.values[i] == field.default_value() {
                    continue;
                }
                return Err(PatternError::Render {
                    field: field.name().to_string(),
                    message: "group did not take part in the match, nothing to replace".to_string(),
                });
            };
            let text = coerce::encode(field.tag(), &self.values[i]).unwrap_or_default();
            edits.push((i, span, text));
        }
        edits.sort_by_key(|(_, span, _)| span.start);

        let mut out = String::with_capacity(self.raw.len());
        let mut cursor = 0;
        for (i, span, text) in edits {
            if span.start < cursor {
                return Err(PatternError::Render {
                    field: fields[i].name().to_string(),
                    message: "group overlaps another changed group".to_string(),
                });
            }
            out.push_str(&self.raw[cursor..span.start]);
            out.push_str(&text);
            cursor = span.end;
        }
        out.push_str(&self.raw[cursor..]);
        Ok(out)
    }
}
