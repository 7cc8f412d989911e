// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Render templates.
//!
//! ```text
//! "{item},${cost:.2f}"
//!    |
//!    v
//! [Field(item), Literal(",$"), Field(cost, spec .2f)]
//!
//! spec := [[fill]align][sign][#][0][width][,][.precision][type]
//! align := < > ^ =      sign := + - ' '
//! type  := s d f F e E g G n % x X o b
//! ```
//!
//! Placeholders are resolved against the declared fields when the template
//! is compiled, so an unknown name or a malformed spec is a definition error.

use crate::error::SchemaError;
use crate::schema::SchemaDescriptor;
use crate::schema::value::Value;

/// A compiled render template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Field { index: usize, spec: FormatSpec },
}

impl Template {
    /// Parses `source` and binds its placeholders to `descriptor`'s fields.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Template`] for unbalanced braces or bad format
    /// specs, and [`SchemaError::UnknownPlaceholder`] for undeclared names.
    pub fn compile(source: &str, descriptor: &SchemaDescriptor) -> Result<Self, SchemaError> {
        let template_err = |message: String| SchemaError::Template {
            template: source.to_string(),
            message,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(template_err("single '}' outside a placeholder".into())),
                '{' => {
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed {
                        return Err(template_err("unclosed placeholder".into()));
                    }

                    let (name, spec) = inner.split_once(':').unwrap_or((inner.as_str(), ""));
                    if name.is_empty() {
                        return Err(template_err("empty placeholder name".into()));
                    }
                    let index = descriptor.position(name).ok_or_else(|| {
                        SchemaError::UnknownPlaceholder {
                            name: name.to_string(),
                        }
                    })?;
                    let spec = FormatSpec::parse(spec)
                        .map_err(|e| template_err(format!("field '{name}': {e}")))?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field { index, spec });
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders `values`, which are indexed in field declaration order.
    ///
    /// On failure, returns the index of the offending field and a message.
    pub(crate) fn render(&self, values: &[Value]) -> Result<String, (usize, String)> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { index, spec } => {
                    let value = values.get(*index).unwrap_or(&Value::None);
                    let text = spec.apply(value).map_err(|e| (*index, e))?;
                    out.push_str(&text);
                }
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Str,
    Decimal,
    Fixed { upper: bool },
    Exponent { upper: bool },
    General { upper: bool },
    Percent,
    Hex { upper: bool },
    Octal,
    Binary,
}

/// A parsed `{field:spec}` format specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    fill: char,
    align: Option<Align>,
    sign: Sign,
    alternate: bool,
    width: Option<usize>,
    grouping: bool,
    precision: Option<usize>,
    kind: Option<Kind>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: Sign::Minus,
            alternate: false,
            width: None,
            grouping: false,
            precision: None,
            kind: None,
        }
    }
}

const fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::AfterSign),
        _ => None,
    }
}

impl FormatSpec {
    /// Parses a format spec (the part after `:`).
    ///
    /// # Errors
    ///
    /// Returns a message describing the first malformed component.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = Self::default();
        let mut i = 0;

        if let Some(align) = chars.get(1).copied().and_then(align_of) {
            out.fill = chars[0];
            out.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            out.align = Some(align);
            i = 1;
        }

        match chars.get(i) {
            Some('+') => {
                out.sign = Sign::Plus;
                i += 1;
            }
            Some('-') => i += 1,
            Some(' ') => {
                out.sign = Sign::Space;
                i += 1;
            }
            _ => {}
        }

        if chars.get(i) == Some(&'#') {
            out.alternate = true;
            i += 1;
        }

        if chars.get(i) == Some(&'0') {
            if out.align.is_none() {
                out.fill = '0';
                out.align = Some(Align::AfterSign);
            }
            i += 1;
        }

        let start = i;
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        if i > start {
            let digits: String = chars[start..i].iter().collect();
            out.width = Some(digits.parse().map_err(|_| format!("bad width '{digits}'"))?);
        }

        if chars.get(i) == Some(&',') {
            out.grouping = true;
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            i += 1;
            let start = i;
            while chars.get(i).is_some_and(char::is_ascii_digit) {
                i += 1;
            }
            if i == start {
                return Err("precision requires digits".to_string());
            }
            let digits: String = chars[start..i].iter().collect();
            out.precision = Some(
                digits
                    .parse()
                    .map_err(|_| format!("bad precision '{digits}'"))?,
            );
        }

        if let Some(&c) = chars.get(i) {
            out.kind = Some(match c {
                's' => Kind::Str,
                'd' => Kind::Decimal,
                'f' => Kind::Fixed { upper: false },
                'F' => Kind::Fixed { upper: true },
                'e' => Kind::Exponent { upper: false },
                'E' => Kind::Exponent { upper: true },
                'g' | 'n' => Kind::General { upper: false },
                'G' => Kind::General { upper: true },
                '%' => Kind::Percent,
                'x' => Kind::Hex { upper: false },
                'X' => Kind::Hex { upper: true },
                'o' => Kind::Octal,
                'b' => Kind::Binary,
                other => return Err(format!("unknown format type '{other}'")),
            });
            i += 1;
        }

        if i != chars.len() {
            let rest: String = chars[i..].iter().collect();
            return Err(format!("unexpected '{rest}' in format spec"));
        }
        if out.kind == Some(Kind::Str) && (out.sign != Sign::Minus || out.grouping) {
            return Err("sign and grouping are not allowed with 's'".to_string());
        }

        Ok(out)
    }

    /// Formats one value.
    ///
    /// # Errors
    ///
    /// Returns a message when the value's kind does not fit the spec type.
    pub fn apply(&self, value: &Value) -> Result<String, String> {
        if value.is_none() {
            return Ok(self.pad(String::new(), String::new(), false));
        }

        match (self.kind, value) {
            (None | Some(Kind::Str), Value::Str(s)) => {
                let text = match self.precision {
                    Some(p) => s.chars().take(p).collect(),
                    None => s.clone(),
                };
                Ok(self.pad(String::new(), text, false))
            }
            (Some(Kind::Str), other) => Err(format!("format 's' needs text, got {}", other.kind_name())),
            (None, Value::Int(i)) if self.precision.is_none() => Ok(self.integer(*i, 10, false)),
            (Some(Kind::Decimal), Value::Int(i)) => Ok(self.integer(*i, 10, false)),
            (Some(Kind::Hex { upper }), Value::Int(i)) => Ok(self.integer(*i, 16, upper)),
            (Some(Kind::Octal), Value::Int(i)) => Ok(self.integer(*i, 8, false)),
            (Some(Kind::Binary), Value::Int(i)) => Ok(self.integer(*i, 2, false)),
            (
                Some(Kind::Decimal | Kind::Hex { .. } | Kind::Octal | Kind::Binary),
                other,
            ) => Err(format!("integer format needs an int, got {}", other.kind_name())),
            (kind, Value::Int(_) | Value::Float(_)) => {
                let number = value.as_float().unwrap_or(f64::NAN);
                Ok(self.float(number, kind))
            }
            (None, other) => Ok(self.pad(String::new(), other.to_string(), false)),
            (Some(_), other) => Err(format!("numeric format needs a number, got {}", other.kind_name())),
        }
    }

    fn sign_prefix(&self, negative: bool) -> String {
        match (negative, self.sign) {
            (true, _) => "-".to_string(),
            (false, Sign::Plus) => "+".to_string(),
            (false, Sign::Space) => " ".to_string(),
            (false, Sign::Minus) => String::new(),
        }
    }

    fn integer(&self, value: i64, radix: u32, upper: bool) -> String {
        let magnitude = value.unsigned_abs();
        let mut digits = match radix {
            16 if upper => format!("{magnitude:X}"),
            16 => format!("{magnitude:x}"),
            8 => format!("{magnitude:o}"),
            2 => format!("{magnitude:b}"),
            _ => magnitude.to_string(),
        };
        if self.grouping && radix == 10 {
            digits = group_thousands(&digits);
        }
        let mut prefix = self.sign_prefix(value < 0);
        if self.alternate {
            prefix.push_str(match (radix, upper) {
                (16, true) => "0X",
                (16, false) => "0x",
                (8, _) => "0o",
                (2, _) => "0b",
                _ => "",
            });
        }
        self.pad(prefix, digits, true)
    }

    fn float(&self, value: f64, kind: Option<Kind>) -> String {
        let prefix = self.sign_prefix(value.is_sign_negative() && !value.is_nan());
        let magnitude = value.abs();
        let precision = self.precision.unwrap_or(6);

        let body = if !magnitude.is_finite() {
            let text = if magnitude.is_nan() { "nan" } else { "inf" };
            match kind {
                Some(
                    Kind::Fixed { upper: true }
                    | Kind::Exponent { upper: true }
                    | Kind::General { upper: true },
                ) => {
                    text.to_ascii_uppercase()
                }
                Some(Kind::Percent) => format!("{text}%"),
                _ => text.to_string(),
            }
        } else {
            match kind {
                Some(Kind::Fixed { .. }) => self.fixed(magnitude, precision),
                Some(Kind::Exponent { upper }) => exponent(magnitude, precision, upper),
                Some(Kind::General { upper }) => self.general(magnitude, upper, false),
                Some(Kind::Percent) => format!("{}%", self.fixed(magnitude * 100.0, precision)),
                _ => match self.precision {
                    Some(_) => self.general(magnitude, false, true),
                    None => crate::schema::coerce::format_float(magnitude),
                },
            }
        };
        self.pad(prefix, body, true)
    }

    fn fixed(&self, magnitude: f64, precision: usize) -> String {
        let text = format!("{magnitude:.precision$}");
        if !self.grouping {
            return text;
        }
        match text.split_once('.') {
            Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
            None => group_thousands(&text),
        }
    }

    /// General format: `precision` significant digits, fixed notation while
    /// the exponent is in `[-4, precision)`, scientific otherwise.
    ///
    /// `keep_point` is the untyped variant: one more exponent goes to
    /// scientific, and fixed results keep at least one fractional digit.
    fn general(&self, magnitude: f64, upper: bool, keep_point: bool) -> String {
        let significant = self.precision.unwrap_or(6).max(1);
        let digits = significant - 1;
        let rounded = format!("{magnitude:.digits$e}");
        let exp: i64 = rounded
            .split_once('e')
            .and_then(|(_, exp)| exp.parse().ok())
            .unwrap_or(0);
        let significant_exp = i64::try_from(significant).unwrap_or(i64::MAX);
        let limit = significant_exp - i64::from(keep_point);

        let text = if (-4..limit).contains(&exp) {
            let decimals = usize::try_from(significant_exp - 1 - exp).unwrap_or(0);
            self.fixed(magnitude, decimals)
        } else {
            exponent(magnitude, digits, upper)
        };

        let (mantissa, suffix) = match text.find(['e', 'E']) {
            Some(at) => text.split_at(at),
            None => (text.as_str(), ""),
        };
        let mut mantissa = if self.alternate || !mantissa.contains('.') {
            mantissa.to_string()
        } else {
            mantissa.trim_end_matches('0').trim_end_matches('.').to_string()
        };
        if self.alternate && !mantissa.contains('.') {
            mantissa.push('.');
        } else if keep_point && suffix.is_empty() && !mantissa.contains('.') {
            mantissa.push_str(".0");
        }
        mantissa + suffix
    }

    fn pad(&self, prefix: String, body: String, numeric: bool) -> String {
        let len = prefix.chars().count() + body.chars().count();
        let width = self.width.unwrap_or(0);
        if len >= width {
            return prefix + &body;
        }

        let fill_len = width - len;
        let fill = |n: usize| std::iter::repeat_n(self.fill, n).collect::<String>();
        let align = self
            .align
            .unwrap_or(if numeric { Align::Right } else { Align::Left });

        match align {
            Align::Left => prefix + &body + &fill(fill_len),
            Align::Right => fill(fill_len) + &prefix + &body,
            Align::Center => {
                let left = fill_len / 2;
                fill(left) + &prefix + &body + &fill(fill_len - left)
            }
            Align::AfterSign => prefix + &fill(fill_len) + &body,
        }
    }
}

fn exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let text = format!("{magnitude:.precision$e}");
    let (mantissa, exp) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
