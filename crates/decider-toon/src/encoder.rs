//! TOON Encoder — converts a [`Value`] tree into text.
//!
//! Output is a pure function of the value: map keys are sorted byte-wise at
//! encode time, so two equal trees always produce byte-identical text no
//! matter how their maps were populated.
//!
//! - **Scalars**: `null`, `true`, `false`, minimal integers, shortest
//!   round-trip floats
//! - **Strings**: identifier-like strings are bare words, everything else is
//!   quoted with JSON escapes
//! - **Sequences**: `[a b c]`
//! - **Maps**: `{key:value key:value}`
//!
//! With an [`Indent`], every element of a non-empty container goes on its own
//! line at `prefix + unit × depth`.
//!
//! # Example
//! ```
//! use decider_toon::{encode, Indent, Value};
//! let value = Value::Sequence(vec![Value::from(1), Value::from("two")]);
//! assert_eq!(encode(&value, None).unwrap(), "[1 two]");
//! assert_eq!(
//!     encode(&value, Some(&Indent::default())).unwrap(),
//!     "[\n  1\n  two\n]"
//! );
//! ```

use std::io::Write;

use std::sync::OnceLock;

use regex::Regex;

use crate::decoder::MAX_DEPTH;
use crate::error::{Result, ToonError};
use crate::types::{Map, Value};

/// Indentation settings for multi-line output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent {
    /// Written at the start of every line after the first.
    pub prefix: String,
    /// Repeated once per nesting level after the prefix.
    pub unit: String,
}

impl Indent {
    pub fn new(prefix: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            unit: unit.into(),
        }
    }
}

impl Default for Indent {
    /// No prefix, two spaces per level.
    fn default() -> Self {
        Self::new("", "  ")
    }
}

/// Encode a value into TOON text.
///
/// `indent: None` produces the compact single-line form. The result has no
/// trailing newline.
///
/// # Errors
///
/// Returns [`ToonError::UnsupportedType`] if the tree contains a NaN or
/// infinite float.
pub fn encode(value: &Value, indent: Option<&Indent>) -> Result<String> {
    let mut out = String::new();
    encode_value(value, indent, 0, &mut out)?;
    Ok(out)
}

/// Encode a value and write it to `writer`, followed by a newline.
pub fn to_writer<W: Write>(mut writer: W, value: &Value, indent: Option<&Indent>) -> Result<()> {
    let mut out = encode(value, indent)?;
    out.push('\n');
    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn encode_value(
    value: &Value,
    indent: Option<&Indent>,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)?),
        Value::String(s) => encode_string(s, out),
        Value::Sequence(items) => encode_sequence(items, indent, depth, out)?,
        Value::Map(map) => encode_map(map, indent, depth, out)?,
    }
    Ok(())
}

fn encode_sequence(
    items: &[Value],
    indent: Option<&Indent>,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    check_depth(depth)?;
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        write_separator(i, indent, depth + 1, out);
        encode_value(item, indent, depth + 1, out)?;
    }
    write_closing_line(items.len(), indent, depth, out);
    out.push(']');
    Ok(())
}

fn encode_map(map: &Map, indent: Option<&Indent>, depth: usize, out: &mut String) -> Result<()> {
    check_depth(depth)?;
    // Byte-wise key order; the map itself has no stable iteration order.
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    out.push('{');
    for (i, (key, value)) in entries.iter().enumerate() {
        write_separator(i, indent, depth + 1, out);
        encode_string(key, out);
        out.push(':');
        encode_value(value, indent, depth + 1, out)?;
    }
    write_closing_line(entries.len(), indent, depth, out);
    out.push('}');
    Ok(())
}

/// `depth` containers already enclose the one being opened.
fn check_depth(depth: usize) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(ToonError::UnsupportedType(format!(
            "containers nested deeper than {MAX_DEPTH} levels"
        )));
    }
    Ok(())
}

/// Emit whatever precedes the `i`-th element of a container: a single space
/// in compact mode, a fresh indented line otherwise.
fn write_separator(i: usize, indent: Option<&Indent>, depth: usize, out: &mut String) {
    match indent {
        Some(indent) => write_line_start(indent, depth, out),
        None if i > 0 => out.push(' '),
        None => {}
    }
}

/// In indented mode, put the closing bracket of a non-empty container on its
/// own line at the container's depth.
fn write_closing_line(len: usize, indent: Option<&Indent>, depth: usize, out: &mut String) {
    if let Some(indent) = indent {
        if len > 0 {
            write_line_start(indent, depth, out);
        }
    }
}

fn write_line_start(indent: &Indent, depth: usize, out: &mut String) {
    out.push('\n');
    out.push_str(&indent.prefix);
    for _ in 0..depth {
        out.push_str(&indent.unit);
    }
}

/// Shortest decimal text that parses back to the same `f64`.
///
/// Integral floats keep a `.0` (or an exponent) so the decoder reads them back
/// as floats rather than integers.
fn format_float(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(ToonError::UnsupportedType(format!(
            "non-finite float {f} has no TOON representation"
        )));
    }
    Ok(format!("{f:?}"))
}

/// Emit a string as a bare word when it is identifier-like, quoted otherwise.
fn encode_string(s: &str, out: &mut String) {
    if is_bare_word(s) {
        out.push_str(s);
    } else {
        write_quoted(s, out);
    }
}

/// A bare word starts with a letter or `_`, continues with letters, decimal
/// digits, `_` or `-`, and is not one of the reserved atoms. Letters are the
/// Unicode `L*` categories and digits are `Nd`.
pub(crate) fn is_bare_word(s: &str) -> bool {
    if matches!(s, "" | "null" | "true" | "false") {
        return false;
    }
    bare_word_regex().is_match(s)
}

fn bare_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_-]*$").expect("bare-word pattern is valid")
    })
}

fn write_quoted(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_control() && (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
}
