//! JSON -> JavaScript object literal -> YAML -> JSON.
//!
//! The highlighted text is handed to each format in turn until one parses it; the formats
//! after the parser are then asked, in rotation, whether they may write the result. Values go
//! through [`serde_json::Value`] with `preserve_order`, so key order survives every step.

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::buffer::{BufferAccess, Replacement};
use crate::error::{ToggleError, ToggleResult};
use crate::position::Selection;

const USAGE: &str = "Must select a valid JSON, Javascript, or YAML object/array! Javascript may not contain expressions.";

/// The serialization formats, in toggle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationFormat {
    /// Strict JSON (comments are tolerated on input).
    Json,
    /// JavaScript object literal (JSON5 on input).
    JavaScript,
    /// YAML block style.
    Yaml,
}

impl SerializationFormat {
    /// Every format in toggle order.
    pub const CHAIN: [SerializationFormat; 3] = [Self::Json, Self::JavaScript, Self::Yaml];
}

/// What the formats need to know about the selection being converted.
#[derive(Debug, Clone)]
pub struct SerializationInput {
    /// Selected text.
    pub text: String,
    /// Whether the selection spans more than one line.
    pub multi_line: bool,
    /// Column the selection starts at.
    pub start_column: usize,
    /// First non-whitespace column of the selection's first line.
    pub first_line_indent: usize,
    /// Indent width for multi-line output.
    pub tab_size: usize,
    /// Emit `"` rather than `'` for JavaScript strings.
    pub double_quotes: bool,
}

impl SerializationInput {
    /// Capture `selection` from `buffer`.
    pub fn from_selection<B: BufferAccess + ?Sized>(
        buffer: &B,
        selection: &Selection,
        tab_size: usize,
        double_quotes: bool,
    ) -> Self {
        Self {
            text: buffer.selection_text(selection),
            multi_line: selection.is_multi_line(),
            start_column: selection.start.column,
            first_line_indent: buffer.first_non_whitespace_column(selection.start.line),
            tab_size,
            double_quotes,
        }
    }

    fn looks_like_object_or_array(&self) -> bool {
        let text = self.text.as_str();
        (text.starts_with('{') && text.ends_with('}'))
            || (text.starts_with('[') && text.ends_with(']'))
    }

    fn indent_unit(&self) -> Option<String> {
        self.multi_line.then(|| " ".repeat(self.tab_size))
    }
}

impl SerializationFormat {
    fn may_parse(&self, input: &SerializationInput) -> bool {
        match self {
            Self::Json | Self::JavaScript => input.looks_like_object_or_array(),
            Self::Yaml => input.multi_line,
        }
    }

    fn parse(&self, input: &SerializationInput) -> Result<Value, String> {
        let value: Value = match self {
            Self::Json => serde_json::from_str(&strip_jsonc_comments(&input.text))
                .map_err(|err| err.to_string())?,
            Self::JavaScript => json5::from_str(&input.text).map_err(|err| err.to_string())?,
            Self::Yaml => {
                let indent = " ".repeat(input.start_column);
                let dedented = input
                    .text
                    .split('\n')
                    .map(|line| line.strip_prefix(indent.as_str()).unwrap_or(line))
                    .collect::<Vec<_>>()
                    .join("\n");
                serde_yaml::from_str(&dedented).map_err(|err| err.to_string())?
            }
        };
        if !(value.is_object() || value.is_array()) {
            return Err("not an object or array".to_string());
        }
        Ok(normalize_numbers(value))
    }

    fn may_stringify(&self, input: &SerializationInput) -> bool {
        match self {
            Self::Json | Self::JavaScript => true,
            Self::Yaml => input.multi_line && input.first_line_indent == input.start_column,
        }
    }

    fn stringify(&self, input: &SerializationInput, value: &Value) -> Result<String, String> {
        let (text, indent) = match self {
            Self::Json => {
                let text = match input.indent_unit() {
                    Some(unit) => to_pretty_json(value, &unit)?,
                    None => serde_json::to_string(value).map_err(|err| err.to_string())?,
                };
                (text, multi_line_indent(input))
            }
            Self::JavaScript => {
                let quote = if input.double_quotes { '"' } else { '\'' };
                let mut out = String::new();
                write_js(value, quote, input.indent_unit().as_deref(), 0, &mut out);
                (out, multi_line_indent(input))
            }
            Self::Yaml => {
                let unit = " ".repeat(input.tab_size);
                let mut lines = Vec::new();
                write_yaml(value, "", &unit, &mut lines)?;
                (lines.join("\n"), input.start_column)
            }
        };
        Ok(add_indent(&text, indent))
    }
}

fn multi_line_indent(input: &SerializationInput) -> usize {
    if input.multi_line {
        input.first_line_indent
    } else {
        0
    }
}

fn add_indent(text: &str, indent: usize) -> String {
    if indent == 0 {
        return text.to_string();
    }
    text.split('\n')
        .collect::<Vec<_>>()
        .join(&format!("\n{}", " ".repeat(indent)))
}

/// Convert `input` to the next format in the chain.
pub fn convert(input: &SerializationInput) -> ToggleResult<String> {
    let chain = SerializationFormat::CHAIN;
    for (index, parser) in chain.iter().enumerate() {
        if !parser.may_parse(input) {
            continue;
        }
        let value = match parser.parse(input) {
            Ok(value) => value,
            Err(err) => {
                debug!(format = ?parser, %err, "parse failed");
                continue;
            }
        };
        for offset in 1..chain.len() {
            let writer = chain[(index + offset) % chain.len()];
            if !writer.may_stringify(input) {
                continue;
            }
            match writer.stringify(input, &value) {
                Ok(text) => {
                    debug!(from = ?parser, to = ?writer, "converted selection");
                    return Ok(text);
                }
                Err(err) => debug!(format = ?writer, %err, "stringify failed"),
            }
        }
    }
    Err(ToggleError::user(USAGE))
}

/// Replace the single highlighted selection with its next serialization format.
pub fn toggle_serialization<B: BufferAccess + ?Sized>(
    buffer: &B,
    selections: &[Selection],
    tab_size: usize,
    double_quotes: bool,
) -> ToggleResult<Replacement> {
    let [selection] = selections else {
        return Err(ToggleError::user(USAGE));
    };
    if !selection.is_highlighted() {
        return Err(ToggleError::user(USAGE));
    }
    let input = SerializationInput::from_selection(buffer, selection, tab_size, double_quotes);
    Ok(Replacement::of_selection(selection, convert(&input)?))
}

/// Remove `//` and `/* */` comments outside of string literals.
pub fn strip_jsonc_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if c == '\\' {
                if let Some(next) = chars.next() {
                    result.push(next);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    chars.next();
                    for nc in chars.by_ref() {
                        if nc == '\n' {
                            result.push('\n');
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = ' ';
                    for nc in chars.by_ref() {
                        if prev == '*' && nc == '/' {
                            break;
                        }
                        if nc == '\n' {
                            result.push('\n');
                        }
                        prev = nc;
                    }
                }
                _ => result.push(c),
            },
            _ => result.push(c),
        }
    }
    result
}

// Integral floats (`8675309.`, `+1.0`) print as integers, the way JavaScript does.
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
                Value::Number(Number::from(f as i64))
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numbers(v)))
                .collect::<Map<_, _>>(),
        ),
        other => other,
    }
}

fn to_pretty_json(value: &Value, unit: &str) -> Result<String, String> {
    use serde::Serialize;

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(unit.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| err.to_string())?;
    String::from_utf8(out).map_err(|err| err.to_string())
}

// Block-style YAML. Sequences nest one `unit` under their key, and the lines of a block item
// share the column after its `- `.
fn write_yaml(value: &Value, indent: &str, unit: &str, lines: &mut Vec<String>) -> Result<(), String> {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, item) in map {
                let key = yaml_scalar(&Value::String(key.clone()))?;
                if is_yaml_block(item) {
                    lines.push(format!("{indent}{key}:"));
                    write_yaml(item, &format!("{indent}{unit}"), unit, lines)?;
                } else {
                    let head = format!("{indent}{key}: ");
                    push_yaml_scalar(head, &yaml_scalar(item)?, &format!("{indent}{unit}"), lines);
                }
            }
        }
        Value::Array(items) if !items.is_empty() => {
            let item_indent = format!("{indent}  ");
            for item in items {
                if is_yaml_block(item) {
                    let first = lines.len();
                    write_yaml(item, &item_indent, unit, lines)?;
                    let rest = lines[first][item_indent.len()..].to_string();
                    lines[first] = format!("{indent}- {rest}");
                } else {
                    push_yaml_scalar(format!("{indent}- "), &yaml_scalar(item)?, &item_indent, lines);
                }
            }
        }
        scalar => push_yaml_scalar(indent.to_string(), &yaml_scalar(scalar)?, indent, lines),
    }
    Ok(())
}

fn is_yaml_block(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn yaml_scalar(value: &Value) -> Result<String, String> {
    match value {
        Value::Object(_) => Ok("{}".to_string()),
        Value::Array(_) => Ok("[]".to_string()),
        scalar => serde_yaml::to_string(scalar)
            .map(|text| text.trim_end_matches('\n').to_string())
            .map_err(|err| err.to_string()),
    }
}

// Continuation lines (block literals, folded plain scalars) go under `continuation`.
fn push_yaml_scalar(head: String, scalar: &str, continuation: &str, lines: &mut Vec<String>) {
    let mut parts = scalar.split('\n');
    let first = parts.next().unwrap_or_default();
    lines.push(format!("{head}{first}").trim_end().to_string());
    for part in parts {
        if part.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{continuation}{part}"));
        }
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_js_string(s: &str, quote: char, out: &mut String) {
    out.push(quote);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            '\0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push_str("\\0"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
}

fn write_js(value: &Value, quote: char, unit: Option<&str>, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_js_string(s, quote, out),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                write_separator(i, unit, depth, out);
                write_js(item, quote, unit, depth + 1, out);
            }
            write_close(unit, depth, out);
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            if unit.is_none() {
                out.push(' ');
            }
            for (i, (key, item)) in map.iter().enumerate() {
                write_separator(i, unit, depth, out);
                if is_identifier(key) {
                    out.push_str(key);
                } else {
                    write_js_string(key, quote, out);
                }
                out.push_str(": ");
                write_js(item, quote, unit, depth + 1, out);
            }
            write_close(unit, depth, out);
            if unit.is_none() {
                out.push(' ');
            }
            out.push('}');
        }
    }
}

fn write_separator(index: usize, unit: Option<&str>, depth: usize, out: &mut String) {
    match unit {
        Some(unit) => {
            if index > 0 {
                out.push(',');
            }
            out.push('\n');
            out.push_str(&unit.repeat(depth + 1));
        }
        None if index > 0 => out.push_str(", "),
        None => {}
    }
}

fn write_close(unit: Option<&str>, depth: usize, out: &mut String) {
    if let Some(unit) = unit {
        out.push('\n');
        out.push_str(&unit.repeat(depth));
    }
}
