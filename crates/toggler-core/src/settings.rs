//! Configuration.
//!
//! Toggles read settings through [`ConfigReader`] so hosts can serve them from their own
//! configuration store. [`Settings`] is a ready-made reader that deserializes from JSON using
//! the same camelCase keys the host-facing configuration uses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ToggleError, ToggleResult};

/// The recognised configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Run the post-process formatter after toggling comment type (bool).
    AutoFormatOnToggleCommentType,
    /// Ordered quote characters to cycle through (list of single chars).
    QuoteChars,
    /// Extra characters treated as part of a word by the case toggle (list of single chars).
    CaseExtraWordChars,
    /// Ordered naming formats to cycle through (list of names).
    VariableNamingFormats,
    /// Use double quotes when generating JavaScript/YAML strings (bool).
    UseDoubleQuotesForOutputStrings,
}

impl SettingKey {
    /// Every key, in declaration order.
    pub const ALL: [SettingKey; 5] = [
        SettingKey::AutoFormatOnToggleCommentType,
        SettingKey::QuoteChars,
        SettingKey::CaseExtraWordChars,
        SettingKey::VariableNamingFormats,
        SettingKey::UseDoubleQuotesForOutputStrings,
    ];

    /// The key as it appears in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoFormatOnToggleCommentType => "autoFormatOnToggleCommentType",
            Self::QuoteChars => "quoteChars",
            Self::CaseExtraWordChars => "caseExtraWordChars",
            Self::VariableNamingFormats => "variableNamingFormats",
            Self::UseDoubleQuotesForOutputStrings => "useDoubleQuotesForOutputStrings",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// Boolean flag.
    Bool(bool),
    /// Ordered list of strings.
    List(Vec<String>),
}

/// Source of configuration values.
pub trait ConfigReader {
    /// Read `key`, or `None` if the host has no value for it.
    fn read_setting(&self, key: SettingKey) -> Option<SettingValue>;
}

/// Read a boolean setting.
pub fn read_bool(reader: &dyn ConfigReader, key: SettingKey) -> ToggleResult<bool> {
    match reader.read_setting(key) {
        Some(SettingValue::Bool(value)) => Ok(value),
        Some(SettingValue::List(_)) => Err(wrong_type(key)),
        None => Err(missing(key)),
    }
}

/// Read a list setting.
pub fn read_list(reader: &dyn ConfigReader, key: SettingKey) -> ToggleResult<Vec<String>> {
    match reader.read_setting(key) {
        Some(SettingValue::List(values)) => Ok(values),
        Some(SettingValue::Bool(_)) => Err(wrong_type(key)),
        None => Err(missing(key)),
    }
}

fn missing(key: SettingKey) -> ToggleError {
    ToggleError::user(format!("No value found for the configuration key {key}."))
}

fn wrong_type(key: SettingKey) -> ToggleError {
    ToggleError::user(format!(
        "The configuration key {key} has a value of the wrong type."
    ))
}

/// Settings with defaults for every key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// See [`SettingKey::AutoFormatOnToggleCommentType`].
    pub auto_format_on_toggle_comment_type: bool,
    /// See [`SettingKey::QuoteChars`].
    pub quote_chars: Vec<String>,
    /// See [`SettingKey::CaseExtraWordChars`].
    pub case_extra_word_chars: Vec<String>,
    /// See [`SettingKey::VariableNamingFormats`].
    pub variable_naming_formats: Vec<String>,
    /// See [`SettingKey::UseDoubleQuotesForOutputStrings`].
    pub use_double_quotes_for_output_strings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_format_on_toggle_comment_type: false,
            quote_chars: vec!["\"".into(), "'".into(), "`".into()],
            case_extra_word_chars: Vec::new(),
            variable_naming_formats: vec![
                "camel".into(),
                "pascal".into(),
                "snake".into(),
                "snakeUpper".into(),
                "kebab".into(),
                "kebabUpper".into(),
            ],
            use_double_quotes_for_output_strings: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON object. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ConfigReader for Settings {
    fn read_setting(&self, key: SettingKey) -> Option<SettingValue> {
        Some(match key {
            SettingKey::AutoFormatOnToggleCommentType => {
                SettingValue::Bool(self.auto_format_on_toggle_comment_type)
            }
            SettingKey::QuoteChars => SettingValue::List(self.quote_chars.clone()),
            SettingKey::CaseExtraWordChars => SettingValue::List(self.case_extra_word_chars.clone()),
            SettingKey::VariableNamingFormats => {
                SettingValue::List(self.variable_naming_formats.clone())
            }
            SettingKey::UseDoubleQuotesForOutputStrings => {
                SettingValue::Bool(self.use_double_quotes_for_output_strings)
            }
        })
    }
}
