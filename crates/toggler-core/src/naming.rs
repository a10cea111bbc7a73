//! Variable naming format toggle (`camel` -> `pascal` -> `snake` -> ...).
//!
//! A word is recognised by the first configured format whose pattern matches, split into
//! tokens according to that format, and re-joined in the target format. Acronym runs do not
//! survive the trip: `someIDVariable` becomes `SomeIdVariable`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::buffer::{BufferAccess, Replacement};
use crate::error::{ToggleError, ToggleResult, messages};
use crate::lexer;
use crate::position::{Position, Selection};

/// Supported naming formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingFormat {
    /// `someVariable`
    Camel,
    /// `SomeVariable`
    Pascal,
    /// `some_variable`
    Snake,
    /// `SOME_VARIABLE`
    SnakeUpper,
    /// `some-variable`
    Kebab,
    /// `SOME-VARIABLE`
    KebabUpper,
}

struct Recognizers {
    camel: Regex,
    pascal: Regex,
    snake: Regex,
    snake_upper: Regex,
    kebab: Regex,
    kebab_upper: Regex,
}

static RECOGNIZERS: LazyLock<Result<Recognizers, regex::Error>> = LazyLock::new(|| {
    Ok(Recognizers {
        camel: Regex::new(r"^[a-z][a-z0-9]*(?:[A-Za-z0-9]+)*$")?,
        pascal: Regex::new(r"^[A-Z][a-z0-9]*(?:[A-Za-z0-9]+)*$")?,
        snake: Regex::new(r"^[a-z][a-z0-9]*(?:_[a-z0-9]+)*$")?,
        snake_upper: Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$")?,
        kebab: Regex::new(r"^[a-z][a-z0-9]*(?:-[a-z0-9]+)*$")?,
        kebab_upper: Regex::new(r"^[A-Z][A-Z0-9]*(?:-[A-Z0-9]+)*$")?,
    })
});

// Split points inside camel/pascal words: the start of an upper/digit run, and the last
// upper/digit before a lowercase/digit tail.
const CAMEL_SPLIT: &str = r"(?<![A-Z0-9])(?=[A-Z0-9])|(?=[A-Z0-9][a-z0-9])";

impl NamingFormat {
    /// Configuration name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Camel => "camel",
            Self::Pascal => "pascal",
            Self::Snake => "snake",
            Self::SnakeUpper => "snakeUpper",
            Self::Kebab => "kebab",
            Self::KebabUpper => "kebabUpper",
        }
    }

    /// Returns `true` if `word` is written in this format.
    pub fn matches(&self, word: &str) -> ToggleResult<bool> {
        let recognizers = RECOGNIZERS
            .as_ref()
            .map_err(|err| ToggleError::unexpected(err.to_string()))?;
        let regex = match self {
            Self::Camel => &recognizers.camel,
            Self::Pascal => &recognizers.pascal,
            Self::Snake => &recognizers.snake,
            Self::SnakeUpper => &recognizers.snake_upper,
            Self::Kebab => &recognizers.kebab,
            Self::KebabUpper => &recognizers.kebab_upper,
        };
        Ok(regex.is_match(word))
    }

    /// Split a word written in this format into its tokens.
    pub fn tokenize(&self, word: &str) -> ToggleResult<Vec<String>> {
        match self {
            Self::Camel | Self::Pascal => split_camel(word),
            Self::Snake | Self::SnakeUpper => Ok(word.split('_').map(str::to_string).collect()),
            Self::Kebab | Self::KebabUpper => Ok(word.split('-').map(str::to_string).collect()),
        }
    }

    /// Join `tokens` in this format.
    pub fn synthesize(&self, tokens: &[String]) -> String {
        match self {
            Self::Camel | Self::Pascal => {
                let pascal: String = tokens.iter().map(|token| capitalize(token)).collect();
                if *self == Self::Pascal {
                    pascal
                } else {
                    let mut chars = pascal.chars();
                    match chars.next() {
                        Some(first) => first.to_lowercase().chain(chars).collect(),
                        None => pascal,
                    }
                }
            }
            Self::Snake => tokens.join("_").to_lowercase(),
            Self::SnakeUpper => tokens.join("_").to_uppercase(),
            Self::Kebab => tokens.join("-").to_lowercase(),
            Self::KebabUpper => tokens.join("-").to_uppercase(),
        }
    }
}

impl fmt::Display for NamingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingFormat {
    type Err = ToggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camel" => Ok(Self::Camel),
            "pascal" => Ok(Self::Pascal),
            "snake" => Ok(Self::Snake),
            "snakeUpper" => Ok(Self::SnakeUpper),
            "kebab" => Ok(Self::Kebab),
            "kebabUpper" => Ok(Self::KebabUpper),
            other => Err(ToggleError::user(format!(
                "Variable naming format '{other}' is not supported!"
            ))),
        }
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

fn split_camel(word: &str) -> ToggleResult<Vec<String>> {
    let splitter = onig::Regex::new(CAMEL_SPLIT)?;
    let mut cuts: Vec<usize> = splitter.find_iter(word).map(|(start, _)| start).collect();
    cuts.dedup();

    let mut tokens = Vec::new();
    let mut last = 0;
    for cut in cuts.into_iter().chain(std::iter::once(word.len())) {
        if cut > last {
            tokens.push(word[last..cut].to_string());
            last = cut;
        }
    }
    Ok(tokens)
}

/// Parse the configured format list, preserving order. A repeated name keeps its first slot.
pub fn parse_formats(configured: &[String]) -> ToggleResult<Vec<NamingFormat>> {
    let mut formats: Vec<NamingFormat> = Vec::with_capacity(configured.len());
    for name in configured {
        let format = name.parse()?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    Ok(formats)
}

/// The first of `formats` that recognises `word`.
pub fn detect_format(word: &str, formats: &[NamingFormat]) -> ToggleResult<NamingFormat> {
    for format in formats {
        if format.matches(word)? {
            return Ok(*format);
        }
    }
    Err(ToggleError::user(
        "Current word does not match any expected variable naming format!",
    ))
}

/// Convert `word` into `target`, detecting its current format among `formats`.
pub fn convert(word: &str, formats: &[NamingFormat], target: NamingFormat) -> ToggleResult<String> {
    let current = detect_format(word, formats)?;
    Ok(target.synthesize(&current.tokenize(word)?))
}

/// Compute the replacements that move the word under every cursor to the next naming format.
pub fn toggle_naming_format<B: BufferAccess + ?Sized>(
    buffer: &B,
    selections: &[Selection],
    configured_formats: &[String],
) -> ToggleResult<Vec<Replacement>> {
    let formats = parse_formats(configured_formats)?;
    let word = lexer::word_pattern(&["-".to_string()])?;

    let mut targets = Vec::with_capacity(selections.len());
    for selection in selections {
        if selection.is_multi_line() {
            return Err(ToggleError::user(messages::MULTI_LINE_SELECTION));
        }
        let active = selection.active();
        let line_text = buffer.line_text(active.line);
        let range = lexer::word_range_at(&line_text, active.column, &word)
            .ok_or_else(|| ToggleError::user(messages::CURSOR_NOT_IN_WORD))?;
        targets.push((
            Position::new(active.line, range.start),
            Position::new(active.line, range.end),
            lexer::slice_columns(&line_text, range),
        ));
    }

    let (_, _, first_word) = targets
        .first()
        .ok_or_else(|| ToggleError::unexpected(messages::NO_SELECTIONS))?;
    let current = detect_format(first_word, &formats)?;
    let target = crate::cycle::next_element(&formats, &current)?;
    debug!(%current, %target, "toggling naming format");

    targets
        .into_iter()
        .map(|(start, end, text)| Ok(Replacement::new(start, end, convert(&text, &formats, target)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [NamingFormat; 6] = [
        NamingFormat::Camel,
        NamingFormat::Pascal,
        NamingFormat::Snake,
        NamingFormat::SnakeUpper,
        NamingFormat::Kebab,
        NamingFormat::KebabUpper,
    ];

    #[test]
    fn test_full_cycle_collapses_acronyms() {
        let mut word = "someIDVariable45".to_string();
        let mut seen = Vec::new();
        for _ in 0..6 {
            let current = detect_format(&word, &ALL).unwrap();
            let target = crate::cycle::next_element(&ALL, &current).unwrap();
            word = convert(&word, &ALL, target).unwrap();
            seen.push(word.clone());
        }
        assert_eq!(
            seen,
            vec![
                "SomeIdVariable45",
                "some_id_variable_45",
                "SOME_ID_VARIABLE_45",
                "some-id-variable-45",
                "SOME-ID-VARIABLE-45",
                "someIdVariable45",
            ]
        );
    }

    #[test]
    fn test_split_camel() {
        assert_eq!(split_camel("someIDVariable45").unwrap(), ["some", "ID", "Variable", "45"]);
        assert_eq!(split_camel("HTTPServer").unwrap(), ["HTTP", "Server"]);
        assert_eq!(split_camel("x").unwrap(), ["x"]);
    }

    #[test]
    fn test_unsupported_format_name() {
        assert_eq!(
            parse_formats(&["camel".into(), "zebra".into()]).unwrap_err(),
            ToggleError::user("Variable naming format 'zebra' is not supported!")
        );
    }

    #[test]
    fn test_repeated_format_names_collapse() {
        let configured: Vec<String> = ["camel", "snake", "camel"].map(String::from).to_vec();
        assert_eq!(
            parse_formats(&configured).unwrap(),
            [NamingFormat::Camel, NamingFormat::Snake]
        );
    }

    #[test]
    fn test_detect_respects_configured_order() {
        let formats = [NamingFormat::Snake, NamingFormat::Camel];
        assert_eq!(detect_format("blah", &formats).unwrap(), NamingFormat::Snake);
        assert_eq!(detect_format("myVar", &formats).unwrap(), NamingFormat::Camel);
    }

    #[test]
    fn test_unrecognised_word() {
        assert!(matches!(
            detect_format("Some_Weird-Casing", &ALL),
            Err(ToggleError::User(_))
        ));
    }
}
