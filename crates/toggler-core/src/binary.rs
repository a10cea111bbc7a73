//! Two-way toggles decided by a single regex test.
//!
//! The first target's text is tested once; the result picks the direction for every target,
//! so a multi-cursor edit never mixes encode and decode.

use regex::Regex;
use tracing::debug;

use crate::buffer::{BufferAccess, Replacement};
use crate::error::{ToggleError, ToggleResult, messages};
use crate::lexer;
use crate::position::Selection;

/// A transform with two directions chosen by [`BinaryToggle::detector`].
pub trait BinaryToggle {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Pattern deciding the direction.
    fn detector(&self) -> &Regex;

    /// Pattern selecting the word under a cursor.
    fn word(&self) -> &Regex;

    /// Transform `text`; `matched` is the detector result of the first target.
    fn transform(&self, text: &str, matched: bool) -> ToggleResult<String>;
}

/// Apply `toggle` to every highlighted selection, or to the word under every cursor.
pub fn toggle_binary<B, T>(
    buffer: &B,
    selections: &[Selection],
    toggle: &T,
) -> ToggleResult<Vec<Replacement>>
where
    B: BufferAccess + ?Sized,
    T: BinaryToggle + ?Sized,
{
    let targets = selections
        .iter()
        .map(|selection| lexer::selection_or_word(buffer, selection, toggle.word()))
        .collect::<ToggleResult<Vec<_>>>()?;
    let first = targets
        .first()
        .ok_or_else(|| ToggleError::unexpected(messages::NO_SELECTIONS))?;

    let matched = toggle.detector().is_match(&buffer.selection_text(first));
    debug!(toggle = toggle.name(), matched, count = targets.len(), "binary toggle");

    targets
        .iter()
        .map(|target| {
            let text = buffer.selection_text(target);
            Ok(Replacement::of_selection(target, toggle.transform(&text, matched)?))
        })
        .collect()
}

/// Upper/lower case toggle.
///
/// Text with any lowercase ASCII letter is upper-cased, anything else is lower-cased.
pub struct CaseToggle {
    detector: Regex,
    word: Regex,
}

impl CaseToggle {
    /// Build the toggle, treating `extra_word_chars` as part of words.
    pub fn new(extra_word_chars: &[String]) -> ToggleResult<Self> {
        Ok(Self {
            detector: Regex::new("[a-z]")?,
            word: lexer::word_pattern(extra_word_chars)?,
        })
    }
}

impl BinaryToggle for CaseToggle {
    fn name(&self) -> &'static str {
        "case"
    }

    fn detector(&self) -> &Regex {
        &self.detector
    }

    fn word(&self) -> &Regex {
        &self.word
    }

    fn transform(&self, text: &str, has_lowercase: bool) -> ToggleResult<String> {
        Ok(if has_lowercase {
            text.to_uppercase()
        } else {
            text.to_lowercase()
        })
    }
}
