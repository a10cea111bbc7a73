//! Command interface.
//!
//! [`CommandExecutor`] owns a [`TextBuffer`] and its selections, resolves configuration and
//! language delimiters, and runs one [`ToggleCommand`] at a time. Every toggle computes all of
//! its replacements before touching the buffer, and the batch is applied atomically.

use std::fmt;

use toggler_lang::{LanguageCommentSource, LanguageRegistry};
use tracing::{debug, info_span};

use crate::binary::{CaseToggle, toggle_binary};
use crate::buffer::{EditApplier, Replacement, TextBuffer};
use crate::comment::CommentFinder;
use crate::cycle::next_element;
use crate::delimiters::resolve_delimiters;
use crate::encoding::{Base64Toggle, UrlToggle};
use crate::error::{Notification, ToggleError, ToggleResult, messages};
use crate::naming::toggle_naming_format;
use crate::newline::toggle_newlines;
use crate::postprocess::{PostProcessor, run_post_processor};
use crate::quotes::toggle_quotes;
use crate::serialization::toggle_serialization;
use crate::position::Selection;
use crate::settings::{ConfigReader, SettingKey, Settings, read_bool, read_list};

/// Language id for which auto-formatting is never attempted.
pub const PLAINTEXT_LANGUAGE: &str = "plaintext";

/// Default indent width for multi-line serialization output.
pub const DEFAULT_TAB_SIZE: usize = 4;

/// The toggle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleCommand {
    /// Line comment -> block comment -> plain text around the primary selection.
    CommentType,
    /// Cycle the quote character of the string under each cursor.
    Quotes,
    /// Upper/lower case of each selection or cursor word.
    Case,
    /// Cycle the naming format of the word under each cursor.
    VariableNamingFormat,
    /// Base64 encode/decode.
    Base64Encoding,
    /// URL encode/decode.
    UrlEncoding,
    /// Real newlines <-> literal `\n`.
    NewlineChars,
    /// JSON -> JavaScript -> YAML.
    JsonJsYaml,
}

impl ToggleCommand {
    /// Every command.
    pub const ALL: [ToggleCommand; 8] = [
        Self::CommentType,
        Self::Quotes,
        Self::Case,
        Self::VariableNamingFormat,
        Self::Base64Encoding,
        Self::UrlEncoding,
        Self::NewlineChars,
        Self::JsonJsYaml,
    ];

    /// Command id as a host would register it.
    pub fn id(&self) -> &'static str {
        match self {
            Self::CommentType => "toggleCommentType",
            Self::Quotes => "toggleQuotes",
            Self::Case => "toggleCase",
            Self::VariableNamingFormat => "toggleVariableNamingFormat",
            Self::Base64Encoding => "toggleBase64Encoding",
            Self::UrlEncoding => "toggleUrlEncoding",
            Self::NewlineChars => "toggleNewlineChars",
            Self::JsonJsYaml => "toggleJsonToJsToYaml",
        }
    }
}

impl fmt::Display for ToggleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Result of a successful toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Selections after the edit.
    pub selections: Vec<Selection>,
    /// Non-fatal problems (delimiter fallback, missing formatter), always
    /// [`ToggleError::Warning`].
    pub warnings: Vec<ToggleError>,
}

/// How selections are updated after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionUpdate {
    /// Carry every selection through the edit.
    Map,
    /// Carry every selection through the edit, then collapse it to its active end.
    Collapse,
}

/// Command executor.
///
/// # Example
///
/// ```rust
/// use toggler_core::{CommandExecutor, Position, Selection, ToggleCommand};
///
/// let mut executor = CommandExecutor::new("let someValue = 1;", "javascript");
/// executor.set_selections(vec![Selection::caret(Position::new(0, 6))]);
/// executor.execute(ToggleCommand::VariableNamingFormat).unwrap();
/// assert_eq!(executor.text(), "let SomeValue = 1;");
/// ```
pub struct CommandExecutor {
    buffer: TextBuffer,
    language_id: String,
    tab_size: usize,
    settings: Box<dyn ConfigReader>,
    languages: Box<dyn LanguageCommentSource>,
    post_processor: Option<Box<dyn PostProcessor>>,
    command_history: Vec<ToggleCommand>,
}

impl CommandExecutor {
    /// Create an executor over `text` in `language_id`, with default settings and the built-in
    /// language table.
    pub fn new(text: &str, language_id: impl Into<String>) -> Self {
        Self {
            buffer: TextBuffer::new(text),
            language_id: language_id.into(),
            tab_size: DEFAULT_TAB_SIZE,
            settings: Box::new(Settings::default()),
            languages: Box::new(LanguageRegistry::builtin()),
            post_processor: None,
            command_history: Vec::new(),
        }
    }

    /// Use `settings` as the configuration source.
    pub fn with_settings(mut self, settings: impl ConfigReader + 'static) -> Self {
        self.settings = Box::new(settings);
        self
    }

    /// Use `source` to look up comment tokens.
    pub fn with_language_source(mut self, source: impl LanguageCommentSource + 'static) -> Self {
        self.languages = Box::new(source);
        self
    }

    /// Register the formatter run after comment toggles.
    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post_processor = Some(Box::new(processor));
        self
    }

    /// Set the indent width used for multi-line serialization output.
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// The buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Current selections.
    pub fn selections(&self) -> &[Selection] {
        self.buffer.selections()
    }

    /// Replace the current selections.
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        self.buffer.set_selections(selections);
    }

    /// Language id used for comment delimiters.
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Commands executed so far, successful or not.
    pub fn get_command_history(&self) -> &[ToggleCommand] {
        &self.command_history
    }

    /// Execute command
    pub fn execute(&mut self, command: ToggleCommand) -> ToggleResult<ToggleOutcome> {
        let _span = info_span!("toggle", command = command.id()).entered();
        self.command_history.push(command);

        match command {
            ToggleCommand::CommentType => self.execute_comment_type(),
            ToggleCommand::Quotes => {
                let quote_chars = read_list(self.settings.as_ref(), SettingKey::QuoteChars)?;
                let replacements =
                    toggle_quotes(&self.buffer, self.buffer.selections(), &quote_chars)?;
                let update = if self.buffer.primary_selection().is_caret() {
                    SelectionUpdate::Collapse
                } else {
                    SelectionUpdate::Map
                };
                self.apply(replacements, update)
            }
            ToggleCommand::Case => {
                let extra = read_list(self.settings.as_ref(), SettingKey::CaseExtraWordChars)?;
                let toggle = CaseToggle::new(&extra)?;
                let replacements = toggle_binary(&self.buffer, self.buffer.selections(), &toggle)?;
                self.apply(replacements, SelectionUpdate::Map)
            }
            ToggleCommand::VariableNamingFormat => {
                let formats = read_list(self.settings.as_ref(), SettingKey::VariableNamingFormats)?;
                let replacements =
                    toggle_naming_format(&self.buffer, self.buffer.selections(), &formats)?;
                self.apply(replacements, SelectionUpdate::Map)
            }
            ToggleCommand::Base64Encoding => {
                let replacements =
                    toggle_binary(&self.buffer, self.buffer.selections(), &Base64Toggle::new()?)?;
                self.apply(replacements, SelectionUpdate::Map)
            }
            ToggleCommand::UrlEncoding => {
                let replacements =
                    toggle_binary(&self.buffer, self.buffer.selections(), &UrlToggle::new()?)?;
                self.apply(replacements, SelectionUpdate::Map)
            }
            ToggleCommand::NewlineChars => {
                let replacement = toggle_newlines(&self.buffer, self.buffer.selections())?;
                self.apply(vec![replacement], SelectionUpdate::Map)
            }
            ToggleCommand::JsonJsYaml => {
                let double_quotes =
                    read_bool(self.settings.as_ref(), SettingKey::UseDoubleQuotesForOutputStrings)?;
                let replacement = toggle_serialization(
                    &self.buffer,
                    self.buffer.selections(),
                    self.tab_size,
                    double_quotes,
                )?;
                self.apply(vec![replacement], SelectionUpdate::Map)
            }
        }
    }

    /// Execute `command` and turn the result into the messages a host should display.
    pub fn execute_with_notifications(&mut self, command: ToggleCommand) -> Vec<Notification> {
        match self.execute(command) {
            Ok(outcome) => outcome
                .warnings
                .iter()
                .map(ToggleError::notification)
                .collect(),
            Err(err) => vec![err.notification()],
        }
    }

    fn execute_comment_type(&mut self) -> ToggleResult<ToggleOutcome> {
        let auto_format = read_bool(
            self.settings.as_ref(),
            SettingKey::AutoFormatOnToggleCommentType,
        )?;
        let resolved = resolve_delimiters(self.languages.as_ref(), &self.language_id);
        let mut warnings: Vec<ToggleError> = resolved.warning.into_iter().collect();

        let selection = self.buffer.primary_selection();
        let comment = CommentFinder::new(&self.buffer, resolved.config).find(selection)?;
        let next = next_element(&comment.available_comment_types(), &comment.comment_type())?;
        debug!(current = ?comment.comment_type(), ?next, "toggling comment type");

        let replacement = Replacement::of_selection(
            &comment.selection(),
            comment.to_comment_string(next),
        );
        let start = self.buffer.position_to_char(replacement.start);
        let len = replacement.text.chars().count();
        self.buffer.apply_replacements(&[replacement])?;

        let new_selection = Selection::new(
            self.buffer.char_to_position(start),
            self.buffer.char_to_position(start + len),
        );
        self.buffer.set_selections(vec![new_selection]);

        if auto_format && self.language_id != PLAINTEXT_LANGUAGE {
            let processor = self.post_processor.as_deref();
            if let Err(warning) = run_post_processor(processor, &mut self.buffer, new_selection) {
                warnings.push(warning);
            }
        }

        Ok(ToggleOutcome {
            selections: self.buffer.selections().to_vec(),
            warnings,
        })
    }

    fn apply(
        &mut self,
        replacements: Vec<Replacement>,
        update: SelectionUpdate,
    ) -> ToggleResult<ToggleOutcome> {
        // Two cursors in the same word produce the same replacement twice.
        let mut unique: Vec<Replacement> = Vec::with_capacity(replacements.len());
        for replacement in replacements {
            if !unique.contains(&replacement) {
                unique.push(replacement);
            }
        }
        let replacements = unique;
        if replacements.is_empty() {
            return Err(ToggleError::unexpected(messages::NO_SELECTIONS));
        }

        let mut edits: Vec<OffsetEdit> = replacements
            .iter()
            .map(|r| OffsetEdit {
                start: self.buffer.position_to_char(r.start),
                end: self.buffer.position_to_char(r.end),
                new_len: r.text.chars().count(),
            })
            .collect();
        edits.sort_by_key(|edit| (edit.start, edit.end));

        let anchors: Vec<(usize, usize)> = self
            .buffer
            .selections()
            .iter()
            .map(|s| {
                (
                    self.buffer.position_to_char(s.anchor()),
                    self.buffer.position_to_char(s.active()),
                )
            })
            .collect();

        self.buffer.apply_replacements(&replacements)?;

        let selections = anchors
            .into_iter()
            .map(|(anchor, active)| {
                let (anchor, active) = map_selection(&edits, anchor, active);
                let selection = Selection::from_anchor(
                    self.buffer.char_to_position(anchor),
                    self.buffer.char_to_position(active),
                );
                match update {
                    SelectionUpdate::Map => selection,
                    SelectionUpdate::Collapse => Selection::caret(selection.active()),
                }
            })
            .collect();
        self.buffer.set_selections(selections);

        Ok(ToggleOutcome {
            selections: self.buffer.selections().to_vec(),
            warnings: Vec::new(),
        })
    }
}

/// A replacement in character offsets of the pre-edit document.
#[derive(Debug, Clone, Copy)]
struct OffsetEdit {
    start: usize,
    end: usize,
    new_len: usize,
}

fn map_selection(edits: &[OffsetEdit], anchor: usize, active: usize) -> (usize, usize) {
    let (start, end) = (anchor.min(active), anchor.max(active));
    // A selection that is exactly one replaced range grows or shrinks with the new text.
    if start != end
        && let Some(index) = edits.iter().position(|e| e.start == start && e.end == end)
    {
        let new_start = shift(&edits[..index], start);
        let new_end = new_start + edits[index].new_len;
        return if anchor <= active {
            (new_start, new_end)
        } else {
            (new_end, new_start)
        };
    }
    (map_offset(edits, anchor), map_offset(edits, active))
}

fn shift(edits: &[OffsetEdit], offset: usize) -> usize {
    edits.iter().fold(offset, |acc, e| acc + e.new_len - (e.end - e.start))
}

fn map_offset(edits: &[OffsetEdit], offset: usize) -> usize {
    let mut delta: isize = 0;
    for edit in edits {
        if offset < edit.start {
            break;
        }
        let new_start = (edit.start as isize + delta) as usize;
        if offset == edit.end {
            return new_start + edit.new_len;
        }
        if offset < edit.end {
            return new_start + (offset - edit.start).min(edit.new_len);
        }
        delta += edit.new_len as isize - (edit.end - edit.start) as isize;
    }
    (offset as isize + delta) as usize
}
