#![warn(missing_docs)]
//! Toggler Core - Headless Text Toggle Kernel
//!
//! # Overview
//!
//! `toggler-core` rewrites the text under one or more selections into its "other" form and hands
//! back the updated document and selections. It has no UI; a host supplies the document, the
//! selections, the language id and the configuration, and shows the returned messages.
//!
//! # Toggles
//!
//! - **Comment type**: line comment -> block comment -> plain text, around the primary selection
//! - **Quotes**: cycle the quote character of the enclosing string
//! - **Case**: upper <-> lower
//! - **Variable naming format**: camelCase -> PascalCase -> snake_case -> ...
//! - **Base64 / URL encoding**: encode <-> decode
//! - **Newline characters**: real newlines <-> literal `\n`
//! - **Serialization format**: JSON -> JavaScript -> YAML
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface (CommandExecutor)        │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Toggles (comment, quotes, naming, ...)     │  ← Replacement planning
//! ├─────────────────────────────────────────────┤
//! │  Lexing (words, quoted spans, probing)      │  ← Pattern matching
//! ├─────────────────────────────────────────────┤
//! │  Buffer (Rope + selections)                 │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use toggler_core::{CommandExecutor, Position, Selection, ToggleCommand};
//!
//! let mut executor = CommandExecutor::new("let x = \"a\";\n", "javascript");
//! executor.set_selections(vec![Selection::caret(Position::new(0, 9))]);
//!
//! executor.execute(ToggleCommand::Quotes).unwrap();
//! assert_eq!(executor.text(), "let x = 'a';\n");
//!
//! executor.execute(ToggleCommand::CommentType).unwrap();
//! assert_eq!(executor.text(), "// let x = 'a';\n");
//! ```
//!
//! Errors carry a severity; [`ToggleError::notification`] turns one into the message a host
//! should display.
//!
//! # Module Description
//!
//! - [`commands`] - Command interface
//! - [`comment`] - Comment boundary probing and rendering
//! - [`quotes`], [`naming`], [`binary`], [`encoding`], [`newline`], [`serialization`] - Toggles
//! - [`settings`] - Configuration keys and typed reads
//! - [`delimiters`] - Memoized per-language delimiters
//! - [`line_ending`] - LF/CRLF detection; toggles only ever see `\n`
//! - [`postprocess`] - Optional formatter run after comment toggles

pub mod binary;
pub mod buffer;
pub mod commands;
pub mod comment;
mod cycle;
pub mod delimiters;
pub mod encoding;
pub mod error;
pub mod lexer;
pub mod line_ending;
pub mod naming;
pub mod newline;
pub mod position;
pub mod postprocess;
pub mod quotes;
pub mod serialization;
pub mod settings;

pub use binary::{BinaryToggle, CaseToggle};
pub use buffer::{BufferAccess, EditApplier, Replacement, TextBuffer};
pub use commands::{CommandExecutor, ToggleCommand, ToggleOutcome};
pub use comment::{Comment, CommentFinder, CommentType};
pub use cycle::next_element;
pub use delimiters::{ResolvedDelimiters, clear_delimiter_cache, resolve_delimiters};
pub use encoding::{Base64Toggle, UrlToggle};
pub use error::{Notification, Severity, ToggleError, ToggleResult};
pub use line_ending::LineEnding;
pub use naming::NamingFormat;
pub use position::{Position, Selection, SelectionDirection};
pub use postprocess::{PostProcessError, PostProcessor, clear_activated_post_processors};
pub use serialization::SerializationFormat;
pub use settings::{ConfigReader, SettingKey, SettingValue, Settings};

pub use toggler_lang::{CommentTokens, DelimiterConfig, LanguageRegistry};
