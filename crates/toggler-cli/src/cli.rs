//! Command-line argument parsing.
//!
//! Positions are 1-indexed on the command line and converted to 0-indexed [`Position`]s.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use toggler_core::{Position, Selection, ToggleCommand};

/// Toggle the text under a cursor or selection.
#[derive(Parser, Debug)]
#[command(name = "toggler", version, about = "Toggle comments, quotes, casing and encodings")]
pub struct CliArgs {
    /// Which toggle to run
    #[arg(value_enum)]
    pub toggle: Toggle,

    /// File to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cursor position as LINE:COLUMN; repeat for multiple cursors
    #[arg(long = "cursor", value_name = "LINE:COLUMN", value_parser = parse_position)]
    pub cursors: Vec<Position>,

    /// Highlighted range as LINE:COLUMN-LINE:COLUMN (anchor, then active end); repeatable
    #[arg(long = "select", value_name = "FROM-TO", value_parser = parse_range)]
    pub ranges: Vec<Selection>,

    /// Language id used for comment delimiters (default: guessed from the file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// VS Code style language-configuration.json to register for the language
    #[arg(long, value_name = "PATH")]
    pub language_config: Option<PathBuf>,

    /// JSON settings file (camelCase keys)
    #[arg(short, long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Indent width for multi-line serialization output
    #[arg(long, default_value_t = toggler_core::commands::DEFAULT_TAB_SIZE)]
    pub tab_size: usize,

    /// Write the result back to FILE instead of printing it
    #[arg(short, long)]
    pub in_place: bool,
}

/// Toggle names as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    /// Line comment -> block comment -> plain text
    CommentType,
    /// Cycle quote characters
    Quotes,
    /// Upper/lower case
    Case,
    /// camelCase -> PascalCase -> snake_case -> ...
    NamingFormat,
    /// Base64 encode/decode
    Base64,
    /// URL encode/decode
    Url,
    /// Newlines <-> literal \n
    Newlines,
    /// JSON -> JavaScript -> YAML
    JsonJsYaml,
}

impl From<Toggle> for ToggleCommand {
    fn from(toggle: Toggle) -> Self {
        match toggle {
            Toggle::CommentType => ToggleCommand::CommentType,
            Toggle::Quotes => ToggleCommand::Quotes,
            Toggle::Case => ToggleCommand::Case,
            Toggle::NamingFormat => ToggleCommand::VariableNamingFormat,
            Toggle::Base64 => ToggleCommand::Base64Encoding,
            Toggle::Url => ToggleCommand::UrlEncoding,
            Toggle::Newlines => ToggleCommand::NewlineChars,
            Toggle::JsonJsYaml => ToggleCommand::JsonJsYaml,
        }
    }
}

impl CliArgs {
    /// Selections in command-line order: highlighted ranges first, then cursors.
    pub fn selections(&self) -> Vec<Selection> {
        self.ranges
            .iter()
            .copied()
            .chain(self.cursors.iter().map(|pos| Selection::caret(*pos)))
            .collect()
    }

    /// The explicit language, or one guessed from the file name.
    pub fn language_id(&self) -> String {
        self.language
            .clone()
            .unwrap_or_else(|| language_for_path(&self.file).to_string())
    }
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (line, column) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COLUMN, got '{s}'"))?;
    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| format!("invalid line number '{line}'"))?;
    let column: usize = column
        .trim()
        .parse()
        .map_err(|_| format!("invalid column number '{column}'"))?;
    if line == 0 || column == 0 {
        return Err("line and column numbers start at 1".to_string());
    }
    Ok(Position::new(line - 1, column - 1))
}

fn parse_range(s: &str) -> Result<Selection, String> {
    let (from, to) = s
        .split_once('-')
        .ok_or_else(|| format!("expected LINE:COLUMN-LINE:COLUMN, got '{s}'"))?;
    Ok(Selection::from_anchor(parse_position(from)?, parse_position(to)?))
}

/// Map a file extension to a language id.
pub fn language_for_path(path: &Path) -> &'static str {
    if path
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case("makefile"))
    {
        return "makefile";
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("rs") => "rust",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("jsx") => "javascriptreact",
        Some("ts" | "mts" | "cts") => "typescript",
        Some("tsx") => "typescriptreact",
        Some("py") => "python",
        Some("rb") => "ruby",
        Some("sh" | "bash" | "zsh") => "shellscript",
        Some("c" | "h") => "c",
        Some("cc" | "cpp" | "cxx" | "hpp") => "cpp",
        Some("cs") => "csharp",
        Some("go") => "go",
        Some("java") => "java",
        Some("kt" | "kts") => "kotlin",
        Some("swift") => "swift",
        Some("php") => "php",
        Some("lua") => "lua",
        Some("sql") => "sql",
        Some("yml" | "yaml") => "yaml",
        Some("toml") => "toml",
        Some("jsonc") => "jsonc",
        Some("scss") => "scss",
        Some("hs") => "haskell",
        Some("ps1") => "powershell",
        _ => "plaintext",
    }
}
