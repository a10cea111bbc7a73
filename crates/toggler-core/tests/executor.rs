use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use toggler_core::{
    BufferAccess, CommandExecutor, ConfigReader, EditApplier, LanguageRegistry, Notification,
    Position, PostProcessError, PostProcessor, Replacement, Selection, SettingKey, SettingValue,
    Settings, Severity, TextBuffer, ToggleCommand, ToggleError,
};

struct Uppercase {
    runs: Arc<AtomicUsize>,
}

impl PostProcessor for Uppercase {
    fn id(&self) -> &str {
        "executor-uppercase"
    }

    fn run(&self, buffer: &mut TextBuffer, selection: Selection) -> Result<(), PostProcessError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let text = buffer.selection_text(&selection).to_uppercase();
        buffer
            .apply_replacements(&[Replacement::of_selection(&selection, text)])
            .map_err(|err| PostProcessError(err.to_string()))
    }
}

struct NotInstalled;

impl PostProcessor for NotInstalled {
    fn id(&self) -> &str {
        "executor-not-installed"
    }

    fn activate(&self) -> Result<(), PostProcessError> {
        Err(PostProcessError("not installed".to_string()))
    }

    fn run(&self, _: &mut TextBuffer, _: Selection) -> Result<(), PostProcessError> {
        Ok(())
    }
}

fn auto_format() -> Settings {
    Settings {
        auto_format_on_toggle_comment_type: true,
        ..Settings::default()
    }
}

#[test]
fn test_post_processor_runs_after_comment_toggle() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut ex = CommandExecutor::new("// note", "rust")
        .with_settings(auto_format())
        .with_post_processor(Uppercase {
            runs: Arc::clone(&runs),
        });

    let outcome = ex.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(ex.text(), "/**\n * NOTE\n */");
    assert!(outcome.warnings.is_empty());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_post_processor_failure_is_a_warning() {
    let mut ex = CommandExecutor::new("// note", "rust")
        .with_settings(auto_format())
        .with_post_processor(NotInstalled);

    let notifications = ex.execute_with_notifications(ToggleCommand::CommentType);
    assert_eq!(ex.text(), "/**\n * note\n */");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Warning);
    assert!(
        notifications[0]
            .message
            .starts_with("Formatter 'executor-not-installed' is required")
    );
    assert!(notifications[0].message.ends_with(": not installed"));
}

#[test]
fn test_post_processor_skipped_for_plaintext() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut ex = CommandExecutor::new("note", "plaintext")
        .with_settings(auto_format())
        .with_post_processor(Uppercase {
            runs: Arc::clone(&runs),
        });

    ex.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(ex.text(), "// note");
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_post_processor_not_run_when_disabled() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut ex = CommandExecutor::new("// note", "rust").with_post_processor(Uppercase {
        runs: Arc::clone(&runs),
    });

    ex.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

struct Missing;

impl ConfigReader for Missing {
    fn read_setting(&self, _: SettingKey) -> Option<SettingValue> {
        None
    }
}

struct AllBools;

impl ConfigReader for AllBools {
    fn read_setting(&self, _: SettingKey) -> Option<SettingValue> {
        Some(SettingValue::Bool(true))
    }
}

#[test]
fn test_missing_and_mistyped_settings() {
    let mut ex = CommandExecutor::new("'a'", "javascript").with_settings(Missing);
    assert_eq!(
        ex.execute(ToggleCommand::Quotes).unwrap_err(),
        ToggleError::user("No value found for the configuration key quoteChars.")
    );

    let mut ex = CommandExecutor::new("'a'", "javascript").with_settings(AllBools);
    assert_eq!(
        ex.execute(ToggleCommand::Quotes).unwrap_err(),
        ToggleError::user("The configuration key quoteChars has a value of the wrong type.")
    );
    assert_eq!(ex.text(), "'a'");
}

#[test]
fn test_settings_from_json() {
    let settings = Settings::from_json(r#"{ "quoteChars": ["'", "\""] }"#).unwrap();
    let mut ex = CommandExecutor::new("x = 'a';", "javascript").with_settings(settings);
    ex.set_selections(vec![Selection::caret(Position::new(0, 5))]);
    ex.execute(ToggleCommand::Quotes).unwrap();
    assert_eq!(ex.text(), "x = \"a\";");
}

#[test]
fn test_custom_language_configuration() {
    let mut registry = LanguageRegistry::empty();
    registry
        .register_configuration_json(
            "executor-fancy-lisp",
            r##"{ "comments": { "lineComment": ";", "blockComment": ["#|", "|#"] } }"##,
        )
        .unwrap();

    let mut ex =
        CommandExecutor::new("(car x)", "executor-fancy-lisp").with_language_source(registry);
    ex.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(ex.text(), "; (car x)");
    ex.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(ex.text(), "#|\n(car x)\n|#");
    ex.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(ex.text(), "(car x)");
}

#[test]
fn test_failed_toggle_leaves_buffer_untouched() {
    let text = "someValue = 1;\n  \nother";
    let mut ex = CommandExecutor::new(text, "javascript");
    let selections = vec![
        Selection::caret(Position::new(0, 2)),
        Selection::caret(Position::new(1, 1)),
    ];
    ex.set_selections(selections.clone());

    assert!(ex.execute(ToggleCommand::VariableNamingFormat).is_err());
    assert_eq!(ex.text(), text);
    assert_eq!(ex.selections(), selections.as_slice());
}

#[test]
fn test_errors_become_notifications() {
    let mut ex = CommandExecutor::new("   ", "javascript");
    assert_eq!(
        ex.execute_with_notifications(ToggleCommand::Case),
        vec![Notification {
            severity: Severity::Error,
            message: "Cursor must be located within a word!".to_string(),
        }]
    );
    assert!(ex.execute_with_notifications(ToggleCommand::CommentType).len() == 1);
}

#[test]
fn test_command_history() {
    let mut ex = CommandExecutor::new("word", "javascript");
    ex.execute(ToggleCommand::Case).unwrap();
    let _ = ex.execute(ToggleCommand::NewlineChars);
    assert_eq!(
        ex.get_command_history(),
        &[ToggleCommand::Case, ToggleCommand::NewlineChars]
    );
    assert_eq!(ex.text(), "WORD");
    assert_eq!(ToggleCommand::Case.to_string(), "toggleCase");
}

#[test]
fn test_edits_shift_later_selections() {
    let mut ex = CommandExecutor::new("ab cd ef", "javascript");
    ex.set_selections(vec![
        Selection::caret(Position::new(0, 0)),
        Selection::caret(Position::new(0, 6)),
    ]);
    ex.execute(ToggleCommand::Base64Encoding).unwrap();
    assert_eq!(ex.text(), "YWI= cd ZWY=");
    assert_eq!(
        ex.selections(),
        &[
            Selection::caret(Position::new(0, 0)),
            Selection::caret(Position::new(0, 8)),
        ]
    );
}
