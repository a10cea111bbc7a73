use pretty_assertions::assert_eq;
use toggler_core::{CommandExecutor, Position, Selection, Settings, ToggleCommand, ToggleError};

fn at_cursor(text: &str, column: usize) -> CommandExecutor {
    let mut ex = CommandExecutor::new(text, "javascript");
    ex.set_selections(vec![Selection::caret(Position::new(0, column))]);
    ex
}

fn toggle(ex: &mut CommandExecutor) -> String {
    ex.execute(ToggleCommand::VariableNamingFormat).unwrap();
    ex.text()
}

#[test]
fn test_full_cycle() {
    let mut ex = at_cursor("const someIDVariable45 = 14;", "const someIDVari".len());
    assert_eq!(toggle(&mut ex), "const SomeIdVariable45 = 14;");
    assert_eq!(toggle(&mut ex), "const some_id_variable_45 = 14;");
    assert_eq!(toggle(&mut ex), "const SOME_ID_VARIABLE_45 = 14;");
    assert_eq!(toggle(&mut ex), "const some-id-variable-45 = 14;");
    assert_eq!(toggle(&mut ex), "const SOME-ID-VARIABLE-45 = 14;");
    assert_eq!(toggle(&mut ex), "const someIdVariable45 = 14;");
}

#[test]
fn test_ambiguous_word_toggles_between_camel_and_pascal() {
    let mut ex = at_cursor("const blah = 14;", "const bl".len());
    assert_eq!(toggle(&mut ex), "const Blah = 14;");
    assert_eq!(toggle(&mut ex), "const blah = 14;");
    assert_eq!(toggle(&mut ex), "const Blah = 14;");
}

#[test]
fn test_multiple_cursors_follow_first_selection() {
    let mut ex = CommandExecutor::new(
        "EXOTIC_BUTTERS\nexoticButters\nexotic-butters\nExoticButters\nEXOTIC-BUTTERS\nexotic_butters",
        "javascript",
    );
    ex.set_selections((0..6).map(|line| Selection::caret(Position::new(line, 0))).collect());

    assert_eq!(toggle(&mut ex), ["exotic-butters"; 6].join("\n"));
    assert_eq!(toggle(&mut ex), ["EXOTIC-BUTTERS"; 6].join("\n"));
    assert_eq!(toggle(&mut ex), ["exoticButters"; 6].join("\n"));
}

#[test]
fn test_error_when_cursor_is_not_in_a_word() {
    let text = "const msg = \"Two spaces?  Not gonna work.\";";
    let mut ex = at_cursor(text, "const msg = \"Two spaces? ".len());
    assert_eq!(
        ex.execute(ToggleCommand::VariableNamingFormat).unwrap_err(),
        ToggleError::user("Cursor must be located within a word!")
    );
    assert_eq!(ex.text(), text);
}

#[test]
fn test_error_when_word_matches_no_format() {
    let mut ex = at_cursor("const Some_Weird-Casing = \"bad\"", "const Some_W".len());
    assert_eq!(
        ex.execute(ToggleCommand::VariableNamingFormat).unwrap_err(),
        ToggleError::user("Current word does not match any expected variable naming format!")
    );
}

#[test]
fn test_only_configured_formats_are_used() {
    let settings = Settings {
        variable_naming_formats: vec!["snake".into(), "camel".into()],
        ..Settings::default()
    };
    let mut ex = at_cursor("const myVariable = 45", "const myVar".len()).with_settings(settings);
    assert_eq!(toggle(&mut ex), "const my_variable = 45");
    assert_eq!(toggle(&mut ex), "const myVariable = 45");
}

#[test]
fn test_repeated_format_keeps_first_position() {
    let settings = Settings {
        variable_naming_formats: vec![
            "camel".into(),
            "snake".into(),
            "camel".into(),
            "pascal".into(),
        ],
        ..Settings::default()
    };
    let mut ex = at_cursor("const someValue = 1", "const some".len()).with_settings(settings);
    assert_eq!(toggle(&mut ex), "const some_value = 1");
    assert_eq!(toggle(&mut ex), "const SomeValue = 1");
    assert_eq!(toggle(&mut ex), "const someValue = 1");
}

#[test]
fn test_invalid_format_name() {
    let settings = Settings {
        variable_naming_formats: vec!["camel".into(), "zebra".into()],
        ..Settings::default()
    };
    let mut ex = at_cursor("const msg = \"this is a simple string\";", 18).with_settings(settings);
    assert_eq!(
        ex.execute(ToggleCommand::VariableNamingFormat).unwrap_err(),
        ToggleError::user("Variable naming format 'zebra' is not supported!")
    );
}

#[test]
fn test_multi_line_selection_is_rejected() {
    let mut ex = CommandExecutor::new("someValue\notherValue", "javascript");
    ex.set_selections(vec![Selection::lines(0, 1, 4)]);
    assert!(matches!(
        ex.execute(ToggleCommand::VariableNamingFormat),
        Err(ToggleError::User(_))
    ));
}
