use pretty_assertions::assert_eq;
use toggler_core::{CommandExecutor, Position, Selection, ToggleCommand, ToggleError};

fn select_line(text: &str) -> CommandExecutor {
    let mut ex = CommandExecutor::new(text, "javascript");
    ex.set_selections(vec![Selection::lines(0, 0, text.chars().count())]);
    ex
}

fn at_cursor(text: &str, column: usize) -> CommandExecutor {
    let mut ex = CommandExecutor::new(text, "javascript");
    ex.set_selections(vec![Selection::caret(Position::new(0, column))]);
    ex
}

fn toggle(ex: &mut CommandExecutor, command: ToggleCommand) -> String {
    ex.execute(command).unwrap();
    ex.text()
}

#[test]
fn test_base64_selection() {
    let mut ex = select_line("Base 64 encode this string!");
    assert_eq!(
        toggle(&mut ex, ToggleCommand::Base64Encoding),
        "QmFzZSA2NCBlbmNvZGUgdGhpcyBzdHJpbmch"
    );
    assert_eq!(
        toggle(&mut ex, ToggleCommand::Base64Encoding),
        "Base 64 encode this string!"
    );
}

#[test]
fn test_base64_word() {
    let mut ex = at_cursor("ignore? encode=me? ignore?", "ignore? enco".len());
    assert_eq!(
        toggle(&mut ex, ToggleCommand::Base64Encoding),
        "ignore? ZW5jb2RlPW1lPw== ignore?"
    );
    assert_eq!(
        toggle(&mut ex, ToggleCommand::Base64Encoding),
        "ignore? encode=me? ignore?"
    );
}

#[test]
fn test_base64_multiple_cursors() {
    let mut ex = CommandExecutor::new("four?\nfour?\nfour?", "javascript");
    ex.set_selections((0..3).map(|line| Selection::caret(Position::new(line, 0))).collect());
    assert_eq!(
        toggle(&mut ex, ToggleCommand::Base64Encoding),
        "Zm91cj8=\nZm91cj8=\nZm91cj8="
    );
    assert_eq!(
        toggle(&mut ex, ToggleCommand::Base64Encoding),
        "four?\nfour?\nfour?"
    );
}

#[test]
fn test_url_selection() {
    let mut ex = select_line("I am 99% sure this is not URL encoded/translated");
    assert_eq!(
        toggle(&mut ex, ToggleCommand::UrlEncoding),
        "I%20am%2099%25%20sure%20this%20is%20not%20URL%20encoded%2Ftranslated"
    );
    assert_eq!(
        toggle(&mut ex, ToggleCommand::UrlEncoding),
        "I am 99% sure this is not URL encoded/translated"
    );
}

#[test]
fn test_url_word() {
    let mut ex = at_cursor("ignore? encode=this? ignore?", "ignore? enco".len());
    assert_eq!(
        toggle(&mut ex, ToggleCommand::UrlEncoding),
        "ignore? encode%3Dthis%3F ignore?"
    );
    assert_eq!(
        toggle(&mut ex, ToggleCommand::UrlEncoding),
        "ignore? encode=this? ignore?"
    );
}

#[test]
fn test_url_multiple_cursors() {
    let mut ex = CommandExecutor::new("encode?\nencode?\nencode?", "javascript");
    ex.set_selections((0..3).map(|line| Selection::caret(Position::new(line, 0))).collect());
    assert_eq!(
        toggle(&mut ex, ToggleCommand::UrlEncoding),
        "encode%3F\nencode%3F\nencode%3F"
    );
    assert_eq!(
        toggle(&mut ex, ToggleCommand::UrlEncoding),
        "encode?\nencode?\nencode?"
    );
}

#[test]
fn test_error_when_cursor_is_not_in_a_word() {
    for command in [ToggleCommand::Base64Encoding, ToggleCommand::UrlEncoding] {
        let mut ex = at_cursor("three   spaces", "three  ".len());
        assert_eq!(
            ex.execute(command).unwrap_err(),
            ToggleError::user("Cursor must be located within a word!")
        );
    }
}

#[test]
fn test_newline_round_trip() {
    let text = "Code under testing\nValidation brings comfort\nErrors, now exposed";
    let mut ex = CommandExecutor::new(text, "javascript");
    ex.set_selections(vec![Selection::lines(0, 2, 19)]);

    assert_eq!(
        toggle(&mut ex, ToggleCommand::NewlineChars),
        r"Code under testing\nValidation brings comfort\nErrors, now exposed"
    );
    assert_eq!(toggle(&mut ex, ToggleCommand::NewlineChars), text);
}

#[test]
fn test_newline_round_trip_in_crlf_document() {
    let text = "first\r\nsecond\r\nthird";
    let mut ex = CommandExecutor::new(text, "javascript");
    ex.set_selections(vec![Selection::lines(0, 2, 5)]);

    assert_eq!(toggle(&mut ex, ToggleCommand::NewlineChars), r"first\nsecond\nthird");
    assert_eq!(toggle(&mut ex, ToggleCommand::NewlineChars), text);
}

#[test]
fn test_newline_requires_a_selection() {
    let mut ex = CommandExecutor::new("Code under testing\nValidation brings comfort", "javascript");
    assert_eq!(
        ex.execute(ToggleCommand::NewlineChars).unwrap_err(),
        ToggleError::user("Must select a section of text!")
    );
}
