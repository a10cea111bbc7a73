use toggler_core::{CommandExecutor, Position, Selection, ToggleCommand};

fn main() {
    let mut executor =
        CommandExecutor::new("fn main() {}\n\n// First line\n// Second line\n", "rust");
    executor.set_selections(vec![Selection::caret(Position::new(2, 0))]);

    // Line comment -> block comment.
    executor.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(
        executor.text(),
        "fn main() {}\n\n/**\n * First line\n * Second line\n */\n"
    );

    // Block comment -> plain text.
    executor.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(executor.text(), "fn main() {}\n\nFirst line\nSecond line\n");

    // Plain text -> line comment.
    executor.execute(ToggleCommand::CommentType).unwrap();
    assert_eq!(
        executor.text(),
        "fn main() {}\n\n// First line\n// Second line\n"
    );

    println!("{}", executor.text());
}
