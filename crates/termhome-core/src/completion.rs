//! Client-side tab completion against the fixed command allow-list.

/// Commands offered by tab completion, in display order.
pub const ALLOWED_COMMANDS: &[&str] = &[
    "help", "clear", "echo", "date", "ls", "pwd", "whoami", "history", "about", "contact",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Exactly one command starts with the input.
    Unique(&'static str),
    /// Several commands match; listed in allow-list order.
    Ambiguous(Vec<&'static str>),
    None,
}

/// Case-insensitive prefix match of `input` against [`ALLOWED_COMMANDS`].
/// An empty input matches every command.
pub fn complete(input: &str) -> Completion {
    let needle = input.to_lowercase();
    let matches: Vec<&'static str> = ALLOWED_COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(needle.as_str()))
        .collect();

    match matches.len() {
        0 => Completion::None,
        1 => Completion::Unique(matches[0]),
        _ => Completion::Ambiguous(matches),
    }
}
