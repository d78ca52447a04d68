/// Errors produced while resolving and invoking a command.
///
/// The `Display` text of every variant is the exact message shown to the user,
/// so [`crate::CommandSet::evaluate`] can render an error with `to_string()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first token does not name any declared command.
    #[error("Unrecognized command: {0}")]
    Unrecognized(String),

    /// The number of argument tokens differs from the command's parameter count.
    #[error("Error: expected {expected} argument{}; got {got}", plural(.expected))]
    Arity { expected: usize, got: usize },

    /// The token at `position` (0-indexed) could not be converted.
    #[error("Error: invalid argument type at position {position}; expected type {expected}")]
    Type {
        position: usize,
        expected: &'static str,
    },

    /// The command ran but reported a failure of its own.
    #[error("Error: {0}")]
    Failed(String),
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 { "" } else { "s" }
}
