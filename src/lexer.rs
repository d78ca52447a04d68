//! Splitting an input line into a command name and its positional arguments.
//!
//! Tokens are plain words separated by any run of whitespace. There is no
//! quoting, escaping or comment syntax.

/// A single parsed request: the command name and its argument tokens in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Parses a raw line. Returns `None` when the line holds no tokens at all.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = split_into_tokens(line).into_iter();
        let name = tokens.next()?;
        Some(Self {
            name,
            args: tokens.collect(),
        })
    }
}

/// Splits `line` on whitespace, dropping empty pieces.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}
