use crate::error::CommandError;
use crate::lexer::Invocation;
use crate::registry::Registry;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// A host that exposes native callables as string-invoked commands.
///
/// Implementors only declare their commands; evaluation is provided.
///
/// Example
/// ```
/// use command_interface::{CommandSet, Registry};
///
/// #[derive(Default)]
/// struct Tally {
///     total: i64,
/// }
///
/// impl Tally {
///     fn add(&mut self, n: i64) -> i64 {
///         self.total += n;
///         self.total
///     }
///
///     fn double(n: i64) -> i64 {
///         n * 2
///     }
/// }
///
/// impl CommandSet for Tally {
///     fn register_commands(&self, registry: &mut Registry<Self>) {
///         registry
///             .method("add", "Add to the running total", Tally::add)
///             .function("double", "Double a number", Tally::double);
///     }
/// }
///
/// let mut tally = Tally::default();
/// assert_eq!(tally.evaluate("add 5"), "5");
/// assert_eq!(tally.evaluate("add 2"), "7");
/// assert_eq!(tally.evaluate("double x"), "Error: invalid argument type at position 0; expected type l");
/// ```
pub trait CommandSet: Sized + 'static {
    /// Declares every available command, in the order they should be tried
    /// and listed. Called once per evaluation.
    fn register_commands(&self, registry: &mut Registry<Self>);

    /// Evaluates one line and returns either the command's output or the
    /// structured error for it. Blank lines evaluate to an empty string.
    fn try_evaluate(&mut self, line: &str) -> Result<String, CommandError> {
        let Some(invocation) = Invocation::parse(line) else {
            return Ok(String::new());
        };

        let mut registry = Registry::default();
        self.register_commands(&mut registry);
        registry.seal();

        registry.dispatch(self, &invocation)
    }

    /// Evaluates one line, rendering any error as its message.
    fn evaluate(&mut self, line: &str) -> String {
        self.try_evaluate(line).unwrap_or_else(|e| e.to_string())
    }
}

/// An interactive read-eval-print loop around a [`CommandSet`].
pub struct Interpreter<S> {
    host: S,
    prompt: String,
    history: Option<PathBuf>,
}

impl<S: CommandSet> Interpreter<S> {
    /// Wraps `host` with the default `>>> ` prompt and no history file.
    pub fn new(host: S) -> Self {
        Self {
            host,
            prompt: ">>> ".to_string(),
            history: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Loads line history from `path` when the loop starts and saves it on exit.
    pub fn with_history(mut self, path: impl Into<PathBuf>) -> Self {
        self.history = Some(path.into());
        self
    }

    pub fn host(&self) -> &S {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut S {
        &mut self.host
    }

    pub fn into_inner(self) -> S {
        self.host
    }

    /// Evaluate a single line against the host.
    pub fn eval(&mut self, line: &str) -> String {
        self.host.evaluate(line)
    }

    /// Reads lines from the terminal until Ctrl-C or Ctrl-D, printing each
    /// result followed by a blank line.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new()?;
        if let Some(path) = &self.history {
            if let Err(err) = rl.load_history(path) {
                debug!(path = %path.display(), "no history loaded: {err}");
            }
        }

        loop {
            match rl.readline(&self.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    println!("{}\n", self.eval(&line));
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        if let Some(path) = &self.history {
            if let Err(err) = rl.save_history(path) {
                warn!(path = %path.display(), "failed to save history: {err}");
            }
        }
        Ok(())
    }

    /// Evaluates every line of `input`, writing each result on its own line.
    /// Blank input lines produce no output. Used when input is piped rather
    /// than typed.
    pub fn run_lines<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;
            if Invocation::parse(&line).is_none() {
                continue;
            }
            writeln!(output, "{}", self.eval(&line))?;
        }
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn add(x: i32, y: i32) -> i32 {
        x + y
    }

    struct Arithmetic;

    impl Arithmetic {
        fn inc(x: i32) -> i32 {
            x + 1
        }
    }

    impl CommandSet for Arithmetic {
        fn register_commands(&self, registry: &mut Registry<Self>) {
            registry
                .function("add", "Add two numbers", add)
                .function("inc", "Increment a number", Arithmetic::inc);
        }
    }

    #[test]
    fn test_reference_scenarios() {
        let mut host = Arithmetic;
        let cases = [
            ("inc 17", "18"),
            ("add 4 5", "9"),
            ("inc", "Error: expected 1 argument; got 0"),
            ("inc 1 7", "Error: expected 1 argument; got 2"),
            ("inc 1.7", "Error: invalid argument type at position 0; expected type i"),
            ("add 4", "Error: expected 2 arguments; got 1"),
            ("add 4 5 6", "Error: expected 2 arguments; got 3"),
            ("add 4.4 5", "Error: invalid argument type at position 0; expected type i"),
            ("add 4 5.5", "Error: invalid argument type at position 1; expected type i"),
            (
                "help",
                "add   Add two numbers\ninc   Increment a number\nhelp  Show this help",
            ),
        ];
        for (line, expected) in cases {
            assert_eq!(host.evaluate(line), expected, "line: {line:?}");
        }
    }

    #[test]
    fn test_blank_and_unknown_lines() {
        let mut host = Arithmetic;
        assert_eq!(host.evaluate(""), "");
        assert_eq!(host.evaluate("  \t \n"), "");
        assert_eq!(host.evaluate("sub 1 2"), "Unrecognized command: sub");
        assert_eq!(
            host.try_evaluate("sub"),
            Err(CommandError::Unrecognized("sub".to_string()))
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let mut host = Arithmetic;
        assert_eq!(host.evaluate("  add   4   5  "), host.evaluate("add 4 5"));
        assert_eq!(host.evaluate("inc 17\n"), "18");
    }

    #[test]
    fn test_arity_error_wins_over_bad_tokens() {
        let mut host = Arithmetic;
        assert_eq!(host.evaluate("add x"), "Error: expected 2 arguments; got 1");
        assert_eq!(host.evaluate("inc x y"), "Error: expected 1 argument; got 2");
        assert_eq!(host.evaluate("help x"), "Error: expected 0 arguments; got 1");
    }

    #[test]
    fn test_help_is_idempotent() {
        let mut host = Arithmetic;
        let first = host.evaluate("help");
        assert_eq!(host.evaluate("help"), first);
    }

    #[test]
    fn test_large_integers_round_trip() {
        let mut host = Arithmetic;
        assert_eq!(host.evaluate("add -2147483648 0"), "-2147483648");
        assert_eq!(host.evaluate("add 0012 +3"), "15");
        assert_eq!(
            host.evaluate("inc 2147483648"),
            "Error: invalid argument type at position 0; expected type i"
        );
    }

    /// A host whose command set depends on its own state.
    #[derive(Default)]
    struct Session {
        unlocked: bool,
        notes: Vec<String>,
    }

    impl Session {
        fn unlock(&mut self) -> &'static str {
            self.unlocked = true;
            "unlocked"
        }

        fn note(&mut self, text: String) -> usize {
            self.notes.push(text);
            self.notes.len()
        }

        fn divide(x: f64, y: f64) -> Result<f64, String> {
            if y == 0.0 {
                Err("division by zero".to_string())
            } else {
                Ok(x / y)
            }
        }
    }

    impl CommandSet for Session {
        fn register_commands(&self, registry: &mut Registry<Self>) {
            registry
                .method("unlock", "Enable note taking", Session::unlock)
                .function("div", "Divide two numbers", Session::divide)
                .function("help", "Shadowed", || "never");
            if self.unlocked {
                registry
                    .method("note", "Store a note", Session::note)
                    .method("count", "Count notes", |s: &mut Session| s.notes.len());
            }
        }
    }

    #[test]
    fn test_command_set_follows_host_state() {
        let mut session = Session::default();
        assert_eq!(session.evaluate("note hi"), "Unrecognized command: note");
        assert_eq!(
            session.evaluate("help"),
            "unlock  Enable note taking\ndiv     Divide two numbers\nhelp    Show this help"
        );

        assert_eq!(session.evaluate("unlock"), "unlocked");
        assert_eq!(session.evaluate("note hi"), "1");
        assert_eq!(session.evaluate("note there"), "2");
        assert_eq!(session.evaluate("count"), "2");
        assert_eq!(session.notes, vec!["hi".to_string(), "there".to_string()]);
    }

    #[test]
    fn test_failing_command_reports_its_error() {
        let mut session = Session::default();
        assert_eq!(session.evaluate("div 1 4"), "0.25");
        assert_eq!(session.evaluate("div 1 0"), "Error: division by zero");
        assert_eq!(
            session.try_evaluate("div 1 0"),
            Err(CommandError::Failed("division by zero".to_string()))
        );
    }

    #[test]
    fn test_interpreter_forwards_to_host() {
        let mut interp = Interpreter::new(Session::default()).with_prompt("$ ");
        assert_eq!(interp.eval("unlock"), "unlocked");
        assert!(interp.host().unlocked);
        interp.host_mut().notes.push("seed".to_string());
        assert_eq!(interp.eval("count"), "1");
        assert_eq!(interp.into_inner().notes, vec!["seed".to_string()]);
    }

    #[test]
    fn test_run_lines_writes_one_result_per_line() {
        let mut interp = Interpreter::new(Arithmetic);
        let input = Cursor::new("inc 1\n\nadd 2 3\nnope\n");
        let mut out = Vec::new();
        interp.run_lines(input, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2\n5\nUnrecognized command: nope\n"
        );
    }

    #[test]
    fn test_run_lines_keeps_empty_results_of_commands() {
        let mut interp = Interpreter::new(Session::default());
        let input = Cursor::new("unlock\n   \ncount\n");
        let mut out = Vec::new();
        interp.run_lines(input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "unlocked\n0\n");

        let mut interp = Interpreter::new(Quiet);
        let input = Cursor::new("noop\nnoop\n");
        let mut out = Vec::new();
        interp.run_lines(input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n\n");
    }

    struct Quiet;

    impl CommandSet for Quiet {
        fn register_commands(&self, registry: &mut Registry<Self>) {
            registry.function("noop", "Do nothing", || ());
        }
    }
}
