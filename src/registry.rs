//! The ordered set of commands a host declares for one evaluation.

use crate::command::{Function, Method};
use crate::error::CommandError;
use crate::lexer::Invocation;
use tracing::{debug, trace, warn};

/// Name of the built-in command that lists every declared command.
pub const HELP_NAME: &str = "help";

const HELP_TEXT: &str = "Show this help";

type Invoker<S> = Box<dyn Fn(&mut S, &[String]) -> Result<String, CommandError>>;

enum Action<S> {
    Invoke(Invoker<S>),
    Help,
}

struct Command<S> {
    name: String,
    help: String,
    arity: usize,
    action: Action<S>,
}

/// Commands declared by a host of type `S`, in declaration order.
///
/// A fresh registry is filled on every evaluation, so the declared set may
/// change between calls. The name [`HELP_NAME`] is reserved: declarations
/// using it are ignored and the built-in entry is always listed last.
pub struct Registry<S> {
    commands: Vec<Command<S>>,
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<S> Registry<S> {
    /// Declares a free function, static method or receiver-less closure.
    pub fn function<F, Args>(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        function: F,
    ) -> &mut Self
    where
        F: Function<Args>,
    {
        let invoker: Invoker<S> = Box::new(move |_: &mut S, args: &[String]| function.invoke(args));
        self.declare(name.into(), help.into(), F::ARITY, invoker)
    }

    /// Declares a callable that receives the host itself as `&mut S`.
    pub fn method<F, Args>(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        method: F,
    ) -> &mut Self
    where
        F: Method<S, Args>,
    {
        let invoker: Invoker<S> = Box::new(move |receiver: &mut S, args: &[String]| {
            method.invoke(receiver, args)
        });
        self.declare(name.into(), help.into(), F::ARITY, invoker)
    }

    fn declare(&mut self, name: String, help: String, arity: usize, invoker: Invoker<S>) -> &mut Self {
        if name == HELP_NAME {
            warn!("ignoring host command named {HELP_NAME:?}; the name is reserved");
            return self;
        }
        if name.is_empty() || name.contains(char::is_whitespace) {
            warn!(name = %name, "ignoring command whose name can never match a token");
            return self;
        }
        if self.commands.iter().any(|c| c.name == name) {
            debug!(name = %name, "command is shadowed by an earlier declaration");
        }
        trace!(name = %name, arity, "declared command");
        self.commands.push(Command {
            name,
            help,
            arity,
            action: Action::Invoke(invoker),
        });
        self
    }

    /// Appends the built-in help entry after all host declarations.
    pub(crate) fn seal(&mut self) {
        self.commands.push(Command {
            name: HELP_NAME.to_string(),
            help: HELP_TEXT.to_string(),
            arity: 0,
            action: Action::Help,
        });
    }

    /// `(name, help)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands
            .iter()
            .map(|c| (c.name.as_str(), c.help.as_str()))
    }

    /// Formats the listing shown by the `help` command.
    ///
    /// Names are padded to two columns past the longest name, counted in
    /// characters. There is no trailing newline.
    pub fn help(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            + 2;
        self.commands
            .iter()
            .map(|c| format!("{:<width$}{}", c.name, c.help))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Runs the first command whose name matches the invocation.
    pub(crate) fn dispatch(&self, host: &mut S, invocation: &Invocation) -> Result<String, CommandError> {
        let Some(command) = self.commands.iter().find(|c| c.name == invocation.name) else {
            return Err(CommandError::Unrecognized(invocation.name.clone()));
        };
        debug!(
            name = %command.name,
            arity = command.arity,
            got = invocation.args.len(),
            "dispatching command"
        );
        match &command.action {
            Action::Invoke(invoker) => invoker(host, invocation.args.as_slice()),
            Action::Help if invocation.args.is_empty() => Ok(self.help()),
            Action::Help => Err(CommandError::Arity {
                expected: 0,
                got: invocation.args.len(),
            }),
        }
    }
}
