//! Expose native Rust functions as commands of a line-oriented interpreter.
//!
//! A host type implements [`CommandSet`] by declaring its commands into a
//! [`Registry`]: free functions, static methods, closures, or methods that
//! receive the host itself. Evaluating a line splits it on whitespace, finds the
//! command named by the first token, converts the remaining tokens into the
//! command's parameter types, calls it and renders the return value as text.
//! Arity and conversion failures come back as precise, positional messages.
//!
//! [`Interpreter`] wraps a host in an interactive loop. The [`arithmetic`]
//! module holds a small host used by the bundled binary.

pub mod arithmetic;
mod command;
mod error;
mod interpreter;
mod lexer;
mod registry;
mod value;

pub use command::{Function, Method};
pub use error::CommandError;
pub use interpreter::{CommandSet, Interpreter};
pub use lexer::{Invocation, split_into_tokens};
pub use registry::{HELP_NAME, Registry};
pub use value::{Argument, Reply};
