//! A small interactive command shell.
//!
//! Each line read from the user is recorded in a bounded history, split into
//! whitespace-separated tokens, and run either as one of the built-in commands
//! (`history`, `exit`) or as an external program that the shell waits for before
//! prompting again. There is no job control, redirection or scripting.
//!
//! The main entry point is [`Interpreter`]; [`io_adapters`] provides the line
//! sources it reads from. The [`tasks`] module is an independent, read-only view
//! of the system's processes.

mod builtin;
pub mod command;
pub mod config;
mod external;
pub mod history;
mod interpreter;
pub mod io_adapters;
mod session;
pub mod tasks;
pub mod tokenizer;

pub use builtin::{BuiltinKind, BuiltinTable};
pub use config::ShellConfig;
pub use external::{ChildHandle, LaunchError};
pub use history::History;
pub use interpreter::Interpreter;
pub use session::Session;
pub use tokenizer::TokenList;
