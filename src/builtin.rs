use crate::session::Session;
use crate::tokenizer::TokenList;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::fmt;
use std::io::Write;

/// Message printed by `exit` before the shell stops.
pub const FAREWELL: &str = "Exiting shell...";

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "history" or "exit".
    fn name() -> &'static str;

    /// Executes the command, writing any output to `stdout`.
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<()>;
}

/// Parse `tokens` as arguments of `T` and run it.
///
/// `--help` prints argh's generated usage and skips the command. Arguments argh
/// rejects (e.g. `exit -1`) are dropped and the command runs without them.
fn parse_and_execute<T: BuiltinCommand>(
    tokens: &TokenList,
    stdout: &mut dyn Write,
    session: &mut Session,
) -> Result<()> {
    let args: Vec<&str> = tokens.args().iter().map(String::as_str).collect();
    let cmd = match T::from_args(&[T::name()], &args) {
        Ok(cmd) => cmd,
        Err(EarlyExit {
            output,
            status: Ok(()),
        }) => {
            stdout.write_all(output.as_bytes())?;
            return Ok(());
        }
        Err(EarlyExit {
            output,
            status: Err(()),
        }) => {
            log::debug!("{}: ignoring arguments: {}", T::name(), output.trim_end());
            T::from_args(&[T::name()], &[]).map_err(|EarlyExit { output, .. }| {
                anyhow::anyhow!("{}: {}", T::name(), output.trim_end())
            })?
        }
    };
    cmd.execute(stdout, session)
}

#[derive(FromArgs)]
/// Print the recorded command lines, oldest first.
pub struct ListHistory {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for ListHistory {
    fn name() -> &'static str {
        "history"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<()> {
        for (position, line) in session.history().list() {
            writeln!(stdout, "{}- {}", position, line)?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Exit shell process
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored; the shell always exits with status 0.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<()> {
        writeln!(stdout, "{}", FAREWELL)?;
        session.request_exit();
        Ok(())
    }
}

/// Closed set of builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    History,
    Exit,
}

impl BuiltinKind {
    pub fn name(self) -> &'static str {
        match self {
            BuiltinKind::History => ListHistory::name(),
            BuiltinKind::Exit => Exit::name(),
        }
    }

    /// Run the builtin against the tokens of the current command.
    pub fn execute(
        self,
        tokens: &TokenList,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        match self {
            BuiltinKind::History => parse_and_execute::<ListHistory>(tokens, stdout, session),
            BuiltinKind::Exit => parse_and_execute::<Exit>(tokens, stdout, session),
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered table of builtins, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct BuiltinTable {
    entries: Vec<BuiltinKind>,
}

impl BuiltinTable {
    /// Scan the table in order and return the first builtin named `name`.
    ///
    /// Matching is exact and case-sensitive.
    pub fn resolve(&self, name: &str) -> Option<BuiltinKind> {
        self.entries.iter().copied().find(|kind| kind.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|kind| kind.name())
    }
}

impl Default for BuiltinTable {
    /// The table with every builtin: `history`, then `exit`.
    fn default() -> Self {
        Self {
            entries: vec![BuiltinKind::History, BuiltinKind::Exit],
        }
    }
}
