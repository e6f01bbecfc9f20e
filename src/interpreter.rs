use crate::builtin::BuiltinTable;
use crate::command::Outcome;
use crate::config::ShellConfig;
use crate::external;
use crate::history::History;
use crate::io_adapters::{strip_line_terminator, Input, LineSource};
use crate::session::Session;
use crate::tokenizer::Tokenizer;
use std::io::Write;

/// A minimal interactive shell: history, two builtins and an external launcher.
///
/// The interpreter owns its [`Session`] (history and exit flag) and a read-only
/// [`BuiltinTable`]. Each line is recorded, tokenized, matched against the builtins
/// and otherwise launched as an external program, strictly one at a time.
///
/// Example
/// ```
/// use osh::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// sh.execute_line("history", &mut out, &mut std::io::sink());
/// assert_eq!(String::from_utf8(out).unwrap(), "1- history\n");
/// ```
#[derive(Debug)]
pub struct Interpreter {
    config: ShellConfig,
    session: Session,
    builtins: BuiltinTable,
    tokenizer: Tokenizer,
}

impl Interpreter {
    /// Create an interpreter with a fresh session sized by `config`.
    pub fn new(config: ShellConfig) -> Self {
        Self {
            session: Session::new(config.history_capacity),
            builtins: BuiltinTable::default(),
            tokenizer: Tokenizer::new(config.max_tokens),
            config,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        self.session.history()
    }

    /// True once `exit` has run.
    pub fn should_exit(&self) -> bool {
        self.session.should_exit()
    }

    /// Dispatch one command line.
    ///
    /// The line is recorded before anything else, so rejected and failing commands
    /// still show up in `history`. Builtin output goes to `stdout`; diagnostics go to
    /// `stderr` as a single `osh: ...` line. Nothing here terminates the process.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Outcome {
        let line = strip_line_terminator(line);
        self.session.history_mut().record(line);

        let tokens = match self.tokenizer.tokenize(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                log::debug!("rejected line: {}", err);
                report(stderr, &err);
                return Outcome::Rejected;
            }
        };

        let Some(program) = tokens.program() else {
            return Outcome::Empty;
        };

        if let Some(builtin) = self.builtins.resolve(program) {
            log::debug!("builtin {} with {} token(s)", builtin, tokens.len());
            if let Err(err) = builtin.execute(&tokens, stdout, &mut self.session) {
                report(stderr, &err);
            }
            return Outcome::Builtin(builtin);
        }

        log::debug!("external {} with {} token(s)", program, tokens.len());
        // Anything buffered must reach the terminal before the child writes to it.
        if let Err(err) = stdout.flush() {
            log::warn!("could not flush stdout before launch: {}", err);
        }
        match external::launch(&tokens) {
            Ok(child) => {
                log::debug!("{} exited with code {}", program, child.code());
                Outcome::External(child)
            }
            Err(err) => {
                log::warn!("launch failed: {}", err);
                report(stderr, &err);
                Outcome::Rejected
            }
        }
    }

    /// Read-eval loop.
    ///
    /// Returns when `source` is exhausted or after `exit`; no prompt is shown after
    /// either. Only errors of the input source itself are propagated.
    pub fn repl(
        &mut self,
        source: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<()> {
        log::info!("shell started");
        while !self.session.should_exit() {
            match source.read_line(&self.config.prompt)? {
                Input::Line(line) => {
                    self.execute_line(&line, stdout, stderr);
                }
                Input::Interrupted => continue,
                Input::Eof => break,
            }
        }
        stdout.flush()?;
        log::info!("shell stopped");
        Ok(())
    }
}

impl Default for Interpreter {
    /// An interpreter with [`ShellConfig::default`].
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

fn report(stderr: &mut dyn Write, err: &dyn std::fmt::Display) {
    // Nowhere left to report a failing stderr.
    let _ = writeln!(stderr, "osh: {}", err);
}
