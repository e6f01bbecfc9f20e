use anyhow::Context;
use argh::FromArgs;
use osh::config::{DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_TOKENS, DEFAULT_PROMPT};
use osh::io_adapters::{EditorSource, LineSource, ReaderSource};
use osh::{Interpreter, ShellConfig};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

#[derive(FromArgs)]
/// A minimal interactive shell with a bounded command history.
struct Args {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// text shown before each command line.
    prompt: String,

    #[argh(option, default = "DEFAULT_HISTORY_CAPACITY")]
    /// number of command lines kept for `history`.
    history_size: usize,

    #[argh(option, default = "DEFAULT_MAX_TOKENS")]
    /// maximum number of words accepted on one line.
    max_tokens: usize,

    #[argh(switch)]
    /// read plain lines from stdin even when it is a terminal.
    plain: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match ShellConfig::new(args.prompt, args.history_size, args.max_tokens) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("osh: {}", e);
            return ExitCode::from(2);
        }
    };

    match run(config, args.plain) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("osh: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: ShellConfig, plain: bool) -> anyhow::Result<()> {
    let mut source: Box<dyn LineSource> = if !plain && io::stdin().is_terminal() {
        Box::new(
            EditorSource::new(config.history_capacity).context("failed to start line editor")?,
        )
    } else {
        Box::new(ReaderSource::new(io::stdin().lock(), io::stdout()))
    };

    let mut sh = Interpreter::new(config);
    sh.repl(source.as_mut(), &mut io::stdout(), &mut io::stderr())
        .context("failed to read input")
}
