use anyhow::Result;
use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};

/// One result of reading from a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A complete line. A trailing line terminator may still be attached.
    Line(String),
    /// The user interrupted the read (Ctrl-C); the partial line is discarded.
    Interrupted,
    /// No more input will arrive.
    Eof,
}

/// Anything the REPL can pull command lines from.
///
/// Implementations print `prompt` themselves, because only they know whether and
/// where a prompt should appear.
pub trait LineSource {
    /// Show `prompt` and block until a line is available or input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

/// Interactive line editing on a terminal, backed by rustyline.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    /// Create an editor whose arrow-key recall keeps at most `recall_size` lines.
    pub fn new(recall_size: usize) -> Result<Self> {
        let config = Config::builder()
            .max_history_size(recall_size)?
            .auto_add_history(false)
            .build();
        Ok(Self {
            editor: DefaultEditor::with_config(config)?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Plain line-oriented input: prompts go to `W`, lines come from `R`.
///
/// Used when standard input is not a terminal, and in tests with in-memory buffers.
pub struct ReaderSource<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }

    /// Give back the reader and the prompt writer.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.prompt_out)
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        self.prompt_out.write_all(prompt.as_bytes())?;
        self.prompt_out.flush()?;

        // Raw bytes: invalid UTF-8 must not end the session.
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(Input::Eof);
        }
        Ok(Input::Line(String::from_utf8_lossy(&raw).into_owned()))
    }
}

/// Drop one trailing `"\n"` or `"\r\n"`.
pub fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
