use crate::history::History;

/// Mutable state shared between the dispatcher and the builtins.
///
/// The session contains:
/// - `history`: the bounded record of entered command lines.
/// - `should_exit`: a flag the REPL loop checks to know when to terminate.
#[derive(Debug, Clone)]
pub struct Session {
    history: History,
    should_exit: bool,
}

impl Session {
    /// Start a session whose history keeps at most `history_capacity` lines.
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: History::new(history_capacity),
            should_exit: false,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Ask the REPL to stop before issuing another prompt.
    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }
}
