use crate::builtin::BuiltinKind;
use crate::external::ChildHandle;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal are reported as `128 + signal`, the way POSIX shells do.
pub type ExitCode = i32;

/// What the dispatcher did with one command line.
#[derive(Debug)]
pub enum Outcome {
    /// The line held no tokens; nothing was looked up or launched.
    Empty,
    /// A builtin matched the first token and ran in-process.
    Builtin(BuiltinKind),
    /// An external program ran to completion. Its status is carried here but
    /// the REPL does not surface it to the user.
    External(ChildHandle),
    /// The line was rejected or failed to launch; a diagnostic was already written.
    Rejected,
}

impl Outcome {
    /// Exit code of the external child, if one ran.
    pub fn exit_code(&self) -> Option<ExitCode> {
        match self {
            Outcome::External(child) => Some(child.code()),
            _ => None,
        }
    }
}
