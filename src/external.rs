use crate::command::ExitCode;
use crate::tokenizer::TokenList;
use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Failures of the external launcher. None of them are fatal to the shell.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The launcher was handed a list without a program name.
    #[error("no command to launch")]
    EmptyCommand,
    /// The program could not be found or invoked by the new process.
    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The operating system refused to create a new process.
    #[error("{program}: could not create process: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// Waiting for the child failed; it may still be running.
    #[error("{program}: could not wait for process: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// A child process that has been launched and reaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildHandle {
    pid: u32,
    status: ExitStatus,
}

impl ChildHandle {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn status(&self) -> ExitStatus {
        self.status
    }

    /// The exit status as a shell-style code.
    pub fn code(&self) -> ExitCode {
        match self.status.code() {
            Some(x) => x,
            None => terminated_by_signal(self.status),
        }
    }
}

/// Run `tokens[0]` as a program with the whole list as its argument vector.
///
/// The child inherits stdin, stdout, stderr, the environment and the working
/// directory. The call blocks until that specific child has terminated, so no
/// child outlives the command that started it.
pub fn launch(tokens: &TokenList) -> Result<ChildHandle, LaunchError> {
    let program = tokens.program().ok_or(LaunchError::EmptyCommand)?;

    let mut child = Command::new(program)
        .args(tokens.args())
        .spawn()
        .map_err(|source| classify_spawn_error(program, source))?;

    let pid = child.id();
    log::debug!("spawned {} as pid {}", program, pid);

    let status = child.wait().map_err(|source| LaunchError::Wait {
        program: program.to_string(),
        source,
    })?;
    log::debug!("pid {} finished with {}", pid, status);

    Ok(ChildHandle { pid, status })
}

/// Tell "the program could not be run" apart from "no process could be created".
///
/// std reports the child's exec failure back through `spawn`, so both arrive here.
fn classify_spawn_error(program: &str, source: io::Error) -> LaunchError {
    let program = program.to_string();
    match source.kind() {
        io::ErrorKind::NotFound
        | io::ErrorKind::PermissionDenied
        | io::ErrorKind::InvalidInput
        | io::ErrorKind::IsADirectory => LaunchError::Exec { program, source },
        _ => LaunchError::Spawn { program, source },
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    match ExitStatusExt::signal(&exit_status) {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn tokens(words: &[&str]) -> TokenList {
        TokenList::from(words.iter().map(|w| w.to_string()).collect::<Vec<_>>())
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_status_is_reported() {
        let ok = launch(&tokens(&["true"])).expect("true should run");
        assert!(ok.status().success());
        assert_eq!(ok.code(), 0);
        assert!(ok.pid() > 0);

        let failed = launch(&tokens(&["false"])).expect("false should run");
        assert_eq!(failed.code(), 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_arguments_are_passed() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        let marker_arg = marker.to_string_lossy().to_string();

        launch(&tokens(&["touch", &marker_arg])).unwrap();
        assert!(Path::new(&marker).exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_blocks_until_child_exits() {
        let start = Instant::now();
        launch(&tokens(&["sleep", "0.2"])).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn test_missing_program_is_exec_error() {
        let err = launch(&tokens(&["not_a_real_binary_xyz"])).unwrap_err();
        assert!(matches!(err, LaunchError::Exec { .. }), "got {:?}", err);
        assert!(err.to_string().starts_with("not_a_real_binary_xyz: "));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = launch(&TokenList::default()).unwrap_err();
        assert!(matches!(err, LaunchError::EmptyCommand));
    }

    #[test]
    #[cfg(unix)]
    fn test_signal_maps_to_128_plus_signal() {
        use std::os::unix::process::ExitStatusExt;
        // raw wait status 9 == killed by SIGKILL
        let child = ChildHandle {
            pid: 1,
            status: ExitStatus::from_raw(9),
        };
        assert_eq!(child.code(), 137);

        // SIGSEGV with core dump flag (0x80) set
        let dumped = ChildHandle {
            pid: 1,
            status: ExitStatus::from_raw(0x80 | 11),
        };
        assert_eq!(dumped.code(), 139);
    }
}
