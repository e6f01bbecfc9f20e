//! Read-only process inspection over a procfs-style directory.
//!
//! Two services live here, neither of which the shell itself depends on:
//! [`list_tasks`] enumerates every process as `{name, pid, state}`, and
//! [`PidInspector`] remembers one PID and renders a one-line report about it.
//! Both take the procfs root as a parameter so they can run against a fake tree.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the kernel exposes per-process directories.
pub const PROC_ROOT: &str = "/proc";

/// Sentinel meaning "no PID stored".
pub const UNSET_PID: i64 = -1;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Text written to the inspector was not a base-10 integer.
    #[error("invalid PID: {0:?}")]
    InvalidPid(String),
    /// A `stat` record did not have the `pid (comm) state ...` shape.
    #[error("malformed stat record for {0}")]
    MalformedStat(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Scheduler state of a task, in report-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    TracingStop,
    Dead,
    Zombie,
    Parked,
    Idle,
}

impl TaskState {
    const ALL: [TaskState; 9] = [
        TaskState::Running,
        TaskState::Sleeping,
        TaskState::DiskSleep,
        TaskState::Stopped,
        TaskState::TracingStop,
        TaskState::Dead,
        TaskState::Zombie,
        TaskState::Parked,
        TaskState::Idle,
    ];

    /// Single-letter code as shown by `ps`.
    pub fn as_char(self) -> char {
        match self {
            TaskState::Running => 'R',
            TaskState::Sleeping => 'S',
            TaskState::DiskSleep => 'D',
            TaskState::Stopped => 'T',
            TaskState::TracingStop => 't',
            TaskState::Dead => 'X',
            TaskState::Zombie => 'Z',
            TaskState::Parked => 'P',
            TaskState::Idle => 'I',
        }
    }

    /// Position in `RSDTtXZPI`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a state letter. `W` (paging, pre-2.6) and `x` are folded into their
    /// modern equivalents.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'W' => Some(TaskState::Sleeping),
            'x' => Some(TaskState::Dead),
            _ => Self::ALL.iter().copied().find(|state| state.as_char() == c),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One process as seen in procfs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: String,
    pub pid: i64,
    pub state: TaskState,
}

impl TaskInfo {
    /// Parse the contents of `<root>/<pid>/stat`.
    ///
    /// The command name sits between the first `(` and the last `)`, and may itself
    /// contain spaces and parentheses.
    pub fn parse_stat(record: &str) -> Result<Self, TaskError> {
        let malformed = || TaskError::MalformedStat(record.trim_end().to_string());

        let open = record.find('(').ok_or_else(malformed)?;
        let close = record.rfind(')').ok_or_else(malformed)?;
        if close < open {
            return Err(malformed());
        }

        let pid = record[..open].trim().parse().map_err(|_| malformed())?;
        let name = record[open + 1..close].to_string();
        let state = record[close + 1..]
            .split_whitespace()
            .next()
            .and_then(|field| {
                let mut chars = field.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => TaskState::from_char(c),
                    _ => None,
                }
            })
            .ok_or_else(malformed)?;

        Ok(Self { name, pid, state })
    }
}

impl fmt::Display for TaskInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | PID: {} | State Index: {}",
            self.name,
            self.pid,
            self.state.index()
        )
    }
}

/// Read the task for `pid`, or `None` when it does not exist.
pub fn find_task(root: &Path, pid: i64) -> Result<Option<TaskInfo>, TaskError> {
    if pid < 0 {
        return Ok(None);
    }
    match fs::read_to_string(root.join(pid.to_string()).join("stat")) {
        Ok(record) => TaskInfo::parse_stat(&record).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Every process under `root`, ordered by PID.
///
/// Processes that exit while the directory is being walked are skipped.
pub fn list_tasks(root: &Path) -> Result<Vec<TaskInfo>, TaskError> {
    let mut tasks = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<i64>().ok())
        else {
            continue;
        };

        match find_task(root, pid) {
            Ok(Some(task)) => tasks.push(task),
            Ok(None) => log::trace!("pid {} vanished during scan", pid),
            Err(e) => log::debug!("skipping pid {}: {}", pid, e),
        }
    }
    tasks.sort_by_key(|task| task.pid);
    Ok(tasks)
}

/// A settable "current PID" that can be reported on.
#[derive(Debug, Clone)]
pub struct PidInspector {
    root: PathBuf,
    stored: Option<i64>,
}

impl PidInspector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            stored: None,
        }
    }

    pub fn stored(&self) -> Option<i64> {
        self.stored
    }

    /// Store the PID spelled by `text`. Invalid text leaves the stored value alone.
    ///
    /// Writing [`UNSET_PID`] clears the stored PID.
    pub fn write(&mut self, text: &str) -> Result<i64, TaskError> {
        let pid = text
            .trim()
            .parse::<i64>()
            .map_err(|_| TaskError::InvalidPid(text.to_string()))?;
        log::info!("stored PID: {}", pid);
        self.stored = (pid != UNSET_PID).then_some(pid);
        Ok(pid)
    }

    /// Describe the stored PID in one newline-terminated line.
    pub fn report(&self) -> Result<String, TaskError> {
        let Some(pid) = self.stored else {
            return Ok("Please enter a PID first.\n".to_string());
        };
        Ok(match find_task(&self.root, pid)? {
            Some(task) => format!(
                "Process: {}, PID: {}, State: {}\n",
                task.name, task.pid, task.state
            ),
            None => format!("PID {} not found.\n", pid),
        })
    }
}

impl Default for PidInspector {
    fn default() -> Self {
        Self::new(PROC_ROOT)
    }
}
