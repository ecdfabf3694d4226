//! Simulated process model
//!
//! - [`ProcessRecord`]: one simulated process (PID, PPID, program counter, status)
//! - [`value`]: the [`Value`] type stored in each record's variable snapshot
//!
//! # Ownership
//!
//! A record owns its [`Variables`] outright. Forking clones the parent's map, so a
//! later write to either side is never visible to the other.

pub mod value;

use std::fmt;
use value::{Value, Variables};

/// Process identifier. Real PIDs start at 1; 0 is reserved for "no parent".
pub type Pid = u32;

/// PPID carried by the root process
pub const NO_PARENT: Pid = 0;

/// Lifecycle state of a simulated process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    Finished,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Running => write!(f, "running"),
            ProcessStatus::Finished => write!(f, "finished"),
        }
    }
}

/// One simulated process
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub ppid: Pid,
    /// Index of the next source line this process executes
    pub pc: usize,
    pub status: ProcessStatus,
    pub variables: Variables,
    /// What the most recent `fork()` returned in this process, if any
    pub last_fork_return: Option<Pid>,
}

impl ProcessRecord {
    /// Create the root process: PPID 0, starting at line 0
    pub fn root(pid: Pid) -> Self {
        ProcessRecord {
            pid,
            ppid: NO_PARENT,
            pc: 0,
            status: ProcessStatus::Running,
            variables: Variables::default(),
            last_fork_return: None,
        }
    }

    /// Create the child produced by this process forking at its current line.
    ///
    /// The child resumes on the line after the fork, sees `fork()` return 0, and
    /// gets its own copy of the parent's variables.
    pub fn fork_child(&self, child_pid: Pid) -> Self {
        ProcessRecord {
            pid: child_pid,
            ppid: self.pid,
            pc: self.pc + 1,
            status: ProcessStatus::Running,
            variables: self.variables.clone(),
            last_fork_return: Some(0),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ProcessStatus::Running
    }

    pub fn is_root(&self) -> bool {
        self.ppid == NO_PARENT
    }

    /// Retire the process. Finished is terminal; calling this twice is harmless.
    pub fn finish(&mut self) {
        self.status = ProcessStatus::Finished;
    }

    /// Move to the next source line
    pub fn advance(&mut self) {
        self.pc += 1;
    }

    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Bind a variable in this process's snapshot only
    pub fn set_var(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }
}
