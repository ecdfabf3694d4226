//! What a tick reports back to its caller

use super::hierarchy::ProcessNode;
use crate::process::Pid;
use std::fmt;

/// Why a process stopped running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Executed a `return` or a scope-closing `}`
    ReturnOrExitScope,
    /// Program counter ran past the last source line
    EndOfCode,
}

/// One entry for the simulated output panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Forked { parent: Pid, child: Pid },
    Output { pid: Pid, text: String },
    Finished { pid: Pid, reason: FinishReason },
}

impl SimEvent {
    /// PID of the process that produced this event
    pub fn pid(&self) -> Pid {
        match self {
            SimEvent::Forked { parent, .. } => *parent,
            SimEvent::Output { pid, .. } | SimEvent::Finished { pid, .. } => *pid,
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::Forked { parent, child } => write!(
                f,
                "Process {} called fork(). Created child Process {}.",
                parent, child
            ),
            SimEvent::Output { pid, text } => write!(f, "[PID:{}] {}", pid, text),
            SimEvent::Finished {
                pid,
                reason: FinishReason::ReturnOrExitScope,
            } => write!(f, "Process {} finished (return/exit scope).", pid),
            SimEvent::Finished {
                pid,
                reason: FinishReason::EndOfCode,
            } => write!(f, "Process {} finished (reached end of code).", pid),
        }
    }
}

/// "Process `pid` is at line `line`", emitted once per turn.
///
/// `line` may be past the end of the source on the turn a process runs off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHighlight {
    pub line: usize,
    pub pid: Pid,
}

/// Everything one call to [`Simulation::tick`] produced
///
/// [`Simulation::tick`]: super::engine::Simulation::tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<SimEvent>,
    pub highlights: Vec<LineHighlight>,
    /// Hierarchy after the tick
    pub tree: Option<ProcessNode>,
    /// The run has no running processes left
    pub completed: bool,
}
