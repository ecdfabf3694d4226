// Tick history for stepping backward through a run

use crate::errors::{SimError, SimResult};
use crate::process::Pid;
use crate::simulator::{LineHighlight, SimEvent, Simulation};

/// Accumulated simulated output, one entry per event
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    pub lines: Vec<OutputLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog { lines: Vec::new() }
    }

    /// Append an event produced during `tick`
    pub fn push(&mut self, event: &SimEvent) {
        self.lines.push(OutputLine {
            text: event.to_string(),
            pid: event.pid(),
        });
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// All entries as display rows, tagged with the PID that produced them
    pub fn get_output(&self) -> Vec<(String, Pid)> {
        self.lines
            .iter()
            .flat_map(|ol| {
                // printf text can carry embedded newlines
                ol.text.split('\n').map(move |s| (s.to_string(), ol.pid))
            })
            .collect()
    }

    /// The whole log, newline-terminated
    pub fn as_text(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l.text)).collect()
    }
}

/// One event in the output log
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub text: String,
    pub pid: Pid,
}

/// State captured after a tick
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub simulation: Simulation,
    pub output: OutputLog,
    pub highlights: Vec<LineHighlight>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough figures: the source lines are shared between snapshots and not counted
        let process_size: usize = self
            .simulation
            .processes()
            .iter()
            .map(|p| 64 + p.variables.len() * 48)
            .sum();

        let output_size: usize = self.output.lines.iter().map(|l| 32 + l.text.len()).sum();

        let highlight_size = self.highlights.len() * 16;

        process_size + output_size + highlight_size
    }
}

/// Recorded snapshots under a memory budget
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> SimResult<()> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(SimError::SnapshotLimitExceeded {
                current: self.current_memory,
                requested: snapshot_size,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
