// Tick-driven process simulation engine

use super::classifier::{HeuristicClassifier, Instruction, LineClassifier};
use super::events::{FinishReason, LineHighlight, SimEvent, TickReport};
use super::format;
use super::hierarchy::{build_tree, ProcessNode};
use crate::process::{value::Value, Pid, ProcessRecord};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// PID handed to the root process
pub const ROOT_PID: Pid = 1;

/// Where the run as a whole stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing loaded
    Idle,
    /// Initialized, no tick yet
    Ready,
    Running,
    Finished,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Idle => write!(f, "Idle"),
            RunStatus::Ready => write!(f, "Ready"),
            RunStatus::Running => write!(f, "Running..."),
            RunStatus::Finished => write!(f, "Finished"),
        }
    }
}

/// The simulation context: process table, PID allocator and source lines
#[derive(Debug, Clone)]
pub struct Simulation<C: LineClassifier = HeuristicClassifier> {
    /// Decides what each line does
    classifier: C,

    /// Source lines, shared read-only for the whole run
    lines: Arc<[String]>,

    /// Every process created this run, in creation (= PID) order.
    /// Finished processes stay here until reset.
    processes: Vec<ProcessRecord>,

    /// Next PID to hand out
    next_pid: Pid,

    status: RunStatus,

    /// Ticks executed so far (the completion check does not count)
    ticks: usize,
}

impl Simulation<HeuristicClassifier> {
    pub fn new() -> Self {
        Self::with_classifier(HeuristicClassifier)
    }
}

impl Default for Simulation<HeuristicClassifier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: LineClassifier> Simulation<C> {
    /// Create an idle simulation that classifies lines with `classifier`
    pub fn with_classifier(classifier: C) -> Self {
        Simulation {
            classifier,
            lines: Arc::from(Vec::new()),
            processes: Vec::new(),
            next_pid: ROOT_PID,
            status: RunStatus::Idle,
            ticks: 0,
        }
    }

    /// Discard everything and load `lines`, creating the root process
    pub fn initialize<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reset();
        self.lines = lines.into_iter().map(Into::<String>::into).collect();

        let root = ProcessRecord::root(self.allocate_pid());
        debug!(pid = root.pid, lines = self.lines.len(), "simulation initialized");
        self.processes.push(root);
        self.status = RunStatus::Ready;
    }

    /// Load a source text, one line per `\n`.
    ///
    /// Split with [`str::lines`], so a trailing newline does not add an empty
    /// last line and a closing `}` on the final line terminates its process.
    pub fn initialize_from_source(&mut self, source: &str) {
        self.initialize(source.lines());
    }

    /// Back to the pre-initialization state. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.lines = Arc::from(Vec::new());
        self.processes.clear();
        self.next_pid = ROOT_PID;
        self.status = RunStatus::Idle;
        self.ticks = 0;
    }

    fn allocate_pid(&mut self) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;
        pid
    }

    /// Run one unit of simulated time: every process that was running when the
    /// tick began executes at most one line, in PID order.
    ///
    /// Children forked during the tick first run on the next one. Never fails;
    /// unknown lines are no-ops.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        if self.status == RunStatus::Idle {
            report.completed = true;
            return report;
        }

        let runnable: Vec<usize> = self
            .processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_running())
            .map(|(idx, _)| idx)
            .collect();

        if runnable.is_empty() {
            self.status = RunStatus::Finished;
            report.completed = true;
            report.tree = self.tree();
            return report;
        }

        self.status = RunStatus::Running;
        self.ticks += 1;
        trace!(tick = self.ticks, runnable = runnable.len(), "tick");

        let mut advanced = 0;
        for idx in runnable {
            if !self.processes[idx].is_running() {
                continue;
            }
            if self.step_process(idx, &mut report) {
                advanced += 1;
            }
        }

        // Stall guard: nothing executed a line and nothing is left running
        if advanced == 0 && !self.processes.iter().any(ProcessRecord::is_running) {
            self.status = RunStatus::Finished;
            report.completed = true;
        }

        report.tree = self.tree();
        report
    }

    /// Execute one turn for the process at `idx`. Returns whether a line was
    /// executed (running off the end of the source does not count).
    fn step_process(&mut self, idx: usize, report: &mut TickReport) -> bool {
        let (pid, pc) = (self.processes[idx].pid, self.processes[idx].pc);
        report.highlights.push(LineHighlight { line: pc, pid });

        if pc >= self.lines.len() {
            self.processes[idx].finish();
            debug!(pid, "process reached end of code");
            report.events.push(SimEvent::Finished {
                pid,
                reason: FinishReason::EndOfCode,
            });
            return false;
        }

        match self.classifier.classify(&self.lines, pc) {
            Instruction::Fork => {
                let child_pid = self.allocate_pid();
                let child = self.processes[idx].fork_child(child_pid);

                let parent = &mut self.processes[idx];
                parent.last_fork_return = Some(child_pid);
                parent.advance();

                debug!(parent = pid, child = child_pid, line = pc, "fork");
                self.processes.push(child);
                report.events.push(SimEvent::Forked {
                    parent: pid,
                    child: child_pid,
                });
            }
            Instruction::Terminate => {
                self.processes[idx].finish();
                debug!(pid, line = pc, "process returned");
                report.events.push(SimEvent::Finished {
                    pid,
                    reason: FinishReason::ReturnOrExitScope,
                });
            }
            Instruction::Output(spec) => {
                let text = format::render(spec.as_deref(), &self.lines[pc], &self.processes[idx]);
                self.processes[idx].advance();
                report.events.push(SimEvent::Output { pid, text });
            }
            Instruction::NoOp => self.processes[idx].advance(),
        }
        true
    }

    // ========== Getter methods for UI ==========

    /// Current hierarchy snapshot
    pub fn tree(&self) -> Option<ProcessNode> {
        build_tree(&self.processes)
    }

    /// All processes in creation order, finished ones included
    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == RunStatus::Finished
    }

    pub fn tick_count(&self) -> usize {
        self.ticks
    }

    /// PID the next fork will receive
    pub fn next_pid(&self) -> Pid {
        self.next_pid
    }

    /// Bind a variable in one process's snapshot. Returns false for an unknown PID.
    pub fn set_variable(&mut self, pid: Pid, name: impl Into<String>, value: Value) -> bool {
        match self.processes.iter_mut().find(|p| p.pid == pid) {
            Some(process) => {
                process.set_var(name, value);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessStatus;
    use pretty_assertions::assert_eq;

    fn sim(src: &[&str]) -> Simulation {
        let mut sim = Simulation::new();
        sim.initialize(src.iter().copied());
        sim
    }

    fn event_strings(report: &TickReport) -> Vec<String> {
        report.events.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_initialize_creates_root() {
        let sim = sim(&["fork();"]);
        assert_eq!(sim.status(), RunStatus::Ready);
        assert_eq!(sim.processes().len(), 1);
        let root = &sim.processes()[0];
        assert_eq!((root.pid, root.ppid, root.pc), (ROOT_PID, 0, 0));
        assert_eq!(sim.next_pid(), ROOT_PID + 1);
    }

    #[test]
    fn test_trailing_newline_adds_no_line() {
        let mut sim = Simulation::new();
        sim.initialize_from_source("x;\n} // end\n");
        assert_eq!(sim.lines(), ["x;", "} // end"]);

        sim.tick();
        let report = sim.tick();
        assert_eq!(
            event_strings(&report),
            ["Process 1 finished (return/exit scope)."]
        );
        assert_eq!(sim.processes()[0].pc, 1);
    }

    #[test]
    fn test_tick_on_idle_does_nothing() {
        let mut sim = Simulation::new();
        let report = sim.tick();
        assert!(report.completed);
        assert_eq!(sim.status(), RunStatus::Idle);
        assert!(sim.processes().is_empty());
    }

    #[test]
    fn test_fork_updates_both_sides() {
        let mut sim = sim(&["fork();", "x;"]);
        let report = sim.tick();

        assert_eq!(
            event_strings(&report),
            vec!["Process 1 called fork(). Created child Process 2."]
        );
        let parent = sim.process(1).unwrap();
        let child = sim.process(2).unwrap();
        assert_eq!((parent.pc, parent.last_fork_return), (1, Some(2)));
        assert_eq!((child.pc, child.ppid, child.last_fork_return), (1, 1, Some(0)));
    }

    #[test]
    fn test_child_waits_for_next_tick() {
        let mut sim = sim(&["fork();", "x;", "y;"]);
        let report = sim.tick();
        // only the root took a turn
        assert_eq!(report.highlights, vec![LineHighlight { line: 0, pid: 1 }]);
        assert_eq!(sim.process(2).unwrap().pc, 1);

        let report = sim.tick();
        assert_eq!(
            report.highlights,
            vec![
                LineHighlight { line: 1, pid: 1 },
                LineHighlight { line: 1, pid: 2 },
            ]
        );
    }

    #[test]
    fn test_terminate_freezes_pc() {
        let mut sim = sim(&["x;", "return 0;", "y;"]);
        sim.tick();
        let report = sim.tick();
        assert_eq!(event_strings(&report), vec!["Process 1 finished (return/exit scope)."]);
        let root = sim.process(1).unwrap();
        assert_eq!(root.status, ProcessStatus::Finished);
        assert_eq!(root.pc, 1);

        let report = sim.tick();
        assert!(report.completed);
        assert!(sim.is_finished());
    }

    #[test]
    fn test_empty_program_finishes_on_first_tick() {
        let mut sim = sim(&[]);
        let report = sim.tick();
        assert_eq!(
            event_strings(&report),
            vec!["Process 1 finished (reached end of code)."]
        );
        assert!(report.completed);
        assert_eq!(sim.status(), RunStatus::Finished);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut sim = sim(&["fork();", "fork();"]);
        sim.tick();
        sim.tick();
        sim.reset();
        assert_eq!(sim.status(), RunStatus::Idle);
        assert!(sim.processes().is_empty());
        assert!(sim.lines().is_empty());
        assert_eq!(sim.next_pid(), ROOT_PID);
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.tree(), None);
    }

    #[test]
    fn test_reinitialize_restarts_pids() {
        let mut sim = sim(&["fork();"]);
        sim.tick();
        sim.initialize(["x;"]);
        assert_eq!(sim.processes().len(), 1);
        assert_eq!(sim.processes()[0].pid, ROOT_PID);
    }

    #[test]
    fn test_set_variable_unknown_pid() {
        let mut sim = sim(&["x;"]);
        assert!(sim.set_variable(1, "x", Value::Int(1)));
        assert!(!sim.set_variable(42, "x", Value::Int(1)));
    }

    struct AlwaysNoOp;

    impl LineClassifier for AlwaysNoOp {
        fn classify(&self, _lines: &[String], _index: usize) -> Instruction {
            Instruction::NoOp
        }
    }

    #[test]
    fn test_custom_classifier() {
        let mut sim = Simulation::with_classifier(AlwaysNoOp);
        sim.initialize(["fork();", "return 0;"]);
        let report = sim.tick();
        assert!(report.events.is_empty());
        assert_eq!(sim.processes().len(), 1);
        sim.tick();
        let report = sim.tick();
        assert_eq!(
            report.events,
            vec![SimEvent::Finished {
                pid: 1,
                reason: FinishReason::EndOfCode
            }]
        );
    }
}
