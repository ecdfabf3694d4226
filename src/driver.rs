//! Run controls and tick cadence
//!
//! [`Driver`] sits between the engine and the UI. It owns the source text and a
//! [`Simulation`], accumulates the output log, and records a [`Snapshot`] after
//! every tick so a run can be stepped backward and replayed.
//!
//! # Controls
//!
//! - [`Driver::start`]: initialize from the source and begin auto-play
//! - [`Driver::reset`]: full teardown back to idle
//! - [`Driver::step_forward`] / [`Driver::step_backward`]: manual stepping
//! - [`Driver::poll`]: call from the event loop; ticks once per interval while playing

use crate::errors::{SimError, SimResult};
use crate::process::ProcessRecord;
use crate::simulator::{LineHighlight, ProcessNode, RunStatus, Simulation};
use crate::snapshot::{OutputLog, Snapshot, SnapshotManager};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct Driver {
    /// Program text handed to the simulation on start
    source: String,

    simulation: Simulation,

    output: OutputLog,

    /// Lines touched during the most recent tick
    highlights: Vec<LineHighlight>,

    history: SnapshotManager,

    /// Index of the snapshot currently shown
    history_position: usize,

    tick_interval: Duration,

    is_playing: bool,

    last_tick: Option<Instant>,
}

impl Driver {
    pub fn new(source: String, tick_interval: Duration, snapshot_limit: usize) -> Self {
        Driver {
            source,
            simulation: Simulation::new(),
            output: OutputLog::new(),
            highlights: Vec::new(),
            history: SnapshotManager::new(snapshot_limit),
            history_position: 0,
            tick_interval,
            is_playing: false,
            last_tick: None,
        }
    }

    /// Initialize a fresh run and begin playing. Restarts any run in progress.
    pub fn start(&mut self) -> SimResult<()> {
        self.load()?;
        self.is_playing = true;
        info!(lines = self.simulation.lines().len(), "simulation started");
        Ok(())
    }

    /// Initialize a fresh run without playing it. If the first snapshot does
    /// not fit the history budget the driver stays idle.
    pub fn load(&mut self) -> SimResult<()> {
        self.reset();
        let mut simulation = Simulation::new();
        simulation.initialize_from_source(&self.source);
        self.history.push(Snapshot {
            simulation,
            output: OutputLog::new(),
            highlights: Vec::new(),
        })?;
        self.restore_snapshot(0)
    }

    /// Stop and discard the run. Calling it again changes nothing.
    pub fn reset(&mut self) {
        self.simulation.reset();
        self.output.clear();
        self.highlights.clear();
        self.history.clear();
        self.history_position = 0;
        self.is_playing = false;
        self.last_tick = None;
    }

    fn restore_snapshot(&mut self, index: usize) -> SimResult<()> {
        let snapshot = self
            .history
            .get(index)
            .cloned()
            .ok_or_else(|| SimError::History("Snapshot not found in history".to_string()))?;

        self.simulation = snapshot.simulation;
        self.output = snapshot.output;
        self.highlights = snapshot.highlights;
        self.history_position = index;
        Ok(())
    }

    /// Advance one tick: replay it from history if already recorded, otherwise
    /// run it on the engine and record it. The tick is computed on a copy and
    /// only becomes current once history accepts it.
    pub fn step_forward(&mut self) -> SimResult<()> {
        if self.simulation.status() == RunStatus::Idle {
            return Err(SimError::History("Simulation not started".to_string()));
        }

        if self.history_position + 1 < self.history.len() {
            return self.restore_snapshot(self.history_position + 1);
        }

        if self.simulation.is_finished() {
            return Err(SimError::History(
                "No more ticks available (simulation finished)".to_string(),
            ));
        }

        let mut simulation = self.simulation.clone();
        let report = simulation.tick();
        let mut output = self.output.clone();
        for event in &report.events {
            output.push(event);
        }
        let completed = report.completed;

        self.history.push(Snapshot {
            simulation,
            output,
            highlights: report.highlights,
        })?;
        self.restore_snapshot(self.history_position + 1)?;

        if completed {
            info!(
                ticks = self.simulation.tick_count(),
                processes = self.simulation.processes().len(),
                "simulation finished"
            );
        }
        Ok(())
    }

    /// Go back one tick
    pub fn step_backward(&mut self) -> SimResult<()> {
        if self.history_position == 0 {
            return Err(SimError::History(
                "Already at the beginning of the run".to_string(),
            ));
        }
        self.restore_snapshot(self.history_position - 1)
    }

    /// Jump back to the state right after start
    pub fn rewind_to_start(&mut self) -> SimResult<()> {
        if self.history.is_empty() {
            return Err(SimError::History("No snapshots available".to_string()));
        }
        self.restore_snapshot(0)
    }

    /// Step until the run completes
    pub fn run_to_end(&mut self) -> SimResult<()> {
        self.is_playing = false;
        while !self.is_complete() {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Tick once if playing and the interval has elapsed since the last tick.
    /// Returns whether a tick happened. Playback stops when the run completes
    /// or a step fails.
    pub fn poll(&mut self, now: Instant) -> SimResult<bool> {
        if !self.is_playing {
            return Ok(false);
        }
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.tick_interval {
                return Ok(false);
            }
        }
        self.last_tick = Some(now);

        let stepped = self.step_forward();
        if stepped.is_err() || self.is_complete() {
            debug!("playback stopped");
            self.is_playing = false;
        }
        stepped.map(|()| true)
    }

    /// Toggle auto-play. Returns the new state.
    pub fn toggle_play(&mut self) -> bool {
        self.is_playing = !self.is_playing && !self.is_complete();
        self.last_tick = None;
        self.is_playing
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    // ========== Getter methods for UI ==========

    pub fn is_complete(&self) -> bool {
        self.simulation.is_finished()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        self.simulation.processes()
    }

    pub fn tree(&self) -> Option<ProcessNode> {
        self.simulation.tree()
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn highlights(&self) -> &[LineHighlight] {
        &self.highlights
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn status(&self) -> RunStatus {
        self.simulation.status()
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.history.len()
    }

    /// Estimated bytes held by history, and the budget
    pub fn history_memory(&self) -> (usize, usize) {
        (self.history.memory_usage(), self.history.memory_limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORK_THEN_PRINT: &str = "fork();\nprintf(\"child=%d\\n\", child_pid);\n";

    fn driver(source: &str) -> Driver {
        Driver::new(source.to_string(), Duration::from_millis(100), 1024 * 1024)
    }

    #[test]
    fn test_step_before_start_fails() {
        let mut d = driver(FORK_THEN_PRINT);
        assert!(d.step_forward().unwrap_err().is_history());
    }

    #[test]
    fn test_start_is_repeatable() {
        let mut d = driver(FORK_THEN_PRINT);
        d.start().unwrap();
        d.step_forward().unwrap();
        d.start().unwrap();
        assert_eq!(d.processes().len(), 1);
        assert_eq!(d.total_snapshots(), 1);
        assert!(d.output().lines.is_empty());
        assert!(d.is_playing());
    }

    #[test]
    fn test_reset_twice_matches_reset_once() {
        let mut d = driver(FORK_THEN_PRINT);
        d.start().unwrap();
        d.run_to_end().unwrap();

        d.reset();
        let once = (d.status(), d.processes().len(), d.total_snapshots(), d.output().lines.len());
        d.reset();
        let twice = (d.status(), d.processes().len(), d.total_snapshots(), d.output().lines.len());

        assert_eq!(once, twice);
        assert_eq!(once, (RunStatus::Idle, 0, 0, 0));
        assert!(!d.is_playing());
    }

    #[test]
    fn test_step_backward_and_replay() {
        let mut d = driver(FORK_THEN_PRINT);
        d.load().unwrap();
        d.step_forward().unwrap();
        d.step_forward().unwrap();
        let after_two = d.output().as_text();

        d.step_backward().unwrap();
        assert_eq!(d.history_position(), 1);
        assert_eq!(d.processes().len(), 2);
        assert_eq!(d.output().lines.len(), 1);

        d.step_forward().unwrap();
        assert_eq!(d.output().as_text(), after_two);
        assert_eq!(d.total_snapshots(), 3);
    }

    #[test]
    fn test_step_backward_at_start_fails() {
        let mut d = driver(FORK_THEN_PRINT);
        d.load().unwrap();
        assert!(d.step_backward().unwrap_err().is_history());
    }

    #[test]
    fn test_run_to_end_then_step_fails() {
        let mut d = driver(FORK_THEN_PRINT);
        d.load().unwrap();
        d.run_to_end().unwrap();
        assert!(d.is_complete());
        assert!(d.step_forward().unwrap_err().is_history());

        d.rewind_to_start().unwrap();
        assert_eq!(d.history_position(), 0);
        assert_eq!(d.status(), RunStatus::Ready);
    }

    #[test]
    fn test_poll_respects_interval() {
        let mut d = driver(FORK_THEN_PRINT);
        d.start().unwrap();
        let t0 = Instant::now();

        assert!(d.poll(t0).unwrap());
        assert!(!d.poll(t0 + Duration::from_millis(50)).unwrap());
        assert!(d.poll(t0 + Duration::from_millis(100)).unwrap());
        assert_eq!(d.history_position(), 2);
    }

    #[test]
    fn test_poll_stops_when_complete() {
        let mut d = driver("x;");
        d.start().unwrap();
        let mut now = Instant::now();
        while d.is_playing() {
            d.poll(now).unwrap();
            now += Duration::from_millis(100);
        }
        assert!(d.is_complete());
        assert!(!d.toggle_play());
    }

    #[test]
    fn test_snapshot_limit_surfaces_as_error() {
        let mut d = Driver::new(FORK_THEN_PRINT.to_string(), Duration::from_millis(1), 0);
        assert!(matches!(
            d.load(),
            Err(SimError::SnapshotLimitExceeded { .. })
        ));
        assert_eq!(d.status(), RunStatus::Idle);
        assert!(d.processes().is_empty());
        assert_eq!(d.total_snapshots(), 0);
        assert!(d.step_forward().unwrap_err().is_history());
    }

    #[test]
    fn test_rejected_tick_leaves_state_unchanged() {
        // Room for the initial snapshot but not for the one after the fork
        let mut d = Driver::new(FORK_THEN_PRINT.to_string(), Duration::from_millis(10), 100);
        d.load().unwrap();
        let before = d.history_memory();

        for _ in 0..2 {
            assert!(matches!(
                d.step_forward(),
                Err(SimError::SnapshotLimitExceeded { limit: 100, .. })
            ));
            assert_eq!(d.processes().len(), 1);
            assert!(d.output().lines.is_empty());
            assert!(d.highlights().is_empty());
            assert_eq!(d.simulation().tick_count(), 0);
            assert_eq!(d.status(), RunStatus::Ready);
            assert_eq!(d.history_position(), 0);
            assert_eq!(d.total_snapshots(), 1);
            assert_eq!(d.history_memory(), before);
        }
        assert!(d.step_backward().unwrap_err().is_history());
    }

    #[test]
    fn test_history_memory_tracks_snapshots() {
        let mut d = driver(FORK_THEN_PRINT);
        assert_eq!(d.history_memory(), (0, 1024 * 1024));

        d.load().unwrap();
        let (after_load, limit) = d.history_memory();
        assert!(after_load > 0);
        assert_eq!(limit, 1024 * 1024);

        d.step_forward().unwrap();
        assert!(d.history_memory().0 > after_load);

        d.reset();
        assert_eq!(d.history_memory().0, 0);
    }
}
