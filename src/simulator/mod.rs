//! Process simulation engine
//!
//! This module provides the fork simulation core:
//! - [`engine`]: [`Simulation`], the process table and the tick scheduler
//! - [`classifier`]: line -> [`Instruction`] mapping behind the [`LineClassifier`] trait
//! - [`format`]: `printf` rendering with PID/PPID/fork-result substitution
//! - [`hierarchy`]: parent/child tree derived from PPID links
//! - [`events`]: per-tick output ([`TickReport`], [`SimEvent`])
//!
//! # Execution Model
//!
//! Each call to [`Simulation::tick`] lets every process that was running when the
//! tick began execute at most one source line, in ascending PID order. A process
//! forked mid-tick joins on the next tick. The run is finished once no process is
//! running.

pub mod classifier;
pub mod engine;
pub mod events;
pub mod format;
pub mod hierarchy;

pub use classifier::{HeuristicClassifier, Instruction, LineClassifier};
pub use engine::{RunStatus, Simulation};
pub use events::{FinishReason, LineHighlight, SimEvent, TickReport};
pub use hierarchy::{build_tree, ProcessNode};
