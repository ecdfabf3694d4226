//! # Introduction
//!
//! forktty simulates `fork()` one step at a time. A single initial process runs a
//! small C-like program line by line; every `fork()` adds a child to the process
//! tree, and `printf` output from all processes is interleaved in one log. The
//! run is shown in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source lines → Classifier → Simulation::tick → TickReport → Driver → TUI
//! ```
//!
//! 1. [`simulator`]: the engine. [`simulator::Simulation`] owns the process table
//!    and executes one line per running process per tick.
//! 2. [`process`]: the per-process record (PID, PPID, program counter, status,
//!    variable snapshot).
//! 3. [`driver`]: start/reset controls, fixed tick cadence, and tick history
//!    recorded as [`snapshot::Snapshot`]s for stepping backward.
//! 4. [`config`] / [`errors`]: command-line configuration and error types.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Recognised lines
//!
//! The program is not parsed. Each trimmed line is matched textually:
//! `fork()` anywhere forks, `printf(...)` at the start prints, `return` or a bare
//! `}` ends the process, and everything else is skipped.

pub mod config;
pub mod driver;
pub mod errors;
pub mod process;
pub mod simulator;
pub mod snapshot;
pub mod ui;
