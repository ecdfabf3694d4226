//! Terminal front end for the simulator, drawn with ratatui.
//!
//! [`App`] owns a [`Driver`] and runs the crossterm event loop. Each frame it
//! hands driver state to the render functions in [`panes`]: the source with
//! per-PID line markers, the simulated output, the process tree, the process
//! table and the status bar. [`theme`] holds the shared palette.
//!
//! [`Driver`]: crate::driver::Driver

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
