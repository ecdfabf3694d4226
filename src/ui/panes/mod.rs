//! TUI pane rendering modules
//!
//! Each pane module exports a stateless `render_*` function that draws one area
//! of the screen from borrowed simulation state.
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with syntax highlighting and per-process line markers
//! - [`tree`]: Parent/child process hierarchy
//! - [`processes`]: Process table (PID, PPID, line, status, last fork return)
//! - [`output`]: Simulated output from forks, `printf` and exits
//! - [`status`]: Status bar with keybindings and run state
//! - `utils`: PID colours, border styles, scroll clamping

mod utils;

pub mod output;
pub mod processes;
pub mod source;
pub mod status;
pub mod tree;

pub use output::render_output_pane;
pub use processes::render_process_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;
