//! Main TUI application state and logic

use crate::driver::Driver;
use crate::errors::SimError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::warn;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Tree,
    Processes,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> tree -> processes)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Processes,
            FocusedPane::Processes => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Run controls and simulation state
    pub driver: Driver,

    /// Source lines shown before the first start
    pub source_lines: Vec<String>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub output_scroll: usize,
    pub tree_scroll: usize,
    pub process_scroll: usize,

    /// Source pane tracks the active lines until the user scrolls it
    pub follow_source: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(driver: Driver) -> Self {
        let source_lines = driver.source().lines().map(str::to_string).collect();
        App {
            driver,
            source_lines,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            output_scroll: 0,
            tree_scroll: 0,
            process_scroll: 0,
            follow_source: true,
            should_quit: false,
            status_message: String::from("Press s to start"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Fixed-cadence auto-play
            match self.driver.poll(Instant::now()) {
                Ok(true) => self.after_tick("Playing..."),
                Ok(false) => {}
                Err(e) => self.report_error(e),
            }
            if self.driver.is_complete() && self.status_message == "Playing..." {
                self.status_message = "Simulation finished".to_string();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Tree (top) | Processes (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let lines = if self.driver.simulation().lines().is_empty() {
            &self.source_lines[..]
        } else {
            self.driver.simulation().lines()
        };

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            lines,
            self.driver.highlights(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
            self.follow_source,
        );

        super::panes::render_output_pane(
            frame,
            left_rows[1],
            self.driver.output(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        let tree = self.driver.tree();
        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            tree.as_ref(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_process_pane(
            frame,
            right_rows[1],
            self.driver.processes(),
            self.focused_pane == FocusedPane::Processes,
            &mut self.process_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.driver.status(),
            self.driver.history_position(),
            self.driver.total_snapshots(),
            self.driver.history_memory(),
            self.driver.is_playing(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => match self.driver.start() {
                Ok(()) => self.after_tick("Playing..."),
                Err(e) => self.report_error(e),
            },
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.driver.reset();
                self.output_scroll = 0;
                self.follow_source = true;
                self.status_message = "Idle".to_string();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Right => {
                self.ensure_loaded();
                self.driver.pause();
                match self.driver.step_forward() {
                    Ok(()) => self.after_tick("Stepped forward"),
                    Err(e) => self.report_error(e),
                }
            }
            KeyCode::Left => {
                self.driver.pause();
                match self.driver.step_backward() {
                    Ok(()) => self.after_tick("Stepped backward"),
                    Err(e) => self.report_error(e),
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.follow_source = false;
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_sub(1),
                FocusedPane::Tree => self.tree_scroll = self.tree_scroll.saturating_sub(1),
                FocusedPane::Processes => {
                    self.process_scroll = self.process_scroll.saturating_sub(1)
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.follow_source = false;
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_add(1),
                FocusedPane::Tree => self.tree_scroll = self.tree_scroll.saturating_add(1),
                FocusedPane::Processes => {
                    self.process_scroll = self.process_scroll.saturating_add(1)
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.ensure_loaded();
                    self.status_message = if self.driver.toggle_play() {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                self.ensure_loaded();
                match self.driver.run_to_end() {
                    Ok(()) => self.after_tick("Jumped to end"),
                    Err(e) => self.report_error(e),
                }
            }
            KeyCode::Backspace => match self.driver.rewind_to_start() {
                Ok(()) => self.after_tick("Jumped to start"),
                Err(e) => self.report_error(e),
            },
            _ => {}
        }
    }

    /// Load the program without playing if nothing has been started yet
    fn ensure_loaded(&mut self) {
        if self.driver.total_snapshots() == 0 {
            if let Err(e) = self.driver.load() {
                self.report_error(e);
            }
        }
    }

    fn after_tick(&mut self, message: &str) {
        self.status_message = message.to_string();
        self.follow_source = true;
        // Auto-scroll output to bottom
        self.output_scroll = usize::MAX;
    }

    fn report_error(&mut self, err: SimError) {
        if err.is_history() {
            self.status_message = format!("Cannot step: {}", err);
        } else {
            warn!(error = %err, "simulation error");
            self.status_message = format!("Error: {}", err);
        }
    }
}
