use ratatui::style::Color;

/// Colours shared by every pane. Per-PID hues come from `panes::utils::pid_color`.
pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Ready badge
    pub secondary: Color, // Running badge and PLAYING marker
    pub comment: Color,   // Idle badge, placeholders, key hints
    pub success: Color,   // Finished badge
    pub error: Color,     // END marker, history near budget
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color, // Status bar and highlighted source rows
    pub function: Color,        // fork/printf/getpid calls in the source pane
    pub type_name: Color,
    pub running: Color,  // Tree nodes and table rows still running
    pub finished: Color, // Tree nodes and table rows that have exited
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),
    string: Color::Rgb(250, 179, 135),
    number: Color::Rgb(245, 194, 231),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(88, 91, 112),
    current_line_bg: Color::Rgb(50, 50, 70),
    function: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),
    running: Color::Rgb(105, 179, 162),
    finished: Color::Rgb(128, 128, 128),
};
