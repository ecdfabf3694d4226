//! Status bar rendering with keybindings and state indicators

use crate::simulator::RunStatus;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom.
///
/// `position` is the tick currently shown; `recorded` is how many ticks exist in
/// history so far. `memory` is the history's (used, limit) in bytes.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    run_status: RunStatus,
    position: usize,
    recorded: usize,
    memory: (usize, usize),
    is_playing: bool,
) {
    // Split status bar into left and right
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(50),
            ratatui::layout::Constraint::Percentage(50),
        ])
        .split(area);

    // Left side: run status, tick info and message
    let badge_bg = match run_status {
        RunStatus::Idle => DEFAULT_THEME.comment,
        RunStatus::Ready => DEFAULT_THEME.primary,
        RunStatus::Running => DEFAULT_THEME.secondary,
        RunStatus::Finished => DEFAULT_THEME.success,
    };

    let left_spans = vec![
        Span::styled(
            format!(" {} ", run_status),
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" Tick {}/{} ", position, recorded.saturating_sub(1)),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
        Span::styled(
            format!("{} ", format_memory(memory)),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(memory_color(memory)),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" s ", key_style),
        Span::styled(" start ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" r ", key_style),
        Span::styled(" reset ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ←/→ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ ", key_style),
        Span::styled(" end ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    if is_playing {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " ▶ PLAYING ",
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    } else if run_status == RunStatus::Finished && position + 1 >= recorded {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " END ",
            Style::default()
                .bg(DEFAULT_THEME.error)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

/// History usage as `used/limit` in KiB
fn format_memory((used, limit): (usize, usize)) -> String {
    format!("{:.1}/{:.0} KiB", used as f64 / 1024.0, limit as f64 / 1024.0)
}

/// Warn once history passes 90% of its budget
fn memory_color((used, limit): (usize, usize)) -> Color {
    if used.saturating_mul(10) > limit.saturating_mul(9) {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.comment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_memory() {
        assert_eq!(format_memory((0, 64 * 1024 * 1024)), "0.0/65536 KiB");
        assert_eq!(format_memory((1536, 4096)), "1.5/4 KiB");
    }

    #[test]
    fn test_memory_color_near_limit() {
        assert_eq!(memory_color((10, 100)), DEFAULT_THEME.comment);
        assert_eq!(memory_color((95, 100)), DEFAULT_THEME.error);
    }
}
