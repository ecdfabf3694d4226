//! Process table pane: one row per process, finished ones included

use super::utils::{border_style, clamp_scroll, pid_color};
use crate::process::{ProcessRecord, ProcessStatus};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Render the process table pane
pub fn render_process_pane(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessRecord],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Processes ({}) ", processes.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    // borders + header row
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    clamp_scroll(scroll_offset, processes.len(), visible_height);

    let header = Row::new(["PID", "PPID", "LINE", "STATUS", "fork()"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = processes
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|p| {
            let status_style = match p.status {
                ProcessStatus::Running => Style::default().fg(DEFAULT_THEME.success),
                ProcessStatus::Finished => Style::default().fg(DEFAULT_THEME.comment),
            };
            let fork_return = p
                .last_fork_return
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(p.pid.to_string()).style(Style::default().fg(pid_color(p.pid))),
                Cell::from(p.ppid.to_string()),
                // 1-based, matching the source pane gutter
                Cell::from((p.pc + 1).to_string()).style(Style::default().fg(DEFAULT_THEME.number)),
                Cell::from(p.status.to_string()).style(status_style),
                Cell::from(fork_return),
            ])
            .style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Min(6),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
