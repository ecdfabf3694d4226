//! Process tree pane
//!
//! Draws the hierarchy as an indented tree with box-drawing connectors:
//!
//! ```text
//! ● PID 1 (running)
//! ├─ ● PID 2 (finished)
//! │  └─ ● PID 4 (running)
//! └─ ● PID 3 (running)
//! ```

use super::utils::{border_style, clamp_scroll, pid_color};
use crate::process::ProcessStatus;
use crate::simulator::ProcessNode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Flatten the tree into display rows: (connector prefix, node)
pub fn tree_rows(root: &ProcessNode) -> Vec<(String, &ProcessNode)> {
    let mut rows = vec![(String::new(), root)];
    push_children(root, "", &mut rows);
    rows
}

fn push_children<'a>(
    node: &'a ProcessNode,
    indent: &str,
    rows: &mut Vec<(String, &'a ProcessNode)>,
) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└─ " } else { "├─ " };
        rows.push((format!("{}{}", indent, connector), child));

        let next_indent = format!("{}{}", indent, if last { "   " } else { "│  " });
        push_children(child, &next_indent, rows);
    }
}

/// Render the process tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: Option<&ProcessNode>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Process Tree ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let Some(root) = tree else {
        let paragraph = Paragraph::new("(no processes)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let rows = tree_rows(root);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, rows.len(), visible_height);

    let lines: Vec<Line> = rows
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(prefix, node)| {
            let (dot_color, label_style) = match node.status {
                ProcessStatus::Running => (
                    DEFAULT_THEME.running,
                    Style::default()
                        .fg(pid_color(node.pid))
                        .add_modifier(Modifier::BOLD),
                ),
                ProcessStatus::Finished => (
                    DEFAULT_THEME.finished,
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            };
            Line::from(vec![
                Span::styled(prefix.clone(), Style::default().fg(DEFAULT_THEME.border_normal)),
                Span::styled("\u{25cf} ", Style::default().fg(dot_color)),
                Span::styled(format!("PID {}", node.pid), label_style),
                Span::styled(
                    format!(" ({})", node.status),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
