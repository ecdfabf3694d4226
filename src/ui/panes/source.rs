//! Source code pane rendering with syntax highlighting
//!
//! Displays the simulated program with basic syntax highlighting and a marker
//! for every process sitting on a line.
//!
//! # Features
//!
//! - Syntax highlighting for C keywords, types, strings, numbers, and comments
//! - Per-process markers (`P1 P3`) coloured by PID, shaded background on busy lines
//! - Line numbering
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use super::utils::{border_style, pid_color};
use crate::simulator::LineHighlight;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for C code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    // Simple tokenizer
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Handle comments
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // Handle strings
        if c == '"' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            let end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string), // Strings
            ));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let is_func = c == '(';
                let style = get_keyword_style(&current_word, is_func);
                spans.push(Span::styled(current_word.clone(), style));
                current_word.clear();
            }

            // Color some operators/delimiters
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
                ';' => Style::default().fg(DEFAULT_THEME.fg), // Semicolons
                ',' => Style::default().fg(DEFAULT_THEME.fg),
                '.' => Style::default().fg(DEFAULT_THEME.fg),
                '+' | '-' | '*' | '/' | '=' | '&' | '|' | '!' | '<' | '>' => {
                    Style::default().fg(DEFAULT_THEME.fg)
                } // Operators
                _ => Style::default(),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "char" | "void" | "bool" | "float" | "double" | "long" | "short" | "unsigned"
        | "signed" | "pid_t" => {
            Style::default().fg(DEFAULT_THEME.type_name) // Types
        }
        "struct" | "return" | "if" | "else" | "while" | "for" | "do" | "switch" | "case"
        | "default" | "break" | "continue" | "goto" | "sizeof" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD) // Keywords
        }
        "NULL" => Style::default().fg(DEFAULT_THEME.number), // Constants
        "fork" | "getpid" | "getppid" if is_function => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        _ => {
            if is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg) // Variables/Identifiers
            }
        }
    }
}

/// Render the source code pane.
///
/// `scroll` is the first visible line; it follows the lowest-numbered highlighted
/// line so at least one active process stays in view.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_lines: &[String],
    highlights: &[LineHighlight],
    is_focused: bool,
    scroll: &mut usize,
    follow: bool,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let total_lines = source_lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if follow {
        if let Some(first) = highlights.iter().map(|h| h.line).filter(|&l| l < total_lines).min() {
            // Keep the active line a third of the way down
            *scroll = first.saturating_sub(visible_height / 3);
        }
    }
    super::utils::clamp_scroll(scroll, total_lines, visible_height);

    let visible_lines: Vec<Line> = source_lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let here: Vec<_> = highlights.iter().filter(|h| h.line == idx).collect();
            let is_current = !here.is_empty();

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut content_line = highlight_source_code(line);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            final_spans.extend(content_line.spans);

            if is_current {
                final_spans.push(Span::raw("  "));
                for h in here {
                    final_spans.push(Span::styled(
                        format!("\u{25c0}P{} ", h.pid),
                        Style::default()
                            .fg(pid_color(h.pid))
                            .add_modifier(Modifier::BOLD),
                    ));
                }
            }

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlighting_preserves_text() {
        for src in [
            r#"pid_t child_pid = fork(); // spawn"#,
            r#"printf("hi \"there\"\n", getpid());"#,
            r#"printf("unterminated\"#,
        ] {
            assert_eq!(plain(&highlight_source_code(src)), src);
        }
    }

    #[test]
    fn test_fork_call_styled_as_function() {
        let line = highlight_source_code("fork();");
        assert_eq!(line.spans[0].content, "fork");
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.function));
    }
}
