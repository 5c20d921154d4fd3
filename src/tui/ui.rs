use chrono_humanize::HumanTime;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState,
    },
};

use super::app::{App, PageStatus};
use super::theme;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, app: &mut App) {
    // Split into main area and footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    // Split main area into left (ticket table) and right (detail) panels
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[0]);

    render_ticket_table(frame, app, chunks[0]);
    render_details(frame, app, chunks[1]);
    render_footer(frame, app, main_chunks[1]);
}

/// The ticket table: # / Subject / Type / Priority, the column set of the
/// ticket list screen.
fn render_ticket_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Ticket #"),
        Cell::from("Subject"),
        Cell::from("Type"),
        Cell::from("Priority"),
    ])
    .style(theme::ui::HEADER);

    let rows: Vec<Row> = app
        .tickets
        .iter()
        .map(|ticket| {
            let priority_style = match &ticket.priority {
                Some(p) => Style::default().fg(p.color()),
                None => theme::styles::MUTED,
            };
            Row::new(vec![
                Cell::from(format!("{:>7}", ticket.id)),
                Cell::from(ticket.subject_display().to_string()),
                Cell::from(ticket.type_display()),
                Cell::from(ticket.priority_display()).style(priority_style),
            ])
        })
        .collect();

    let count_title = match (app.tickets.len(), app.total_count) {
        (0, _) => String::new(),
        (cached, Some(total)) => format!(" {} of {} ", cached, total),
        (cached, None) => format!(" {} ", cached),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::ui::BORDER)
            .title(Line::from(vec![Span::styled(" Tickets ", theme::ui::TITLE)]))
            .title_bottom(
                Line::from(Span::styled(count_title, theme::styles::MUTED)).right_aligned(),
            ),
    )
    .row_highlight_style(theme::ui::SELECTED.add_modifier(Modifier::BOLD))
    .highlight_symbol("► ");

    let mut state = TableState::default();
    state.select(if app.tickets.is_empty() {
        None
    } else {
        Some(app.selected_index)
    });

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &mut App, area: Rect) {
    // Calculate inner area first to determine visible height
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let visible_height = inner.height;

    // Scroll position on the bottom border (only if scrollable)
    let scroll_title = if app.content_height > visible_height {
        Line::from(Span::styled(
            format!(
                " {}/{} ",
                app.scroll_offset + 1,
                app.content_height.saturating_sub(visible_height) + 1
            ),
            theme::styles::MUTED,
        ))
    } else {
        Line::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::ui::BORDER)
        .title(Line::from(vec![Span::styled(
            " Ticket Details ",
            theme::ui::TITLE,
        )]))
        .title_bottom(scroll_title.right_aligned());

    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let content = match app.selected_ticket() {
        Some(ticket) => ticket_lines(ticket, inner.width.saturating_sub(4) as usize),
        None => placeholder_lines(&app.page_status),
    };

    let content_height = content.len() as u16;
    app.set_content_height(content_height);

    let paragraph = Paragraph::new(content).scroll((app.scroll_offset, 0));
    frame.render_widget(paragraph, inner);

    if content_height > inner.height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state =
            ScrollbarState::new(content_height.saturating_sub(inner.height) as usize)
                .position(app.scroll_offset as usize);

        frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
    }
}

fn placeholder_lines(status: &PageStatus) -> Vec<Line<'static>> {
    let line = match status {
        PageStatus::Loading | PageStatus::Idle => Line::from(Span::styled(
            "  Loading tickets...",
            theme::styles::WARNING,
        )),
        PageStatus::Exhausted => Line::from(Span::styled(
            "  No tickets on this account",
            theme::styles::MUTED.add_modifier(Modifier::ITALIC),
        )),
        PageStatus::Error(err) => Line::from(Span::styled(
            format!("  Error: {}", err),
            Style::default().fg(Color::Red),
        )),
    };
    vec![Line::from(""), line]
}

fn ticket_lines(ticket: &crate::zendesk::Ticket, max_width: usize) -> Vec<Line<'static>> {
    let type_name = ticket.type_display();
    let type_icon = ticket
        .ticket_type
        .as_ref()
        .map(|t| t.icon())
        .unwrap_or("📄");

    // ID and type
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("#{} ", ticket.id),
                theme::styles::ACCENT.add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} {}", type_icon, type_name)),
        ]),
    ];

    // Metadata line: Status • Priority • Updated
    let mut meta_spans = vec![
        Span::raw("  "),
        Span::styled(
            format!("{} {}", ticket.status.icon(), ticket.status.display_name()),
            Style::default().fg(ticket.status.color()),
        ),
    ];

    if let Some(ref priority) = ticket.priority {
        meta_spans.push(Span::styled("  •  ", theme::styles::MUTED));
        meta_spans.push(Span::styled(
            priority.display_name(),
            Style::default().fg(priority.color()),
        ));
    }

    if let Some(updated) = ticket.updated_at {
        meta_spans.push(Span::styled("  •  ", theme::styles::MUTED));
        meta_spans.push(Span::styled(
            format!("updated {}", HumanTime::from(updated)),
            theme::styles::MUTED,
        ));
    }

    lines.push(Line::from(meta_spans));
    lines.push(Line::from(""));

    // Subject (bold + underlined)
    for line in wrap_text(ticket.subject_display(), max_width) {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                line,
                theme::styles::TEXT
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    // Description
    if let Some(ref description) = ticket.description {
        lines.push(Line::from(""));
        for paragraph in description.split('\n') {
            if paragraph.trim().is_empty() {
                lines.push(Line::from(""));
                continue;
            }
            for line in wrap_text(paragraph, max_width.saturating_sub(2)) {
                lines.push(Line::from(vec![Span::raw("  "), Span::raw(line)]));
            }
        }
    }

    // Tags
    if !ticket.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Tags: ", theme::styles::MUTED),
            Span::styled(ticket.tags.join(", "), Style::default().fg(Color::Magenta)),
        ]));
    }

    lines
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" j/k ", theme::styles::ACCENT),
        Span::styled("navigate  ", theme::styles::MUTED),
        Span::styled("pg↑↓ ", theme::styles::ACCENT),
        Span::styled("jump  ", theme::styles::MUTED),
        Span::styled("J/K ", theme::styles::ACCENT),
        Span::styled("scroll detail  ", theme::styles::MUTED),
        Span::styled("o", theme::styles::ACCENT),
        Span::styled("pen  ", theme::styles::MUTED),
        Span::styled("r", theme::styles::ACCENT),
        Span::styled("efresh  ", theme::styles::MUTED),
        Span::styled("q", theme::styles::ACCENT),
        Span::styled("uit", theme::styles::MUTED),
    ];

    match &app.page_status {
        PageStatus::Loading => {
            spans.push(Span::styled("   fetching…", theme::styles::WARNING));
        }
        PageStatus::Error(err) => {
            spans.push(Span::styled(
                format!("   fetch failed: {}", err),
                theme::styles::ERROR,
            ));
        }
        _ => {}
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::styles::MUTED);
    frame.render_widget(paragraph, area);
}

/// Wrap text to fit within the display width (wide chars count double)
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![s.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(current);
            current = word.to_string();
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_splits_long_lines() {
        let lines = wrap_text("one two three four five six seven", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 10);
        }
    }

    #[test]
    fn test_wrap_text_zero_width_passthrough() {
        assert_eq!(wrap_text("anything", 0), vec!["anything".to_string()]);
    }

    #[test]
    fn test_wrap_text_counts_wide_chars_double() {
        // Each word is 2 chars but 4 columns wide; two words plus a space
        // need 9 display columns.
        let lines = wrap_text("印刷 故障 緊急", 9);
        assert_eq!(lines, vec!["印刷 故障", "緊急"]);

        let narrow = wrap_text("印刷 故障 緊急", 8);
        assert_eq!(narrow, vec!["印刷", "故障", "緊急"]);
    }
}
