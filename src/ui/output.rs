use anyhow::Result;
use chrono_humanize::HumanTime;
use crossterm::style::{self, Color, Stylize};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::zendesk::Ticket;

/// Get display width of a string (accounts for wide chars like emojis)
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Print one plain-text line per ticket: a header row, then one row each.
pub fn render_ticket_list(tickets: &[Ticket], out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{:>8}  {:<8}  {:<10}  {:<8}  {}",
        "Ticket #", "Status", "Type", "Priority", "Subject"
    )?;

    for ticket in tickets {
        writeln!(
            out,
            "{:>8}  {:<8}  {:<10}  {:<8}  {}",
            ticket.id,
            ticket.status.display_name(),
            ticket.type_display(),
            ticket.priority_display(),
            ticket.subject_display()
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Render a single ticket in a styled box.
pub fn render_ticket(ticket: &Ticket) -> Result<()> {
    let width = 64;
    let mut stdout = io::stdout();

    let title = format!(" Ticket #{} ", ticket.id);

    // Top border and title
    print_colored(&format!("╭{}╮", "─".repeat(width)), Color::Cyan)?;
    println!();
    print_colored("│", Color::Cyan)?;
    print_colored(&title, Color::Cyan)?;
    print!("{}", " ".repeat(width - display_width(&title)));
    print_colored("│", Color::Cyan)?;
    println!();
    print_colored(&format!("├{}┤", "─".repeat(width)), Color::Cyan)?;
    println!();

    let subject = truncate(ticket.subject_display(), width - 14);
    print_field(width, "Subject: ", &subject.clone().white().bold().to_string(), &subject)?;

    let type_text = ticket.type_display();
    print_field(width, "Type:    ", &type_text, &type_text)?;

    let status_text = format!("{} {}", ticket.status.icon(), ticket.status.display_name());
    print_field(width, "Status:  ", &status_text, &status_text)?;

    let priority_text = ticket.priority_display();
    print_field(width, "Priority:", &priority_text, &priority_text)?;

    if let Some(requester_id) = ticket.requester_id {
        let text = format!("requester id {}", requester_id);
        print_field(width, "From:    ", &text, &text)?;
    }

    if let Some(created) = ticket.created_at {
        let text = format!("{} ({})", created.format("%Y-%m-%d %H:%M"), HumanTime::from(created));
        print_field(width, "Created: ", &text, &text)?;
    }

    if !ticket.tags.is_empty() {
        let text = truncate(&ticket.tags.join(", "), width - 14);
        print_field(width, "Tags:    ", &text, &text)?;
    }

    if let Some(ref description) = ticket.description {
        print_colored(&format!("├{}┤", "─".repeat(width)), Color::Cyan)?;
        println!();
        for line in wrap_text(description, width - 4) {
            print_colored("│", Color::Cyan)?;
            print!("  {}", line);
            print!(
                "{}",
                " ".repeat((width - 2).saturating_sub(display_width(&line)))
            );
            print_colored("│", Color::Cyan)?;
            println!();
        }
    }

    // Bottom border
    print_colored(&format!("╰{}╯", "─".repeat(width)), Color::Cyan)?;
    println!();

    stdout.flush()?;
    Ok(())
}

/// One `│  Label: value │` row. `styled` is what gets printed, `plain` is the
/// same text without ANSI escapes so the padding math stays correct.
fn print_field(width: usize, label: &str, styled: &str, plain: &str) -> Result<()> {
    print_colored("│", Color::Cyan)?;
    print_colored(&format!("  {}", label), Color::DarkGrey)?;
    print!(" {}", styled);
    print!(
        "{}",
        " ".repeat(width.saturating_sub(3 + display_width(label) + display_width(plain)))
    );
    print_colored("│", Color::Cyan)?;
    println!();
    Ok(())
}

fn print_colored(text: &str, color: Color) -> Result<()> {
    print!("{}", style::style(text).with(color));
    Ok(())
}

fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        s.to_string()
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        for c in s.chars() {
            let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width + 3 > max_width {
                break;
            }
            result.push(c);
            current_width += char_width;
        }
        result.push_str("...");
        result
    }
}

fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let word_width = display_width(word);
        if word_width > max_width && max_width > 0 {
            // A single word wider than the line (long URLs, mostly) gets
            // hard-split so no emitted line ever exceeds max_width.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunk = String::new();
            let mut chunk_width = 0;
            for c in word.chars() {
                let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
                if chunk_width + char_width > max_width && !chunk.is_empty() {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
                chunk.push(c);
                chunk_width += char_width;
            }
            current = chunk;
            current_width = chunk_width;
            continue;
        }
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

    fn ticket_from_json(json: &str) -> Ticket {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_render_ticket_list_prints_header_and_one_line_per_ticket() {
        let tickets = vec![
            ticket_from_json(
                r#"{"id": 1, "status": "open", "subject": "Printer on fire", "priority": "high"}"#,
            ),
            ticket_from_json(r#"{"id": 2, "status": "pending", "subject": "Smoke inquiry"}"#),
            ticket_from_json(r#"{"id": 3, "status": "new"}"#),
        ];

        let mut buffer = Vec::new();
        render_ticket_list(&tickets, &mut buffer).unwrap();

        let rendered = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), tickets.len() + 1);
        assert!(lines[0].contains("Ticket #"));
        assert!(lines[1].contains("Printer on fire"));
        assert!(lines[3].contains("(no subject)"));
    }

    #[test]
    fn test_render_ticket_list_empty_account_prints_only_header() {
        let mut buffer = Vec::new();
        render_ticket_list(&[], &mut buffer).unwrap();

        let rendered = String::from_utf8(buffer).unwrap();
        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn test_render_ticket_survives_long_word_description() {
        // A description dominated by one unbroken word (a long URL) must not
        // break the box padding arithmetic.
        let url = format!("https://acme.example.com/attachments/{}", "a".repeat(80));
        let ticket = ticket_from_json(&format!(
            r#"{{"id": 9, "status": "open", "subject": "See link", "description": "{url}"}}"#
        ));

        render_ticket(&ticket).unwrap();
    }

    #[test]
    fn test_wrap_text_hard_splits_oversized_words() {
        let url = format!("https://acme.example.com/{}", "a".repeat(100));
        let lines = wrap_text(&format!("see {url} please"), 20);

        assert!(lines.len() > 5);
        for line in &lines {
            assert!(display_width(line) <= 20);
        }
        // Nothing dropped: the pieces reassemble the input ("please" fits on
        // the line holding the final chunk of the URL)
        assert_eq!(lines.concat(), format!("see{url} please"));
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("printer on fire", 40), "printer on fire");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        let truncated = truncate("a very long ticket subject line indeed", 12);
        assert!(truncated.ends_with("..."));
        assert!(display_width(&truncated) <= 12);
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("the smoke is very colorful and quite alarming", 16);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(display_width(line) <= 16);
        }
    }

    #[test]
    fn test_wrap_text_empty_input_yields_one_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
