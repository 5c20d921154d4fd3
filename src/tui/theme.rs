use ratatui::style::{Color, Modifier, Style};

pub mod styles {
    use super::*;

    pub const ACCENT: Style = Style::new().fg(Color::Cyan);
    pub const MUTED: Style = Style::new().fg(Color::DarkGray);
    pub const TEXT: Style = Style::new().fg(Color::White);
    pub const ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
    pub const WARNING: Style = Style::new().fg(Color::Yellow);
}

pub mod ui {
    use super::*;

    pub const BORDER: Style = Style::new().fg(Color::Cyan);
    pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    pub const HEADER: Style = Style::new()
        .fg(Color::Blue)
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::UNDERLINED);
    pub const SELECTED: Style = Style::new().bg(Color::DarkGray);
}
