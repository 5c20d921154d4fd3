use chrono::{DateTime, Utc};
use ratatui::style::Color;
use serde::Deserialize;
use std::str::FromStr;

/// A Zendesk support ticket. The schema is owned by the Zendesk service;
/// this type only gives the fields we display a shape, it does not validate
/// or transform them.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    #[serde(default, rename = "type")]
    pub ticket_type: Option<TicketType>,
    #[serde(default)]
    pub requester_id: Option<u64>,
    #[serde(default)]
    pub assignee_id: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One page of `GET /api/v2/tickets.json`. `next_page` is an absolute URL
/// to follow, or absent on the last page.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Wrapper around `GET /api/v2/tickets/{id}.json`.
#[derive(Debug, Deserialize)]
pub struct TicketEnvelope {
    pub ticket: Ticket,
}

impl Ticket {
    pub fn subject_display(&self) -> &str {
        match self.subject.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => "(no subject)",
        }
    }

    /// Column value for the type field; an untyped ticket shows as "Ticket".
    pub fn type_display(&self) -> String {
        match &self.ticket_type {
            Some(t) => t.display_name(),
            None => "Ticket".to_string(),
        }
    }

    /// Column value for the priority field; unset shows as "-".
    pub fn priority_display(&self) -> String {
        match &self.priority {
            Some(p) => p.display_name(),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TicketStatus {
    New,
    Open,
    Pending,
    Hold,
    Solved,
    Closed,
    Other(String),
}

impl FromStr for TicketStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "new" => Self::New,
            "open" => Self::Open,
            "pending" => Self::Pending,
            "hold" => Self::Hold,
            "solved" => Self::Solved,
            "closed" => Self::Closed,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap()
    }
}

impl TicketStatus {
    pub fn display_name(&self) -> String {
        match self {
            Self::New => "New".to_string(),
            Self::Open => "Open".to_string(),
            Self::Pending => "Pending".to_string(),
            Self::Hold => "Hold".to_string(),
            Self::Solved => "Solved".to_string(),
            Self::Closed => "Closed".to_string(),
            Self::Other(s) => s.clone(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::New => "🆕",
            Self::Open => "🔵",
            Self::Pending => "⏳",
            Self::Hold => "✋",
            Self::Solved => "✅",
            Self::Closed => "✔️",
            Self::Other(_) => "⚪",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::New => Color::Yellow,
            Self::Open => Color::Cyan,
            Self::Pending => Color::Blue,
            Self::Hold => Color::Gray,
            Self::Solved | Self::Closed => Color::Green,
            Self::Other(_) => Color::White,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TicketPriority {
    Low,
    Normal,
    High,
    Urgent,
    Other(String),
}

impl FromStr for TicketPriority {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "normal" => Self::Normal,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl From<String> for TicketPriority {
    fn from(s: String) -> Self {
        s.parse().unwrap()
    }
}

impl TicketPriority {
    pub fn display_name(&self) -> String {
        match self {
            Self::Low => "Low".to_string(),
            Self::Normal => "Normal".to_string(),
            Self::High => "High".to_string(),
            Self::Urgent => "Urgent".to_string(),
            Self::Other(s) => s.clone(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Low => Color::DarkGray,
            Self::Normal => Color::White,
            Self::High => Color::Yellow,
            Self::Urgent => Color::Red,
            Self::Other(_) => Color::White,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TicketType {
    Problem,
    Incident,
    Question,
    Task,
    Other(String),
}

impl FromStr for TicketType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "problem" => Self::Problem,
            "incident" => Self::Incident,
            "question" => Self::Question,
            "task" => Self::Task,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl From<String> for TicketType {
    fn from(s: String) -> Self {
        s.parse().unwrap()
    }
}

impl TicketType {
    pub fn display_name(&self) -> String {
        match self {
            Self::Problem => "Problem".to_string(),
            Self::Incident => "Incident".to_string(),
            Self::Question => "Question".to_string(),
            Self::Task => "Task".to_string(),
            Self::Other(s) => s.clone(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Problem => "🐞",
            Self::Incident => "🔥",
            Self::Question => "❓",
            Self::Task => "📒",
            Self::Other(_) => "📄",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET_JSON: &str = r#"{
        "id": 35436,
        "url": "https://acme.zendesk.com/api/v2/tickets/35436.json",
        "subject": "Help, my printer is on fire!",
        "description": "The smoke is very colorful.",
        "status": "open",
        "priority": "high",
        "type": "incident",
        "requester_id": 20978392,
        "assignee_id": 235323,
        "tags": ["enterprise", "other_tag"],
        "created_at": "2019-09-25T21:45:23Z",
        "updated_at": "2019-09-26T12:01:19Z"
    }"#;

    #[test]
    fn test_parse_full_ticket() {
        let ticket: Ticket = serde_json::from_str(TICKET_JSON).unwrap();

        assert_eq!(ticket.id, 35436);
        assert_eq!(ticket.subject_display(), "Help, my printer is on fire!");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, Some(TicketPriority::High));
        assert_eq!(ticket.ticket_type, Some(TicketType::Incident));
        assert_eq!(ticket.tags, vec!["enterprise", "other_tag"]);
        assert!(ticket.created_at.is_some());
    }

    #[test]
    fn test_parse_sparse_ticket() {
        // Only id and status are guaranteed; everything else is optional.
        let ticket: Ticket = serde_json::from_str(r#"{"id": 7, "status": "new"}"#).unwrap();

        assert_eq!(ticket.id, 7);
        assert_eq!(ticket.subject_display(), "(no subject)");
        assert_eq!(ticket.type_display(), "Ticket");
        assert_eq!(ticket.priority_display(), "-");
        assert!(ticket.tags.is_empty());
    }

    #[test]
    fn test_unknown_enum_values_do_not_fail() {
        let ticket: Ticket = serde_json::from_str(
            r#"{"id": 8, "status": "escalated", "priority": "sev1", "type": "outage"}"#,
        )
        .unwrap();

        assert_eq!(
            ticket.status,
            TicketStatus::Other("escalated".to_string())
        );
        assert_eq!(ticket.status.display_name(), "escalated");
        assert_eq!(ticket.priority_display(), "sev1");
        assert_eq!(ticket.type_display(), "outage");
    }

    #[test]
    fn test_parse_ticket_page() {
        let page: TicketPage = serde_json::from_str(&format!(
            r#"{{
                "tickets": [{TICKET_JSON}],
                "next_page": "https://acme.zendesk.com/api/v2/tickets.json?page=2",
                "previous_page": null,
                "count": 101
            }}"#
        ))
        .unwrap();

        assert_eq!(page.tickets.len(), 1);
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://acme.zendesk.com/api/v2/tickets.json?page=2")
        );
        assert_eq!(page.count, Some(101));
    }

    #[test]
    fn test_parse_last_page_has_no_next() {
        let page: TicketPage =
            serde_json::from_str(r#"{"tickets": [], "next_page": null, "count": 0}"#).unwrap();

        assert!(page.tickets.is_empty());
        assert!(page.next_page.is_none());
    }

    #[test]
    fn test_parse_ticket_envelope() {
        let envelope: TicketEnvelope =
            serde_json::from_str(&format!(r#"{{"ticket": {TICKET_JSON}}}"#)).unwrap();
        assert_eq!(envelope.ticket.id, 35436);
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("OPEN".parse::<TicketStatus>().unwrap(), TicketStatus::Open);
        assert_eq!(
            "Urgent".parse::<TicketPriority>().unwrap(),
            TicketPriority::Urgent
        );
    }
}
