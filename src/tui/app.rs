use crate::zendesk::{Ticket, TicketPage};

/// How close the selection may get to the end of the cached list before the
/// next page is requested.
const PREFETCH_MARGIN: usize = 25;

/// State of the background page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// No fetch in flight; more pages may exist.
    Idle,
    Loading,
    /// The last page reported no successor.
    Exhausted,
    Error(String),
}

/// Application state. Pure data and arithmetic; all I/O lives in the event
/// loop so this can be unit tested.
pub struct App {
    pub tickets: Vec<Ticket>,
    pub selected_index: usize,
    pub page_status: PageStatus,
    /// Absolute URL of the next page to fetch, once known.
    pub next_page: Option<String>,
    /// Server-reported total ticket count, once known.
    pub total_count: Option<u64>,
    pub should_quit: bool,
    pub scroll_offset: u16,
    pub content_height: u16, // Total height of detail content for scroll bounds
    subdomain: String,
}

impl App {
    pub fn new(subdomain: String) -> Self {
        Self {
            tickets: Vec::new(),
            selected_index: 0,
            page_status: PageStatus::Idle,
            next_page: None,
            total_count: None,
            should_quit: false,
            scroll_offset: 0,
            content_height: 0,
            subdomain,
        }
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.tickets.get(self.selected_index)
    }

    pub fn next(&mut self) {
        if self.selected_index + 1 < self.tickets.len() {
            self.selected_index += 1;
            self.scroll_offset = 0; // Reset detail scroll when changing ticket
        }
    }

    pub fn previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.scroll_offset = 0;
        }
    }

    /// Move the selection by a page worth of rows, clamped to the cache.
    pub fn jump_down(&mut self, rows: usize) {
        if !self.tickets.is_empty() {
            self.selected_index = (self.selected_index + rows).min(self.tickets.len() - 1);
            self.scroll_offset = 0;
        }
    }

    pub fn jump_up(&mut self, rows: usize) {
        self.selected_index = self.selected_index.saturating_sub(rows);
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self, amount: u16, visible_height: u16) {
        let max_scroll = self.content_height.saturating_sub(visible_height);
        self.scroll_offset = (self.scroll_offset + amount).min(max_scroll);
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn set_content_height(&mut self, height: u16) {
        self.content_height = height;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Whether the event loop should kick off a page fetch: nothing in
    /// flight, more pages may exist, and the selection is close enough to
    /// the end of the cache.
    pub fn needs_fetch(&self) -> bool {
        if self.page_status != PageStatus::Idle {
            return false;
        }
        self.tickets.is_empty() || self.selected_index + PREFETCH_MARGIN >= self.tickets.len()
    }

    /// Absorb a fetched page into the cache.
    pub fn append_page(&mut self, page: TicketPage) {
        self.tickets.extend(page.tickets);
        self.total_count = page.count.or(self.total_count);
        self.next_page = page.next_page;
        self.page_status = if self.next_page.is_some() {
            PageStatus::Idle
        } else {
            PageStatus::Exhausted
        };
    }

    pub fn set_page_loading(&mut self) {
        self.page_status = PageStatus::Loading;
    }

    pub fn set_page_error(&mut self, error: String) {
        self.page_status = PageStatus::Error(error);
    }

    /// Drop the cache and refetch from the first page.
    pub fn reset(&mut self) {
        self.tickets.clear();
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.next_page = None;
        self.total_count = None;
        self.page_status = PageStatus::Idle;
    }

    /// Browser URL of the selected ticket in the agent workspace.
    pub fn selected_agent_url(&self) -> Option<String> {
        self.selected_ticket()
            .map(|t| format!("https://{}.zendesk.com/agent/tickets/{}", self.subdomain, t.id))
    }
}
