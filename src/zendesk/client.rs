use super::ticket::{Ticket, TicketEnvelope, TicketPage};
use crate::config::Credentials;
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

#[derive(Clone)]
pub struct ZendeskClient {
    client: Client,
    base_url: String,
    email: String,
    password: String,
}

impl ZendeskClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = format!(
            "https://{}.zendesk.com/api/v2",
            credentials.subdomain.trim_end_matches('/')
        );

        Ok(Self {
            client,
            base_url,
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        })
    }

    fn tickets_url(&self, page: u32) -> String {
        format!("{}/tickets.json?page={}", self.base_url, page)
    }

    fn ticket_url(&self, id: u64) -> String {
        format!("{}/tickets/{}.json", self.base_url, id)
    }

    /// Fetch one page of the account's tickets.
    pub async fn list_tickets(&self, page: u32) -> Result<TicketPage> {
        self.fetch_page(&self.tickets_url(page)).await
    }

    /// Fetch a page by the absolute `next_page` URL of a previous page.
    pub async fn fetch_page(&self, url: &str) -> Result<TicketPage> {
        debug!(url, "fetching ticket page");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.email, Some(&self.password))
            .send()
            .await
            .context("Failed to send request to Zendesk")?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.extract_api_error(response).await);
        }

        let page: TicketPage = response
            .json()
            .await
            .context("Failed to parse ticket list response")?;

        debug!(
            tickets = page.tickets.len(),
            has_next = page.next_page.is_some(),
            "page fetched"
        );

        Ok(page)
    }

    /// Fetch every ticket on the account, following `next_page` links.
    /// `page_limit` caps the number of pages on large accounts; a limit of
    /// zero fetches nothing.
    pub async fn fetch_all_tickets(&self, page_limit: Option<u32>) -> Result<Vec<Ticket>> {
        let mut tickets = Vec::new();
        let mut url = self.tickets_url(1);
        let mut pages_fetched = 0u32;

        while within_page_limit(page_limit, pages_fetched) {
            let page = self.fetch_page(&url).await?;
            tickets.extend(page.tickets);
            pages_fetched += 1;

            match page.next_page {
                Some(next) => url = next,
                None => break,
            }
        }

        if !within_page_limit(page_limit, pages_fetched) {
            debug!(pages_fetched, "page limit reached");
        }

        Ok(tickets)
    }

    pub async fn get_ticket(&self, id: u64) -> Result<Ticket> {
        let url = self.ticket_url(id);
        debug!(url = %url, id, "fetching ticket");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.email, Some(&self.password))
            .send()
            .await
            .context("Failed to send request to Zendesk")?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow::anyhow!("Ticket #{} not found", id));
        }
        if !status.is_success() {
            return Err(self.extract_api_error(response).await);
        }

        let envelope: TicketEnvelope = response
            .json()
            .await
            .context("Failed to parse ticket response")?;

        Ok(envelope.ticket)
    }

    async fn extract_api_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return anyhow::anyhow!(
                "Authentication failed (Status {}). Check your subdomain, email and password.",
                status.as_u16()
            );
        }

        let body = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                return anyhow::anyhow!("Zendesk API error ({}): failed to read body: {}", status, e);
            }
        };

        anyhow::anyhow!("{}", api_error_message(status, &body))
    }
}

/// Whether another page may be fetched under the page cap. Checked before
/// each fetch so `--page-limit 0` performs no requests at all.
fn within_page_limit(limit: Option<u32>, pages_fetched: u32) -> bool {
    match limit {
        Some(limit) => pages_fetched < limit,
        None => true,
    }
}

/// Pull a clean message out of a Zendesk JSON error body, falling back to the
/// status code. Bodies look like `{"error": "..."}` or
/// `{"error": {"title": "..."}, "description": "..."}`.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            if let Some(description) = json.get("description").and_then(|d| d.as_str()) {
                return Some(description.to_string());
            }
            match json.get("error") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(obj) => obj
                    .get("title")
                    .and_then(|t| t.as_str())
                    .map(|s| s.to_string()),
                None => None,
            }
        })
        .unwrap_or_else(|| format!("Zendesk API error ({})", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ZendeskClient {
        ZendeskClient::new(&Credentials {
            subdomain: "acme".to_string(),
            email: "agent@acme.test".to_string(),
            password: "secret".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_url_construction() {
        let client = test_client();

        assert_eq!(
            client.tickets_url(1),
            "https://acme.zendesk.com/api/v2/tickets.json?page=1"
        );
        assert_eq!(
            client.tickets_url(3),
            "https://acme.zendesk.com/api/v2/tickets.json?page=3"
        );
        assert_eq!(
            client.ticket_url(35436),
            "https://acme.zendesk.com/api/v2/tickets/35436.json"
        );
    }

    #[test]
    fn test_page_limit_zero_allows_no_fetches() {
        assert!(!within_page_limit(Some(0), 0));
    }

    #[test]
    fn test_page_limit_counts_fetched_pages() {
        assert!(within_page_limit(Some(2), 0));
        assert!(within_page_limit(Some(2), 1));
        assert!(!within_page_limit(Some(2), 2));
    }

    #[test]
    fn test_no_page_limit_is_unbounded() {
        assert!(within_page_limit(None, 0));
        assert!(within_page_limit(None, 10_000));
    }

    #[test]
    fn test_api_error_message_from_string_error() {
        let msg = api_error_message(
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error": "RecordInvalid"}"#,
        );
        assert_eq!(msg, "RecordInvalid");
    }

    #[test]
    fn test_api_error_message_prefers_description() {
        let msg = api_error_message(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error": {"title": "Invalid attribute"}, "description": "Page must be an integer"}"#,
        );
        assert_eq!(msg, "Page must be an integer");
    }

    #[test]
    fn test_api_error_message_from_error_title() {
        let msg = api_error_message(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error": {"title": "Invalid attribute"}}"#,
        );
        assert_eq!(msg, "Invalid attribute");
    }

    #[test]
    fn test_api_error_message_falls_back_to_status() {
        let msg = api_error_message(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "not json");
        assert_eq!(msg, "Zendesk API error (500 Internal Server Error)");
    }
}
