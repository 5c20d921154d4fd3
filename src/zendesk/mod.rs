mod client;
mod ticket;

pub use client::ZendeskClient;
pub use ticket::{Ticket, TicketPage, TicketPriority, TicketStatus, TicketType};
