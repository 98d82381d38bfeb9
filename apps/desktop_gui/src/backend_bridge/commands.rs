//! Backend commands queued from UI to backend worker.

use client_core::PageTicket;

#[derive(Debug, Clone, Copy)]
pub enum BackendCommand {
    /// Fetch the page named by the ticket; the reply carries the same ticket.
    FetchPage { ticket: PageTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchPage { .. } => "fetch_page",
        }
    }
}
