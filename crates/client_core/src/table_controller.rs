//! Paginated view state plus the cross-page selection it is reconciled with.

use shared::{
    domain::{ArtworkId, ArtworkRecord},
    protocol::PageResult,
};
use tracing::{debug, error, info, warn};

use crate::{selection::SelectionSet, ArtworkSource, ArtworkSourceError};

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Issued when a page transition begins. Only the most recently issued ticket
/// may complete a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub token: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug)]
pub enum PageOutcome {
    Applied,
    Failed(ArtworkSourceError),
    /// A newer transition was started before this one completed.
    Stale,
}

impl PageOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Inputs for a page navigator widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatorState {
    pub first_index: u64,
    pub page_size: u32,
    pub total_records: u64,
}

impl PaginatorState {
    pub fn page_count(&self) -> u32 {
        let pages = self.total_records.div_ceil(u64::from(self.page_size.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// Zero-based index of the page starting at `first_index`.
    pub fn page_index(&self) -> u32 {
        let index = self.first_index / u64::from(self.page_size.max(1));
        u32::try_from(index).unwrap_or(u32::MAX)
    }
}

pub struct TableController {
    page_size: u32,
    current_page: u32,
    rows: Vec<ArtworkRecord>,
    total_records: u64,
    loading: bool,
    selection: SelectionSet,
    latest_token: u64,
}

impl Default for TableController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableController {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            rows: Vec::new(),
            total_records: 0,
            loading: false,
            selection: SelectionSet::new(),
            latest_token: 0,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn rows(&self) -> &[ArtworkRecord] {
        &self.rows
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn begin_page_transition(&mut self, page: u32) -> PageTicket {
        self.latest_token += 1;
        self.current_page = page.max(1);
        self.loading = true;
        let ticket = PageTicket {
            token: self.latest_token,
            page: self.current_page,
            page_size: self.page_size,
        };
        debug!(token = ticket.token, page = ticket.page, "page transition started");
        ticket
    }

    /// Navigator callback; `page_index` is zero-based.
    pub fn on_page_change(&mut self, page_index: u32) -> PageTicket {
        self.begin_page_transition(page_index.saturating_add(1))
    }

    pub fn complete_page_transition(
        &mut self,
        ticket: PageTicket,
        result: Result<PageResult, ArtworkSourceError>,
    ) -> PageOutcome {
        if ticket.token != self.latest_token {
            match &result {
                Ok(_) => warn!(
                    token = ticket.token,
                    latest = self.latest_token,
                    page = ticket.page,
                    "dropping stale page response"
                ),
                Err(err) => warn!(
                    token = ticket.token,
                    latest = self.latest_token,
                    page = ticket.page,
                    "dropping stale page failure: {err}"
                ),
            }
            return PageOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.rows = page.records;
                self.total_records = page.total;
                info!(
                    page = ticket.page,
                    rows = self.rows.len(),
                    total = self.total_records,
                    selected_on_page = self.visible_selected_ids().len(),
                    "page loaded"
                );
                PageOutcome::Applied
            }
            Err(err) => {
                self.rows.clear();
                error!(page = ticket.page, "failed to load artwork page: {err}");
                PageOutcome::Failed(err)
            }
        }
    }

    /// Ends a transition whose fetch was never issued. Rows are left as they
    /// were; stale tickets are ignored.
    pub fn abandon_page_transition(&mut self, ticket: PageTicket) {
        if ticket.token == self.latest_token {
            self.loading = false;
        }
    }

    pub async fn load_page(&mut self, source: &dyn ArtworkSource, page: u32) -> PageOutcome {
        let ticket = self.begin_page_transition(page);
        let result = source.fetch_page(ticket.page, ticket.page_size).await;
        self.complete_page_transition(ticket, result)
    }

    pub fn toggle_row(&mut self, id: ArtworkId, checked: bool) {
        if checked {
            self.selection.insert(id);
        } else {
            self.selection.remove(id);
        }
    }

    /// Header checkbox: applies `checked` to every row on the current page.
    pub fn toggle_page(&mut self, checked: bool) {
        for record in &self.rows {
            if checked {
                self.selection.insert(record.id);
            } else {
                self.selection.remove(record.id);
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.selection.clear();
    }

    pub fn deselect(&mut self, id: ArtworkId) {
        self.selection.remove(id);
    }

    pub fn is_row_selected(&self, id: ArtworkId) -> bool {
        self.selection.contains(id)
    }

    /// Selected ids among the loaded rows, in row order.
    pub fn visible_selected_ids(&self) -> Vec<ArtworkId> {
        self.rows
            .iter()
            .map(|record| record.id)
            .filter(|id| self.selection.contains(*id))
            .collect()
    }

    pub fn all_on_page_selected(&self) -> bool {
        !self.rows.is_empty()
            && self
                .rows
                .iter()
                .all(|record| self.selection.contains(record.id))
    }

    /// Every selected id across all pages, in insertion order.
    pub fn selected_ids(&self) -> Vec<ArtworkId> {
        self.selection.to_vec()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn paginator(&self) -> PaginatorState {
        PaginatorState {
            first_index: u64::from(self.current_page - 1) * u64::from(self.page_size),
            page_size: self.page_size,
            total_records: self.total_records,
        }
    }
}

#[cfg(test)]
#[path = "tests/table_controller_tests.rs"]
mod tests;
