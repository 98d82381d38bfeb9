use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ArtworkListResponse, PageResult};
use tracing::debug;
use url::Url;

pub mod config;
pub mod error;
mod selection;
mod table_controller;

pub use config::ClientSettings;
pub use error::ArtworkSourceError;
pub use selection::SelectionSet;
pub use table_controller::{
    PageOutcome, PageTicket, PaginatorState, TableController, DEFAULT_PAGE_SIZE,
};

pub const DEFAULT_API_BASE_URL: &str = "https://api.artic.edu/api/v1/artworks";

/// Paginated listing of artworks.
///
/// Implementations hold no state between calls; every call is an independent
/// request for one page.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    async fn fetch_page(&self, page: u32, page_size: u32)
        -> Result<PageResult, ArtworkSourceError>;
}

pub struct HttpArtworkSource {
    http: Client,
    base_url: Url,
}

impl HttpArtworkSource {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.api_base_url).map_err(|err| {
            anyhow::anyhow!("invalid api base url '{}': {err}", settings.api_base_url)
        })?;
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn page_url(&self, page: u32, page_size: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &page_size.to_string());
        url
    }
}

#[async_trait]
impl ArtworkSource for HttpArtworkSource {
    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResult, ArtworkSourceError> {
        validate_page_request(page, page_size)?;

        let url = self.page_url(page, page_size);
        debug!(%url, "fetching artwork page");
        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ArtworkSourceError::HttpStatus {
                status: status.as_u16(),
            });
        }
        let body = res.bytes().await?;
        let response: ArtworkListResponse = serde_json::from_slice(&body)?;
        normalize_page(response, page, page_size)
    }
}

fn validate_page_request(page: u32, page_size: u32) -> Result<(), ArtworkSourceError> {
    if page == 0 {
        return Err(ArtworkSourceError::InvalidRequest(
            "page numbers start at 1".to_string(),
        ));
    }
    if page_size == 0 {
        return Err(ArtworkSourceError::InvalidRequest(
            "page size must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Applies the display normalization and the pagination fallbacks to one
/// decoded listing response.
pub fn normalize_page(
    response: ArtworkListResponse,
    requested_page: u32,
    page_size: u32,
) -> Result<PageResult, ArtworkSourceError> {
    let mut records = Vec::with_capacity(response.data.len());
    for payload in response.data {
        if payload.id <= 0 {
            return Err(ArtworkSourceError::malformed(format!(
                "artwork id must be positive, got {}",
                payload.id
            )));
        }
        records.push(payload.into_record());
    }

    let pagination = response.pagination.unwrap_or_default();
    let total_pages = pagination.total_pages.unwrap_or(1);
    let total = pagination
        .total
        .unwrap_or(u64::from(total_pages) * u64::from(page_size));

    Ok(PageResult {
        records,
        current_page: pagination.current_page.unwrap_or(requested_page),
        total_pages,
        total,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
