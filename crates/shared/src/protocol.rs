use serde::{Deserialize, Serialize};

use crate::domain::{ArtworkId, ArtworkRecord};

/// Body of `GET <base>?page=<p>&limit=<n>`.
///
/// Only `data` is required; fields the upstream adds beyond these are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkListResponse {
    pub data: Vec<ArtworkPayload>,
    #[serde(default)]
    pub pagination: Option<PaginationPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkPayload {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl ArtworkPayload {
    pub fn into_record(self) -> ArtworkRecord {
        ArtworkRecord {
            id: ArtworkId(self.id),
            title: self.title.unwrap_or_default(),
            place_of_origin: self.place_of_origin.unwrap_or_default(),
            artist_display: self.artist_display.unwrap_or_default(),
            inscriptions: self.inscriptions.unwrap_or_default(),
            date_start: self.date_start,
            date_end: self.date_end,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationPayload {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One normalized page of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub records: Vec<ArtworkRecord>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total: u64,
}

impl PageResult {
    pub fn ids(&self) -> Vec<ArtworkId> {
        self.records.iter().map(|record| record.id).collect()
    }
}
