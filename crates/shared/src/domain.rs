use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ArtworkId);

/// Display snapshot of one catalog entry.
///
/// Text fields are never null: anything the upstream omits arrives here as an
/// empty string. Dates stay optional so "unknown" is distinguishable from a
/// real year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub id: ArtworkId,
    pub title: String,
    pub place_of_origin: String,
    pub artist_display: String,
    pub inscriptions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<i32>,
}

impl ArtworkRecord {
    pub fn new(id: ArtworkId) -> Self {
        Self {
            id,
            title: String::new(),
            place_of_origin: String::new(),
            artist_display: String::new(),
            inscriptions: String::new(),
            date_start: None,
            date_end: None,
        }
    }

    /// Text for the "Date Range" column.
    pub fn date_range_label(&self) -> String {
        match (self.date_start, self.date_end) {
            (None, None) => String::new(),
            (Some(start), Some(end)) if start == end => start.to_string(),
            (start, end) => format!(
                "{} — {}",
                start.map(|year| year.to_string()).unwrap_or_default(),
                end.map(|year| year.to_string()).unwrap_or_default()
            ),
        }
    }
}
