use crate::record::Archivable;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An entry of the ccan.de listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcanItem {
    pub name: String,

    /// Publication time as shown in the listing (site-local, no zone)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,

    #[serde(default)]
    pub download_count: u64,

    pub author: String,

    #[serde(default)]
    pub votes: u64,

    pub category: String,

    pub engine: String,

    pub download_link: String,
}

impl CcanItem {
    /// Tag used as the top-level directory in the archive
    pub const SOURCE_NAME: &'static str = "CCAN";

    /// Returns true if every required field is non-empty
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.author.is_empty()
            && !self.category.is_empty()
            && !self.engine.is_empty()
            && !self.download_link.is_empty()
    }
}

impl Archivable for CcanItem {
    fn download_link(&self) -> &str {
        &self.download_link
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn source_name(&self) -> &'static str {
        Self::SOURCE_NAME
    }
}
