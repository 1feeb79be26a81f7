use crate::record::Archivable;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An item of the Clonk-Center archive, read from its detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClonkCenterItem {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,

    pub author: String,

    #[serde(default)]
    pub posted_by: String,

    #[serde(default)]
    pub download_count: u64,

    pub engine: String,

    pub download_link: String,

    /// Item description, converted to Markdown when possible
    #[serde(default)]
    pub description: String,
}

impl ClonkCenterItem {
    /// Tag used as the top-level directory in the archive
    pub const SOURCE_NAME: &'static str = "Clonk-Center";

    /// Returns true if every required field is non-empty
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.author.is_empty()
            && !self.engine.is_empty()
            && !self.download_link.is_empty()
    }
}

impl Archivable for ClonkCenterItem {
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
