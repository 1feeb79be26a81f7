//! Record model shared by the crawlers and the archiver
//!
//! Each catalog produces its own item type. The archiver only sees a
//! [`Record`] and talks to it through the [`Archivable`] projection, so it
//! never needs to know which catalog an item came from.

mod ccan;
mod clonk_center;
mod supplementary;

pub use ccan::CcanItem;
pub use clonk_center::ClonkCenterItem;
pub use supplementary::supplementary_items;

use serde::Serialize;

/// Read-only projection every archivable item exposes
pub trait Archivable {
    /// The advertised download link; unique identity of the item
    fn download_link(&self) -> &str;

    /// Author, used as the second path component in the archive
    fn author(&self) -> &str;

    /// Display name, used as the file name in the archive
    fn name(&self) -> &str;

    /// Constant tag of the catalog that produced the item
    fn source_name(&self) -> &'static str;
}

/// A normalized item from any of the crawled catalogs
///
/// Serializes as the plain field set of the wrapped item, which is what ends
/// up in the archive's metadata entries and in `failed.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Ccan(CcanItem),
    ClonkCenter(ClonkCenterItem),
}

impl Record {
    fn inner(&self) -> &dyn Archivable {
        match self {
            Self::Ccan(item) => item,
            Self::ClonkCenter(item) => item,
        }
    }
}

impl Archivable for Record {
    fn download_link(&self) -> &str {
        self.inner().download_link()
    }

    fn author(&self) -> &str {
        self.inner().author()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn source_name(&self) -> &'static str {
        self.inner().source_name()
    }
}

impl From<CcanItem> for Record {
    fn from(item: CcanItem) -> Self {
        Self::Ccan(item)
    }
}

impl From<ClonkCenterItem> for Record {
    fn from(item: ClonkCenterItem) -> Self {
        Self::ClonkCenter(item)
    }
}
