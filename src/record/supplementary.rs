//! Hand-curated items that the ccan.de listing does not carry
//!
//! The listing only links the German Windows builds of the classic games.
//! Freeware keys and the US, Linux and Mac builds live on clonkx.de and are
//! added here so they end up next to the listed engines in the archive.
//! Dates are estimates taken from the published year or the server's
//! Last-Modified header.

use crate::record::CcanItem;
use chrono::{NaiveDate, NaiveDateTime};

const AUTHOR: &str = "Redwolf Design";

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)
}

fn item(
    name: &str,
    date: Option<NaiveDateTime>,
    category: &str,
    engine: &str,
    download_link: &str,
) -> CcanItem {
    CcanItem {
        name: name.to_string(),
        date,
        download_count: 1,
        author: AUTHOR.to_string(),
        votes: 0,
        category: category.to_string(),
        engine: engine.to_string(),
        download_link: download_link.to_string(),
    }
}

/// Returns the curated supplementary items in their fixed emission order
pub fn supplementary_items() -> Vec<CcanItem> {
    vec![
        // Copy next to clonk.exe to unlock Clonk Endeavour
        item(
            "Freeware",
            at(2004, 1, 1, 0, 0, 0),
            "Key",
            "CE",
            "http://www.clonkx.de/endeavour/Freeware.c4k",
        ),
        item(
            "Clonk Planet US",
            at(2000, 1, 1, 0, 0, 0),
            "Engine",
            "CP",
            "http://www.clonkx.de/planet/cp465us_free.exe",
        ),
        item(
            "Freeware Key Clonk Planet DE",
            at(2000, 1, 1, 0, 0, 0),
            "Key",
            "CP",
            "http://www.clonkx.de/planet/cp_freeware_de.txt",
        ),
        item(
            "Freeware Key Clonk Planet US",
            at(2000, 1, 1, 0, 0, 0),
            "Key",
            "CP",
            "http://www.clonkx.de/planet/cp_freeware_us.txt",
        ),
        item(
            "Clonk Rage Linux",
            at(2014, 5, 4, 23, 25, 52),
            "Engine",
            "CR",
            "http://www.clonkx.de/rage/cr_full_linux.tar.bz2",
        ),
        item(
            "Clonk Rage Mac",
            at(2014, 5, 4, 23, 27, 0),
            "Engine",
            "CR",
            "http://www.clonkx.de/rage/cr_full_mac.zip",
        ),
        item(
            "Clonk 3 Radikal US",
            at(1996, 1, 1, 0, 0, 0),
            "Engine",
            "C3",
            "http://www.clonkx.de/classics/clonk34us.zip",
        ),
        // The German Clonk 4 entry on the listing is called "Clonk.zip"
        item(
            "Clonk US",
            at(1996, 1, 1, 0, 0, 0),
            "Engine",
            "C4.25",
            "http://www.clonkx.de/classics/clonk407us.zip",
        ),
    ]
}
