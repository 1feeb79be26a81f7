//! README generation
//!
//! Every archive carries a `README.md` at its root describing what it
//! contains, how many items made it in and when it was built.

use chrono::NaiveDate;

/// Date format used in the generated README, e.g. `January 02, 2006`
pub const README_DATE_FORMAT: &str = "%B %d, %Y";

/// Inputs of the generated README
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadmeData {
    /// Number of archived items
    pub archived: u64,

    /// Number of items listed in `failed.json`
    pub failed: u64,

    /// Day the archive was generated
    pub generated_on: NaiveDate,
}

/// Formats the archive README as markdown
pub fn format_readme(data: &ReadmeData) -> String {
    let mut md = String::new();

    md.push_str("# Clonk Content Archive\n\n");
    md.push_str(
        "This archive contains every item listed on [ccan.de](https://ccan.de) \
         and every item of the [Clonk-Center archive](https://cc-archive.lwrl.de), \
         together with a few freeware keys and engine builds that neither site lists.\n\n",
    );

    md.push_str("## Contents\n\n");
    md.push_str(&format!("- **Items**: {}\n", data.archived));
    md.push_str(&format!(
        "- **Generated**: {}\n",
        data.generated_on.format(README_DATE_FORMAT)
    ));
    if data.failed > 0 {
        md.push_str(&format!(
            "- **Failed**: {} (see `failed.json`)\n",
            data.failed
        ));
    }
    md.push('\n');

    md.push_str("## Layout\n\n");
    md.push_str("Files are stored as `<source>/<author>/<name>.<extension>`, where `<source>` is `CCAN` or `Clonk-Center`.\n");
    md.push_str("Next to every file is a `.json` file with the same name holding the metadata the catalog listed for it ");
    md.push_str("(name, author, engine, download count, date and, where available, category, votes and description).\n\n");
    md.push_str("Characters that are not safe in file names have been removed from authors and names; ");
    md.push_str("the metadata files keep the original spelling.\n");

    if data.failed > 0 {
        md.push_str("\n## Failures\n\n");
        md.push_str("Items that could not be downloaded are listed in `failed.json` with the error that occurred ");
        md.push_str("and the metadata of the item, so they can be retrieved by hand.\n");
    }

    md
}
