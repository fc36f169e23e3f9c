pub mod markers;
pub mod tree;

use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::debug;

use markers::{DL_SEL, H3_SEL};
use tree::Category;

/// Marker phrase identifying the root folder heading in a stock export.
pub const DEFAULT_ROOT_LABEL: &str = "Bookmarks bar";

/// Fatal parse failures. Malformation of individual list items is not
/// fatal; those items are skipped and the walk continues.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no folder heading contains the root marker {0:?}")]
    RootNotFound(String),
    #[error("root folder heading has no bookmark list")]
    MalformedDocument,
}

/// Parse a bookmark export into its top-level categories.
///
/// The root folder is the first heading whose text contains
/// `root_label`; traversal starts at that heading's nested list and
/// never leaves it, so folders outside the root are not part of the
/// result.
pub fn parse_document(html: &str, root_label: &str) -> Result<Vec<Category>, ParseError> {
    let doc = Html::parse_document(html);

    let heading = doc
        .select(&H3_SEL)
        .find(|h3| markers::trimmed_text(*h3).contains(root_label))
        .ok_or_else(|| ParseError::RootNotFound(root_label.to_string()))?;

    // The export leaves `dt` elements unclosed, so the folder's list
    // ends up nested inside the same item as its heading.
    let root_list = heading
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|item| item.select(&DL_SEL).next())
        .ok_or(ParseError::MalformedDocument)?;

    let categories = tree::build(root_list);
    debug!(categories = categories.len(), "parsed bookmark document");
    Ok(categories)
}

// ── Tests ──
