use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::tree::Link;

pub(super) static H3_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
pub(super) static DL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dl").unwrap());
static A_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// The two list-item shapes the walk recognizes. A folder is a heading
/// plus its nested list; a link is an anchor with an `href`.
#[derive(Debug)]
pub enum Marker<'a> {
    Folder {
        name: String,
        contents: ElementRef<'a>,
    },
    Link(Link),
}

/// Classify one `dt` list item. Returns `None` for malformed items —
/// a heading with no nested list, an anchor with no `href`, or neither
/// shape — which the walk skips without raising an error.
pub fn classify(item: ElementRef<'_>) -> Option<Marker<'_>> {
    if let Some(heading) = item.select(&H3_SEL).next() {
        let contents = item.select(&DL_SEL).next()?;
        return Some(Marker::Folder {
            name: trimmed_text(heading),
            contents,
        });
    }

    let anchor = item.select(&A_SEL).next()?;
    let url = anchor.value().attr("href")?.to_string();
    Some(Marker::Link(Link {
        title: trimmed_text(anchor),
        url,
        // The parser lowercases the export's ICON / ADD_DATE attributes.
        icon: anchor.value().attr("icon").map(str::to_string),
        date_added: anchor.value().attr("add_date").map(str::to_string),
    }))
}

/// Concatenated descendant text, trimmed.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──
