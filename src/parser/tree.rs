use scraper::ElementRef;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::markers::{self, Marker};

/// A bookmark as it appears in the export. `date_added` stays a string;
/// nothing in the pipeline interprets it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub date_added: Option<String>,
}

/// One child of a category, in document order.
#[derive(Debug, Clone)]
pub enum Entry {
    Link(Link),
    Folder(Category),
}

/// A bookmark folder and everything under it. Children keep document
/// order in a single sequence so the renderer can interleave folders
/// and links exactly as the export wrote them.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Category {
    /// Links directly under this category, in document order.
    pub fn links(&self) -> impl DoubleEndedIterator<Item = &Link> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Link(link) => Some(link),
            Entry::Folder(_) => None,
        })
    }

    /// Child categories, in document order.
    pub fn subcategories(&self) -> impl DoubleEndedIterator<Item = &Category> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Folder(cat) => Some(cat),
            Entry::Link(_) => None,
        })
    }
}

// Serialized as `{name, links, subcategories}`, the shape downstream
// consumers of the category collection read.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Category", 3)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("links", &self.links().collect::<Vec<_>>())?;
        s.serialize_field("subcategories", &self.subcategories().collect::<Vec<_>>())?;
        s.end()
    }
}

/// Build the top-level category collection from the root list. Links
/// sitting directly in the root list have no owning folder and are
/// dropped.
pub fn build(root: ElementRef<'_>) -> Vec<Category> {
    walk_list(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Entry::Folder(cat) => Some(cat),
            Entry::Link(link) => {
                debug!(url = %link.url, "dropping link outside any folder");
                None
            }
        })
        .collect()
}

/// Walk one list's direct `dt` children in document order. A folder
/// item recurses into its nested list; the built children come back to
/// this call, so the parent never has to be re-found by name afterwards.
fn walk_list(list: ElementRef<'_>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for item in list.children().filter_map(ElementRef::wrap) {
        if item.value().name() != "dt" {
            continue;
        }
        match markers::classify(item) {
            Some(Marker::Folder { name, contents }) => {
                entries.push(Entry::Folder(Category {
                    name,
                    entries: walk_list(contents),
                }));
            }
            Some(Marker::Link(link)) => entries.push(Entry::Link(link)),
            None => debug!("skipping unrecognized list item"),
        }
    }
    entries
}

// ── Tests ──
