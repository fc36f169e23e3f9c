use serde::Serialize;

use crate::parser::tree::{Category, Link};

/// First category named `name`, searching depth-first in document
/// order. Duplicate names shadow each other: only the first match in
/// document order is ever returned.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find_map(|cat| find_in(cat, name))
}

fn find_in<'a>(cat: &'a Category, name: &str) -> Option<&'a Category> {
    if cat.name == name {
        return Some(cat);
    }
    cat.subcategories().find_map(|sub| find_in(sub, name))
}

/// Lazy pre-order traversal yielding every category with its nesting
/// depth: 0 for top-level, parent depth + 1 below.
pub fn flatten(categories: &[Category]) -> Flatten<'_> {
    Flatten {
        stack: categories.iter().rev().map(|cat| (cat, 0)).collect(),
    }
}

pub struct Flatten<'a> {
    stack: Vec<(&'a Category, usize)>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (&'a Category, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (cat, depth) = self.stack.pop()?;
        // Reverse push so the first subcategory pops next.
        for sub in cat.subcategories().rev() {
            self.stack.push((sub, depth + 1));
        }
        Some((cat, depth))
    }
}

/// A search match: the link, its owning category, and the breadcrumb
/// path of category names from the root down to the owner.
#[derive(Debug, Serialize)]
pub struct Hit<'a> {
    pub link: &'a Link,
    pub category: &'a str,
    pub path: Vec<&'a str>,
}

/// Case-insensitive substring search over every link's title and URL,
/// pre-order across the whole tree. The empty query matches every
/// link. No ranking, no deduplication.
pub fn search<'a>(categories: &'a [Category], query: &str) -> Vec<Hit<'a>> {
    let needle = query.to_lowercase();
    let mut hits = Vec::new();
    let mut path = Vec::new();
    for cat in categories {
        search_in(cat, &needle, &mut path, &mut hits);
    }
    hits
}

fn search_in<'a>(
    cat: &'a Category,
    needle: &str,
    path: &mut Vec<&'a str>,
    hits: &mut Vec<Hit<'a>>,
) {
    path.push(cat.name.as_str());
    for link in cat.links() {
        if link.title.to_lowercase().contains(needle) || link.url.to_lowercase().contains(needle) {
            hits.push(Hit {
                link,
                category: cat.name.as_str(),
                path: path.clone(),
            });
        }
    }
    for sub in cat.subcategories() {
        search_in(sub, needle, path, hits);
    }
    path.pop();
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tree::{Entry, Link};

    fn link(title: &str, url: &str) -> Entry {
        Entry::Link(Link {
            title: title.to_string(),
            url: url.to_string(),
            icon: None,
            date_added: None,
        })
    }

    fn folder(name: &str, entries: Vec<Entry>) -> Category {
        Category {
            name: name.to_string(),
            entries,
        }
    }

    fn sample() -> Vec<Category> {
        vec![
            folder(
                "KVM Systems",
                vec![
                    link("Main KVM", "http://kvm-main.local/admin"),
                    Entry::Folder(folder(
                        "Spare",
                        vec![link("Spare KVM", "http://kvm-spare.local/")],
                    )),
                ],
            ),
            folder(
                "Network",
                vec![
                    link("Core Switch", "http://core-sw-01.local/"),
                    Entry::Folder(folder(
                        "Edge",
                        vec![link("Edge Switch", "http://edge-sw-07.local/")],
                    )),
                ],
            ),
        ]
    }

    #[test]
    fn find_category_walks_pre_order() {
        let cats = sample();
        assert_eq!(find_category(&cats, "Edge").unwrap().name, "Edge");
        assert_eq!(find_category(&cats, "Network").unwrap().links().count(), 1);
        assert!(find_category(&cats, "Missing").is_none());
    }

    #[test]
    fn find_category_returns_first_duplicate() {
        let cats = vec![
            folder(
                "A",
                vec![Entry::Folder(folder("Shared", vec![link("first", "http://1/")]))],
            ),
            folder(
                "B",
                vec![Entry::Folder(folder("Shared", vec![link("second", "http://2/")]))],
            ),
        ];
        let found = find_category(&cats, "Shared").unwrap();
        assert_eq!(found.links().next().unwrap().url, "http://1/");
    }

    #[test]
    fn flatten_depths_match_nesting() {
        let got: Vec<(String, usize)> = flatten(&sample())
            .map(|(cat, depth)| (cat.name.clone(), depth))
            .collect();
        assert_eq!(
            got,
            [
                ("KVM Systems".to_string(), 0),
                ("Spare".to_string(), 1),
                ("Network".to_string(), 0),
                ("Edge".to_string(), 1),
            ]
        );
    }

    #[test]
    fn flatten_is_lazy() {
        let cats = sample();
        let mut iter = flatten(&cats);
        assert_eq!(iter.next().unwrap().0.name, "KVM Systems");
        // Remaining items still pending; nothing was precomputed.
        assert_eq!(iter.count(), 3);
    }

    #[test]
    fn search_matches_title_and_url_case_insensitively() {
        let cats = sample();
        let by_title = search(&cats, "kvm");
        assert_eq!(by_title.len(), 2);
        let by_url = search(&cats, "EDGE-SW");
        assert_eq!(by_url.len(), 1);
        assert_eq!(by_url[0].link.title, "Edge Switch");
    }

    #[test]
    fn search_reports_breadcrumb_paths() {
        let cats = sample();
        let hits = search(&cats, "spare");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, "Spare");
        assert_eq!(hits[0].path, ["KVM Systems", "Spare"]);
    }

    #[test]
    fn empty_query_matches_every_link() {
        let cats = sample();
        assert_eq!(search(&cats, "").len(), 4);
    }

    #[test]
    fn search_order_follows_the_walk() {
        let cats = sample();
        let titles: Vec<&str> = search(&cats, "").iter().map(|h| h.link.title.as_str()).collect();
        assert_eq!(titles, ["Main KVM", "Spare KVM", "Core Switch", "Edge Switch"]);
    }
}
