use std::sync::LazyLock;

use regex::Regex;

use crate::classify;
use crate::parser::tree::{Category, Entry, Link};

static WS_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const TITLE: &str = "# Engineering Systems";
const PROVENANCE: &str =
    "_This file is automatically generated from the bookmarks export. Do not edit directly._";

/// Anchor slug for a category heading: lowercased, each whitespace run
/// collapsed to a single hyphen. Punctuation is left as-is.
pub fn slug(name: &str) -> String {
    WS_RUN.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// Render the category tree as one markdown document: fixed preamble,
/// table of contents over the top-level categories, then the body with
/// folders and links interleaved in document order.
pub fn to_markdown(categories: &[Category]) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push_str("\n\n");
    out.push_str(PROVENANCE);
    out.push_str("\n\n");
    out.push_str("## Table of Contents\n\n");
    for cat in categories {
        out.push_str(&format!("- [{}](#{})\n", cat.name, slug(&cat.name)));
    }
    out.push_str("\n---\n\n");

    for cat in categories {
        render_category(cat, 1, &mut out);
    }
    out
}

fn render_category(cat: &Category, level: usize, out: &mut String) {
    out.push_str(&format!("{} {}\n\n", "#".repeat(level), cat.name));
    for entry in &cat.entries {
        match entry {
            Entry::Folder(sub) => render_category(sub, level + 1, out),
            Entry::Link(link) => render_link(link, level + 1, &cat.name, out),
        }
    }
}

fn render_link(link: &Link, level: usize, category: &str, out: &mut String) {
    let (kind, priority) = classify::classify(&link.url, &link.title);
    out.push_str(&format!(
        "{} [{}]({})\n",
        "#".repeat(level),
        link.title,
        link.url
    ));
    out.push_str(&format!(
        "- **IP/Hostname:** {}\n",
        classify::hostname(&link.url)
    ));
    out.push_str(&format!("- **Type:** {}\n", kind));
    out.push_str(&format!("- **Priority:** {}\n", priority));
    out.push_str(&format!("- **Category:** {}\n\n", category));
}

// ── Tests ──
