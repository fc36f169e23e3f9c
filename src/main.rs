mod classify;
mod loader;
mod parser;
mod query;
mod render;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use loader::Source;
use parser::tree::Category;

#[derive(Parser)]
#[command(name = "linkdex", about = "Bookmark export parser and markdown converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a bookmark export to a markdown document
    Convert {
        /// Bookmark file path or http(s) URL
        input: String,
        /// Output markdown path
        #[arg(short, long, default_value = "bookmarks.md")]
        output: PathBuf,
        /// Marker phrase identifying the root folder heading
        #[arg(long, default_value = parser::DEFAULT_ROOT_LABEL)]
        root_label: String,
    },
    /// Search link titles and URLs
    Search {
        /// Bookmark file path or http(s) URL
        input: String,
        /// Case-insensitive substring query
        query: String,
        /// Restrict the search to one category's subtree
        #[arg(short, long)]
        category: Option<String>,
        /// Emit matches as JSON instead of a table
        #[arg(long)]
        json: bool,
        #[arg(long, default_value = parser::DEFAULT_ROOT_LABEL)]
        root_label: String,
    },
    /// Print the category tree
    Tree {
        /// Bookmark file path or http(s) URL
        input: String,
        /// Emit the tree as JSON
        #[arg(long)]
        json: bool,
        #[arg(long, default_value = parser::DEFAULT_ROOT_LABEL)]
        root_label: String,
    },
    /// Category and link counts by system type and priority
    Stats {
        /// Bookmark file path or http(s) URL
        input: String,
        #[arg(long, default_value = parser::DEFAULT_ROOT_LABEL)]
        root_label: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            root_label,
        } => {
            let categories = load_and_parse(&input, &root_label).await?;
            let markdown = render::to_markdown(&categories);
            tokio::fs::write(&output, &markdown)
                .await
                .with_context(|| format!("failed to write {}", output.display()))?;
            let links: usize = query::flatten(&categories)
                .map(|(cat, _)| cat.links().count())
                .sum();
            println!(
                "Wrote {} ({} categories, {} links)",
                output.display(),
                query::flatten(&categories).count(),
                links
            );
            Ok(())
        }
        Commands::Search {
            input,
            query,
            category,
            json,
            root_label,
        } => {
            let categories = load_and_parse(&input, &root_label).await?;
            let hits = match &category {
                Some(name) => {
                    let cat = query::find_category(&categories, name)
                        .with_context(|| format!("no category named {name:?}"))?;
                    query::search(std::slice::from_ref(cat), &query)
                }
                None => query::search(&categories, &query),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
                return Ok(());
            }
            if hits.is_empty() {
                println!("No links match {:?}.", query);
                return Ok(());
            }

            println!(
                "{:>3} | {:<28} | {:<40} | {}",
                "#", "Title", "URL", "Path"
            );
            println!("{}", "-".repeat(100));
            for (i, hit) in hits.iter().enumerate() {
                println!(
                    "{:>3} | {:<28} | {:<40} | {}",
                    i + 1,
                    truncate(&hit.link.title, 28),
                    truncate(&hit.link.url, 40),
                    hit.path.join(" > "),
                );
            }
            println!("\n{} links match {:?}", hits.len(), query);
            Ok(())
        }
        Commands::Tree {
            input,
            json,
            root_label,
        } => {
            let categories = load_and_parse(&input, &root_label).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
                return Ok(());
            }
            for (cat, depth) in query::flatten(&categories) {
                let links = cat.links().count();
                if links == 0 {
                    println!("{}{}", "  ".repeat(depth), cat.name);
                } else {
                    println!("{}{} ({} links)", "  ".repeat(depth), cat.name, links);
                }
            }
            Ok(())
        }
        Commands::Stats { input, root_label } => {
            let categories = load_and_parse(&input, &root_label).await?;
            let stats = collect_stats(&categories);
            println!("Categories: {}", stats.categories);
            println!("Links:      {}", stats.links);
            println!("Max depth:  {}", stats.max_depth);
            println!("\nBy type:");
            for (label, n) in &stats.by_type {
                println!("  {:<14} {}", label, n);
            }
            println!("\nBy priority:");
            for (label, n) in &stats.by_priority {
                println!("  {:<14} {}", label, n);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

async fn load_and_parse(input: &str, root_label: &str) -> anyhow::Result<Vec<Category>> {
    let source = Source::from_arg(input);
    let html = source.load().await?;
    let categories = parser::parse_document(&html, root_label)
        .with_context(|| format!("failed to parse {input}"))?;
    Ok(categories)
}

struct Stats {
    categories: usize,
    links: usize,
    max_depth: usize,
    by_type: BTreeMap<&'static str, usize>,
    by_priority: BTreeMap<&'static str, usize>,
}

fn collect_stats(categories: &[Category]) -> Stats {
    let mut stats = Stats {
        categories: 0,
        links: 0,
        max_depth: 0,
        by_type: BTreeMap::new(),
        by_priority: BTreeMap::new(),
    };

    for (cat, depth) in query::flatten(categories) {
        stats.categories += 1;
        stats.max_depth = stats.max_depth.max(depth);
        for link in cat.links() {
            stats.links += 1;
            let (kind, priority) = classify::classify(&link.url, &link.title);
            *stats.by_type.entry(kind.label()).or_default() += 1;
            *stats.by_priority.entry(priority.label()).or_default() += 1;
        }
    }

    stats
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──
