use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Where the bookmark document comes from. The whole document is
/// loaded before parsing starts; nothing is streamed.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Remote(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    #[error("fetching {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl Source {
    /// Classify a CLI argument: an http(s) URL loads over the network,
    /// anything else is a file path.
    pub fn from_arg(raw: &str) -> Source {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Remote(raw.to_string())
        } else {
            Source::File(PathBuf::from(raw))
        }
    }

    /// Load the raw document text. Call sites never branch on where
    /// the document lives.
    pub async fn load(&self) -> Result<String, LoadError> {
        match self {
            Source::File(path) => load_file(path).await,
            Source::Remote(url) => fetch_remote(url).await,
        }
    }
}

async fn load_file(path: &Path) -> Result<String, LoadError> {
    info!("reading {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::File {
            path: path.to_path_buf(),
            source,
        })
}

async fn fetch_remote(url: &str) -> Result<String, LoadError> {
    info!("fetching {url}");
    let response = reqwest::get(url).await.map_err(|source| LoadError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| LoadError::Http {
        url: url.to_string(),
        source,
    })
}

// ── Tests ──
