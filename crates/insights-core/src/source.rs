// Data sources for the static insight documents.
//
// All documents are flat JSON files addressed by a relative path. The
// dashboard can read them from a directory on disk or from any static HTTP
// host; tests use the in-memory source.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::model::SeasonId;

// ---------------------------------------------------------------------------
// Document paths
// ---------------------------------------------------------------------------

pub const INDEX_PATH: &str = "insights_index.json";
pub const LEAGUES_PATH: &str = "leagues.json";
pub const TEAMS_PATH: &str = "teams.json";
pub const SUMMARY_PATH: &str = "league_summary.json";
pub const OVERVIEW_PATH: &str = "league_overview.json";

pub fn season_insights_path(season: &SeasonId) -> String {
    format!("insights_{season}.json")
}

pub fn team_insights_path(season: &SeasonId) -> String {
    format!("insights_{season}_teams.json")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("document not found: {path}")]
    NotFound { path: String },

    #[error("request for {path} failed with HTTP status {status}")]
    Status { path: String, status: u16 },

    #[error("request for {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid base url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
}

// ---------------------------------------------------------------------------
// DataSource trait
// ---------------------------------------------------------------------------

/// Read-only access to the insight documents.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the raw bytes of the document at `path`.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;

    /// Human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Fetch and decode a JSON document.
pub async fn fetch_json<T: DeserializeOwned>(
    source: &dyn DataSource,
    path: &str,
) -> Result<T, FetchError> {
    debug!("Fetching {} from {}", path, source.describe());
    let bytes = source.fetch(path).await?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse {
        path: path.to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// HttpSource
// ---------------------------------------------------------------------------

/// Documents served by a static HTTP host.
pub struct HttpSource {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        // Url::join drops the last path segment unless it ends with a slash.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = reqwest::Url::parse(&normalized).map_err(|e| FetchError::InvalidBaseUrl {
            url: normalized.clone(),
            message: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::InvalidBaseUrl {
                url: normalized,
                message: e.to_string(),
            })?;
        Ok(HttpSource { http, base_url })
    }

    pub fn url_for(&self, path: &str) -> Result<reqwest::Url, FetchError> {
        self.base_url.join(path).map_err(|e| FetchError::InvalidBaseUrl {
            url: self.base_url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(path)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

// ---------------------------------------------------------------------------
// DirSource
// ---------------------------------------------------------------------------

/// Documents stored in a local directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let full = self.root.join(path);
        tokio::fs::read(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound {
                    path: path.to_string(),
                }
            } else {
                FetchError::Io {
                    path: path.to_string(),
                    source: e,
                }
            }
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// Documents held in memory. Records how often each path was requested.
#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
    requests: Mutex<HashMap<String, usize>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document; returns `self` for chaining.
    pub fn with_json(mut self, path: &str, value: serde_json::Value) -> Self {
        self.insert_json(path, value);
        self
    }

    pub fn insert_json(&mut self, path: &str, value: serde_json::Value) {
        self.documents
            .insert(path.to_string(), value.to_string().into_bytes());
    }

    pub fn insert_raw(&mut self, path: &str, bytes: impl Into<Vec<u8>>) {
        self.documents.insert(path.to_string(), bytes.into());
    }

    /// Number of fetches issued for `path`, including failed ones.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .map(|r| r.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            *requests.entry(path.to_string()).or_insert(0) += 1;
        }
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                path: path.to_string(),
            })
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InsightsIndex;
    use serde_json::json;
    use std::fs;

    #[test]
    fn document_paths_embed_season() {
        let season = SeasonId::from("2024");
        assert_eq!(season_insights_path(&season), "insights_2024.json");
        assert_eq!(team_insights_path(&season), "insights_2024_teams.json");
    }

    #[tokio::test]
    async fn memory_source_counts_requests() {
        let source = MemorySource::new().with_json(INDEX_PATH, json!({ "seasons": ["2024"] }));
        let index: InsightsIndex = fetch_json(&source, INDEX_PATH).await.unwrap();
        assert_eq!(index.seasons.len(), 1);
        let _ = fetch_json::<InsightsIndex>(&source, INDEX_PATH).await.unwrap();
        assert_eq!(source.request_count(INDEX_PATH), 2);
        assert_eq!(source.request_count(LEAGUES_PATH), 0);
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let source = MemorySource::new();
        let err = fetch_json::<InsightsIndex>(&source, "nope.json").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
        assert_eq!(source.request_count("nope.json"), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let mut source = MemorySource::new();
        source.insert_raw(INDEX_PATH, "{ not json");
        let err = fetch_json::<InsightsIndex>(&source, INDEX_PATH).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[tokio::test]
    async fn dir_source_reads_files() {
        let tmp = std::env::temp_dir().join("insights_dir_source_test");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        fs::write(tmp.join(INDEX_PATH), r#"{"seasons":[2023,2024]}"#).unwrap();

        let source = DirSource::new(&tmp);
        let index: InsightsIndex = fetch_json(&source, INDEX_PATH).await.unwrap();
        assert_eq!(index.seasons.len(), 2);

        let err = source.fetch("insights_1999.json").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn http_source_joins_relative_paths() {
        let source = HttpSource::new("http://localhost:8000/data", Duration::from_secs(5)).unwrap();
        let url = source.url_for("insights_2024.json").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/data/insights_2024.json");
    }

    #[test]
    fn http_source_rejects_bad_base() {
        let err = HttpSource::new("not a url", Duration::from_secs(5)).err().unwrap();
        assert!(matches!(err, FetchError::InvalidBaseUrl { .. }));
    }
}
