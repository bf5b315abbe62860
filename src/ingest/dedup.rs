// src/ingest/dedup.rs
//! Persistence port for links already delivered in earlier cycles.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tokio::fs;

pub const DEFAULT_DEDUP_PATH: &str = "sent_news.json";

#[async_trait::async_trait]
pub trait DedupStore: Send + Sync {
    /// Links delivered so far. A store that has never been saved is empty.
    async fn load(&self) -> Result<HashSet<String>>;
    /// Replace the persisted set with `links`.
    async fn save(&self, links: &HashSet<String>) -> Result<()>;
}

/// JSON array of links in a flat file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl DedupStore for JsonFileStore {
    async fn load(&self) -> Result<HashSet<String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        if content.trim().is_empty() {
            return Ok(HashSet::new());
        }
        let links: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(links.into_iter().collect())
    }

    async fn save(&self, links: &HashSet<String>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        // sorted output keeps the file diffable
        let sorted: BTreeSet<&String> = links.iter().collect();
        let body = serde_json::to_vec(&sorted).context("serializing dedup set")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

/// In-process store, handy for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    links: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            links: Mutex::new(links.into_iter().map(Into::into).collect()),
        }
    }

    pub fn snapshot(&self) -> HashSet<String> {
        self.links.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl DedupStore for MemoryStore {
    async fn load(&self) -> Result<HashSet<String>> {
        Ok(self.snapshot())
    }

    async fn save(&self, links: &HashSet<String>) -> Result<()> {
        let mut guard = self
            .links
            .lock()
            .map_err(|_| anyhow::anyhow!("dedup memory store poisoned"))?;
        *guard = links.clone();
        Ok(())
    }
}
