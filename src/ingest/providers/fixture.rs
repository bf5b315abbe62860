// src/ingest/providers/fixture.rs
//! Canned feed bodies keyed by URL. No network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::ingest::types::FeedTransport;

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct StaticTransport {
    feeds: HashMap<String, Canned>,
    calls: AtomicUsize,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.feeds.insert(url.into(), Canned::Body(body.into()));
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.feeds.insert(url.into(), Canned::Failure(message.into()));
        self
    }

    /// Number of fetches served so far, failures included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedTransport for StaticTransport {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.feeds.get(url) {
            Some(Canned::Body(b)) => Ok(b.clone()),
            Some(Canned::Failure(m)) => Err(anyhow!("{m}")),
            None => Err(anyhow!("no fixture for {url}")),
        }
    }
}
