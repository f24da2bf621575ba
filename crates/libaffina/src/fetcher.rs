use std::{
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use anyhow::Context;

use crate::model::{ContentItem, InterestRecord, normalize_content, normalize_records};

/// Remote source for map and content collections.
///
/// Implementations report transport or shape problems as errors; the caller
/// substitutes fallback data, so no failure from here ever reaches the
/// matching core.
pub trait Fetcher: Clone + Send + Sync + 'static {
  fn fetch_records(&self) -> impl Future<Output = anyhow::Result<Vec<InterestRecord>>> + Send;
  fn fetch_content(&self) -> impl Future<Output = anyhow::Result<Vec<ContentItem>>> + Send;
}

/// Fetches from the platform REST API over HTTP, with a bounded timeout.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
  client: reqwest::Client,
  base_url: String,
}

impl HttpFetcher {
  pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<HttpFetcher> {
    let client = reqwest::Client::builder().timeout(timeout).build().context("could not build http client")?;

    Ok(HttpFetcher {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  async fn fetch_json(&self, path: &str) -> anyhow::Result<serde_json::Value> {
    self
      .client
      .get(format!("{}/{path}", self.base_url))
      .send()
      .await
      .with_context(|| format!("could not reach {path} endpoint"))?
      .error_for_status()
      .with_context(|| format!("{path} endpoint returned an error"))?
      .json()
      .await
      .with_context(|| format!("invalid {path} payload"))
  }
}

impl Fetcher for HttpFetcher {
  async fn fetch_records(&self) -> anyhow::Result<Vec<InterestRecord>> {
    Ok(normalize_records(self.fetch_json("map").await?))
  }

  async fn fetch_content(&self) -> anyhow::Result<Vec<ContentItem>> {
    Ok(normalize_content(self.fetch_json("content").await?))
  }
}

/// In-memory fetcher serving fixed collections, for tests and examples.
/// `fetches` counts every attempted round-trip.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
  pub records: Vec<InterestRecord>,
  pub content: Vec<ContentItem>,
  pub unavailable: bool,
  pub fetches: Arc<AtomicUsize>,
}

impl StaticFetcher {
  pub fn unavailable() -> StaticFetcher {
    StaticFetcher {
      unavailable: true,
      ..Default::default()
    }
  }
}

impl Fetcher for StaticFetcher {
  async fn fetch_records(&self) -> anyhow::Result<Vec<InterestRecord>> {
    self.fetches.fetch_add(1, Ordering::SeqCst);

    if self.unavailable {
      anyhow::bail!("remote source is unavailable");
    }

    Ok(self.records.clone())
  }

  async fn fetch_content(&self) -> anyhow::Result<Vec<ContentItem>> {
    self.fetches.fetch_add(1, Ordering::SeqCst);

    if self.unavailable {
      anyhow::bail!("remote source is unavailable");
    }

    Ok(self.content.clone())
  }
}
