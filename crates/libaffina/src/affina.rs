use std::sync::Arc;

use bon::bon;
use jiff::Span;
use metrics::{gauge, histogram};
use tokio::{
  sync::{Mutex, RwLock},
  time::Instant,
};

use crate::{
  cache::TtlCache,
  fetcher::Fetcher,
  filter::{FilterParams, filter_records},
  matching::{RankParams, rank_matches, rank_matches_where},
  merge::merge_records,
  model::{ContentItem, InterestRecord, SimilarityResult},
  seed,
};

const CONTENT_CACHE_KEY: &str = "content";

#[derive(Clone, Debug)]
pub struct AffinaConfig {
  pub content_ttl: Span,
}

impl Default for AffinaConfig {
  fn default() -> Self {
    AffinaConfig { content_ttl: Span::new().hours(1) }
  }
}

/// The main entrypoint for using the Affina library.
///
/// `Affina` keeps a working set of interest records, seeded from the bundled
/// fallback data and refreshed from a remote source through a [`Fetcher`].
/// Queries delegate to the pure matching functions; fetching, merging and
/// caching all happen here, so the core stays free of I/O.
///
/// # Examples
///
/// ```rust
/// # use libaffina::prelude::*;
/// # tokio_test::block_on(async {
///   let affina = Affina::new(StaticFetcher::default()).build().await;
///
///   for result in affina.matches("community tree planting", &RankParams::search()).await {
///     println!("{}: {:.0}% match", result.record.interest, result.similarity * 100.0);
///   }
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Affina<F: Fetcher> {
  fetcher: F,
  records: Arc<RwLock<Vec<InterestRecord>>>,
  content: Arc<Mutex<TtlCache<Vec<ContentItem>>>>,
}

#[bon]
impl<F: Fetcher> Affina<F> {
  /// Create a new Affina instance.
  ///
  /// The working set starts out as the bundled seed records, then an initial
  /// remote refresh is attempted. A failed refresh is not an error, the seed
  /// data simply stays in place. After this, it is the caller's
  /// responsibility to call [`Affina::refresh`] as needed.
  ///
  /// This struct can be safely cloned and sent across thread boundaries.
  #[builder(start_fn = new, finish_fn = build)]
  pub async fn _new(#[builder(start_fn)] fetcher: F, #[builder(default)] config: AffinaConfig) -> Affina<F> {
    crate::init();

    let affina = Affina {
      fetcher,
      records: Arc::new(RwLock::new(seed::map_users())),
      content: Arc::new(Mutex::new(TtlCache::new(config.content_ttl))),
    };

    affina.refresh().await;
    affina
  }
}

impl<F: Fetcher> Affina<F> {
  /// Re-fetch the remote map records and merge them over the current working
  /// set, remote records winning on id collisions. Locally added records are
  /// carried over.
  pub async fn refresh(&self) {
    let then = Instant::now();

    match self.fetcher.fetch_records().await {
      Ok(remote) => {
        let mut records = self.records.write().await;
        let merged = merge_records(std::mem::take(&mut *records), remote);

        histogram!("affina_refresh_latency_seconds").record(then.elapsed().as_secs_f64());
        gauge!("affina_records_total").set(merged.len() as f64);

        tracing::info!(records = merged.len(), "refreshed map records");

        *records = merged;
      }

      Err(err) => tracing::warn!(error = err.to_string(), "could not refresh map records, keeping current set"),
    }
  }

  /// The working set, narrowed by category and search text.
  pub async fn records(&self, params: &FilterParams) -> Vec<InterestRecord> {
    filter_records(&self.records.read().await, params)
  }

  /// Look up a single record by id.
  pub async fn record(&self, id: &str) -> Option<InterestRecord> {
    self.records.read().await.iter().find(|record| record.id.as_deref() == Some(id)).cloned()
  }

  /// Append a record to the working set.
  ///
  /// Used for submissions created locally before the remote source knows
  /// about them. They survive refreshes; once the remote serves the same id,
  /// its version takes over.
  pub async fn add_record(&self, record: InterestRecord) {
    self.records.write().await.push(record);
  }

  /// Rank the working set against a free-text interest.
  pub async fn matches(&self, query: &str, params: &RankParams) -> Vec<SimilarityResult> {
    let results = rank_matches(query, &self.records.read().await, params);

    for result in &results {
      histogram!("affina_similarity_scores").record(result.similarity);
    }

    results
  }

  /// Rank the working set against the interest of the record `id`, excluding
  /// the record itself. Returns `None` when the id is unknown.
  pub async fn related_to(&self, id: &str, params: &RankParams) -> Option<Vec<SimilarityResult>> {
    let records = self.records.read().await;
    let anchor = records.iter().find(|record| record.id.as_deref() == Some(id))?;

    Some(rank_matches_where(&anchor.interest, &records, params, |record| record.id.as_deref() != Some(id)))
  }

  /// The merged content collection, memoised through the TTL cache.
  ///
  /// The cache lock is held across the fetch, concurrent readers of an
  /// expired entry wait for a single remote round-trip.
  pub async fn content(&self) -> Vec<ContentItem> {
    let mut cache = self.content.lock().await;

    if let Some(items) = cache.get(CONTENT_CACHE_KEY) {
      return items.clone();
    }

    match self.fetcher.fetch_content().await {
      Ok(remote) => {
        let merged = merge_records(seed::content(), remote);

        cache.set(CONTENT_CACHE_KEY, merged.clone());

        merged
      }

      Err(err) => {
        tracing::warn!(error = err.to_string(), "could not fetch content, serving seed data");

        seed::content()
      }
    }
  }
}
