use ahash::HashMap;
use jiff::{Span, Timestamp};

#[derive(Clone, Debug)]
struct Entry<V> {
  value: V,
  expires_at: Timestamp,
}

/// A small expiring key-value store, checked for expiry on read.
///
/// Owned and consulted by the service layer only; the pure matching
/// functions never see it.
#[derive(Clone, Debug)]
pub struct TtlCache<V> {
  entries: HashMap<String, Entry<V>>,
  default_ttl: Span,
}

impl<V> TtlCache<V> {
  pub fn new(default_ttl: Span) -> TtlCache<V> {
    TtlCache {
      entries: HashMap::default(),
      default_ttl,
    }
  }

  /// Returns the cached value, evicting it first if it has expired.
  pub fn get(&mut self, key: &str) -> Option<&V> {
    let expired = match self.entries.get(key) {
      Some(entry) => entry.expires_at <= Timestamp::now(),
      None => return None,
    };

    if expired {
      self.entries.remove(key);
      return None;
    }

    self.entries.get(key).map(|entry| &entry.value)
  }

  pub fn set(&mut self, key: &str, value: V) {
    self.set_with_ttl(key, value, self.default_ttl);
  }

  pub fn set_with_ttl(&mut self, key: &str, value: V, ttl: Span) {
    let entry = Entry {
      value,
      // A deadline past the representable range never expires
      expires_at: Timestamp::now().saturating_add(ttl).unwrap_or(Timestamp::MAX),
    };

    self.entries.insert(key.to_string(), entry);
  }
}

impl<V> Default for TtlCache<V> {
  fn default() -> Self {
    TtlCache::new(Span::new().hours(1))
  }
}

#[cfg(test)]
mod tests {
  use jiff::Span;

  use super::TtlCache;

  #[test]
  fn stores_and_returns_values() {
    let mut cache = TtlCache::default();

    cache.set("content", vec![1, 2, 3]);

    assert_eq!(cache.get("content"), Some(&vec![1, 2, 3]));
    assert_eq!(cache.get("missing"), None);
  }

  #[test]
  fn expired_entries_are_evicted_on_read() {
    let mut cache = TtlCache::default();

    cache.set_with_ttl("content", "stale", Span::new().seconds(-1));

    assert_eq!(cache.get("content"), None);
    assert_eq!(cache.get("content"), None);
  }

  #[test]
  fn far_future_ttl_never_expires() {
    let mut cache = TtlCache::default();

    // Overflows the representable timestamp range, the deadline saturates
    cache.set_with_ttl("content", "fresh", Span::new().hours(100_000_000));

    assert_eq!(cache.get("content"), Some(&"fresh"));
  }

  #[test]
  fn overwrite_refreshes_the_value() {
    let mut cache = TtlCache::default();

    cache.set_with_ttl("content", "stale", Span::new().seconds(-1));
    cache.set("content", "fresh");

    assert_eq!(cache.get("content"), Some(&"fresh"));
  }
}
