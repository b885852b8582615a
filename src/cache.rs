use crate::thumbnail::Thumbnail;
use std::collections::HashMap;
use std::sync::Arc;

/// What a previous attempt at a URL produced: a thumbnail, or the message
/// describing why it failed.
pub type CachedImage = Result<Arc<Thumbnail>, String>;

/// Per-session memo of URL to fetch outcome.
///
/// Entries are inserted once and never evicted; the whole cache is dropped
/// when a new file is uploaded.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, CachedImage>,
    hits: u64,
    misses: u64,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a URL, counting the lookup as a hit or a miss.
    pub fn lookup(&mut self, url: &str) -> Option<CachedImage> {
        match self.entries.get(url) {
            Some(entry) => {
                self.hits += 1;
                Some(entry.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Peek at a URL without touching the counters.
    pub fn get(&self, url: &str) -> Option<&CachedImage> {
        self.entries.get(url)
    }

    /// Store `entry` unless the URL already has one. Returns the stored entry.
    pub fn insert_if_absent(&mut self, url: &str, entry: CachedImage) -> CachedImage {
        self.entries
            .entry(url.to_string())
            .or_insert(entry)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(feature = "web")]
impl ImageCache {
    /// Resolve a URL through the cache, fetching and thumbnailing on a miss.
    ///
    /// Failures are cached too, so a broken link is not re-requested on every
    /// page load.
    pub async fn get_or_fetch(
        &mut self,
        url: &str,
        fetcher: &crate::fetch::ImageFetcher,
        max_size: u32,
    ) -> CachedImage {
        if let Some(entry) = self.lookup(url) {
            log::debug!("Cache hit for {}", url);
            return entry;
        }

        let outcome = match fetcher.fetch_image(url).await {
            Ok(image) => crate::thumbnail::make_thumbnail(&image, max_size)
                .map(Arc::new)
                .map_err(|e| format!("Error loading image from {}: {}", url, e)),
            Err(e) => Err(e.to_string()),
        };

        self.insert_if_absent(url, outcome)
    }
}
