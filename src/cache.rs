//! Lock-free artwork caching shared across invocations

use std::sync::Arc;
use dashmap::DashMap;

use crate::artwork::{Artwork, ArtworkSource};
use crate::error::{Error, Result};

/// Name-keyed cache of loaded artworks
///
/// Artworks never change after loading, so entries are never invalidated.
/// Clones share the same underlying map.
pub struct ArtworkCache {
    cache: Arc<DashMap<String, Arc<Artwork>>>,
}

impl ArtworkCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Gets an artwork from the cache (lock-free)
    pub fn get(&self, name: &str) -> Option<Arc<Artwork>> {
        self.cache.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores an artwork and returns the shared handle
    ///
    /// If another caller stored the same name first, that entry wins and is
    /// returned instead.
    pub fn put(&self, name: &str, artwork: Artwork) -> Arc<Artwork> {
        let entry = self.cache
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(artwork));
        Arc::clone(entry.value())
    }

    /// Returns the cached artwork or loads and caches it
    pub fn get_or_try_insert<F>(&self, name: &str, load: F) -> Result<Arc<Artwork>>
    where
        F: FnOnce() -> Result<Artwork>,
    {
        if let Some(artwork) = self.get(name) {
            log::debug!("artwork cache hit: {}", name);
            return Ok(artwork);
        }

        log::debug!("artwork cache miss: {}", name);
        let artwork = load()?;
        Ok(self.put(name, artwork))
    }

    /// Clears the cache
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Returns the current number of cached artworks
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        let total_points: usize = self.cache
            .iter()
            .map(|entry| entry.value().outline.len())
            .sum();

        CacheStats {
            artwork_count: self.cache.len(),
            total_points,
        }
    }
}

impl Clone for ArtworkCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl Default for ArtworkCache {
    fn default() -> Self {
        Self::new()
    }
}

/// A cache on its own acts as a fixed, pre-populated artwork source
impl ArtworkSource for ArtworkCache {
    fn load(&self, name: &str) -> Result<Arc<Artwork>> {
        self.get(name)
            .ok_or_else(|| Error::artwork(name, "not in cache"))
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of artworks currently in cache
    pub artwork_count: usize,
    /// Outline points held across all artworks
    pub total_points: usize,
}
