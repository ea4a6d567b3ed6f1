//! Content cache
//!
//! Persists processed posts keyed by document identifier and content
//! fingerprint, so unchanged documents skip the render stage on subsequent
//! runs. The store is a single pretty-printed JSON file next to the
//! documents. A malformed or unreadable store degrades to "always miss"
//! rather than failing the pipeline.
//!
//! Writes are read-modify-write of the whole file, serialized in-process
//! behind a mutex and committed with a write-temp-then-rename. Concurrent
//! writers from separate processes are not coordinated; external locking is
//! required for that.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::content::Post;
use crate::error::Result;

/// Cache file name, one per content directory
pub const CACHE_FILE: &str = "cache.json";

/// Compute the fingerprint of raw document bytes.
///
/// Stable across process restarts and platforms for identical bytes. Used
/// for change detection only, not for security.
pub fn fingerprint(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// A cached entry: the fingerprint of the source bytes plus the full post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub hash: String,
    #[serde(flatten)]
    pub post: Post,
}

/// Durable fingerprint-indexed store of processed posts
#[derive(Debug)]
pub struct PostCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PostCache {
    /// Cache for the given content directory
    pub fn new(posts_dir: &Path) -> Self {
        Self {
            path: posts_dir.join(CACHE_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Return the stored post for `id` only if the stored fingerprint
    /// exactly matches `fingerprint`. Never seen, changed bytes, and a
    /// corrupt store all miss.
    pub fn lookup(&self, id: &str, fingerprint: &str) -> Option<Post> {
        let mut map = self.read_map();
        match map.remove(id) {
            Some(entry) if entry.hash == fingerprint => {
                tracing::debug!("cache hit for {}", id);
                Some(entry.post)
            }
            Some(_) => {
                tracing::debug!("cache stale for {}", id);
                None
            }
            None => None,
        }
    }

    /// Persist a processed post, replacing any prior entry for `id`
    pub fn store(&self, id: &str, fingerprint: &str, post: &Post) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut map = self.read_map();
        map.insert(
            id.to_string(),
            CacheEntry {
                hash: fingerprint.to_string(),
                post: post.clone(),
            },
        );

        let content = serde_json::to_string_pretty(&map).map_err(std::io::Error::from)?;

        // Commit atomically so readers never observe a partial write
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read the persisted map, treating any failure as an empty cache
    fn read_map(&self) -> HashMap<String, CacheEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("malformed cache file {:?}, ignoring it: {}", self.path, e);
                HashMap::new()
            }
        }
    }
}
