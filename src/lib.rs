//! inkpress: markdown blog content pipeline
//!
//! Discovers markdown documents in a content directory, parses their
//! front-matter, renders them to HTML with syntax highlighting, derives a
//! preview excerpt, and memoizes the render stage behind a content-hash
//! cache. A [`repository::PostRepository`] exposes the processed collection
//! as queries (list, sort by date, filter by tag, tag union, path
//! enumeration).

pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod repository;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory holding `<identifier>.md` documents
    pub posts_dir: PathBuf,
    /// Development mode: unpublished posts become visible in every query
    pub dev: bool,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(&base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let dev = config.render_drafts;

        Self {
            config,
            base_dir,
            posts_dir,
            dev,
        }
    }

    /// Override development mode (e.g. from a CLI flag)
    pub fn with_dev_mode(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Repository over this site's content directory
    pub fn repository(&self) -> repository::PostRepository<'_> {
        repository::PostRepository::new(self)
    }
}
