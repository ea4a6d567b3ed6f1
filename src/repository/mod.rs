//! Post repository - orchestrates the per-document pipeline into queries
//!
//! Every query re-runs scan + cache lookup, so results always reflect the
//! latest on-disk state. There is deliberately no in-memory post table: the
//! durable cache is the only memoization layer.

use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;

use crate::cache::{self, PostCache};
use crate::content::scanner::scan_documents;
use crate::content::{MarkdownRenderer, Post, PostMetadata};
use crate::error::{Error, Result};
use crate::Site;

/// Queryable collection of posts backed by a content directory
pub struct PostRepository<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
    cache: PostCache,
}

impl<'a> PostRepository<'a> {
    /// Create a repository for the site's content directory
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );
        let cache = PostCache::new(&site.posts_dir);
        Self {
            site,
            renderer,
            cache,
        }
    }

    /// Load a single post through the full pipeline.
    ///
    /// Reads the document, checks the cache by content fingerprint, and on a
    /// miss parses front-matter, renders markdown, resolves the preview and
    /// stores the result. A failed cache write is logged, not fatal: the
    /// post is still returned.
    pub fn get_post(&self, id: &str) -> Result<Post> {
        let path = self.site.posts_dir.join(format!("{}.md", id));
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NotFound(id.to_string())
            } else {
                Error::Io(e)
            }
        })?;

        let hash = cache::fingerprint(&bytes);
        if let Some(post) = self.cache.lookup(id, &hash) {
            return Ok(post);
        }

        let text = String::from_utf8_lossy(&bytes);
        let (metadata, body) = PostMetadata::parse(&text)?;
        let content = self.renderer.render(body)?;
        let post = Post::new(id.to_string(), metadata, content);

        if let Err(e) = self.cache.store(id, &hash, &post) {
            tracing::warn!("failed to persist cache entry for {}: {}", id, e);
        }

        Ok(post)
    }

    /// All visible posts, in enumeration order.
    ///
    /// Documents that fail to load are logged and skipped so one broken file
    /// does not take down the whole listing.
    pub fn get_posts(&self) -> Result<Vec<Post>> {
        let ids = scan_documents(&self.site.posts_dir)?;

        let posts = ids
            .par_iter()
            .filter_map(|id| match self.get_post(id) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("skipping document {}: {}", id, e);
                    None
                }
            })
            .filter(|post| post.visible(self.site.dev))
            .collect();

        Ok(posts)
    }

    /// Visible posts ordered by date descending.
    /// Ties keep enumeration order (stable sort).
    pub fn get_sorted_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.get_posts()?;
        posts.sort_by_cached_key(|post| Reverse(post.metadata.sort_key()));
        Ok(posts)
    }

    /// Visible posts carrying the given tag
    pub fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<Post>> {
        let posts = self.get_posts()?;
        Ok(posts.into_iter().filter(|p| p.has_tag(tag)).collect())
    }

    /// Union of tags across visible posts, deduplicated
    pub fn get_tags(&self) -> Result<BTreeSet<String>> {
        let posts = self.get_posts()?;
        Ok(posts
            .into_iter()
            .flat_map(|post| post.metadata.tags)
            .collect())
    }

    /// One path entry per visible document, for static-site generation
    pub fn get_post_paths(&self) -> Result<Vec<String>> {
        let posts = self.get_posts()?;
        Ok(posts.into_iter().map(|post| post.filename).collect())
    }

    /// One path entry per tag across visible posts
    pub fn get_tag_paths(&self) -> Result<Vec<String>> {
        Ok(self.get_tags()?.into_iter().collect())
    }
}
