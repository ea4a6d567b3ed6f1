//! Post model

use serde::{Deserialize, Serialize};

use super::frontmatter::PostMetadata;
use super::preview::resolve_preview;

/// A fully processed document: metadata, rendered content, resolved preview.
///
/// Serializes flat (metadata fields alongside `filename`, `content` and
/// `preview`), which is also the shape stored in the cache file. Never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Document identifier (filename without extension)
    pub filename: String,

    #[serde(flatten)]
    pub metadata: PostMetadata,

    /// Rendered HTML content
    pub content: String,

    /// Resolved preview: the explicit override, or a derived excerpt
    pub preview: String,
}

impl Post {
    /// Assemble a post from parsed metadata and rendered content.
    ///
    /// The metadata's preview override is consumed here: the resolved value
    /// lives in `self.preview` so the serialized form carries a single
    /// preview field.
    pub fn new(filename: String, mut metadata: PostMetadata, content: String) -> Self {
        let override_preview = metadata.preview.take();
        let preview = resolve_preview(override_preview.as_deref(), &content);
        Self {
            filename,
            metadata,
            content,
            preview,
        }
    }

    /// Title from front-matter, falling back to the filename
    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or(&self.filename)
    }

    /// Whether the post shows up in queries.
    /// Unpublished posts are visible only in development mode.
    pub fn visible(&self, dev_mode: bool) -> bool {
        self.metadata.published || dev_mode
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(published: bool) -> PostMetadata {
        PostMetadata {
            published,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_derives_preview() {
        let post = Post::new("a".into(), meta(true), "<p>hello world</p>".into());
        assert_eq!(post.preview, "hello world");
    }

    #[test]
    fn test_new_consumes_override() {
        let metadata = PostMetadata {
            preview: Some("custom".to_string()),
            ..Default::default()
        };
        let post = Post::new("a".into(), metadata, "<p>body</p>".into());
        assert_eq!(post.preview, "custom");
        assert_eq!(post.metadata.preview, None);
    }

    #[test]
    fn test_title_falls_back_to_filename() {
        let post = Post::new("my-post".into(), meta(true), String::new());
        assert_eq!(post.title(), "my-post");
    }

    #[test]
    fn test_visibility() {
        let unpublished = Post::new("a".into(), meta(false), String::new());
        assert!(!unpublished.visible(false));
        assert!(unpublished.visible(true));
        let published = Post::new("b".into(), meta(true), String::new());
        assert!(published.visible(false));
    }

    #[test]
    fn test_serializes_flat() {
        let metadata = PostMetadata {
            title: Some("T".into()),
            date: Some("2024-01-01".into()),
            published: true,
            tags: vec!["rust".into()],
            ..Default::default()
        };
        let post = Post::new("a".into(), metadata, "<p>x</p>".into());
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["filename"], "a");
        assert_eq!(json["title"], "T");
        assert_eq!(json["published"], true);
        assert_eq!(json["preview"], "x");

        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back, post);
    }
}
