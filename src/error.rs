//! Error taxonomy for the content pipeline
//!
//! Cache corruption is intentionally absent from this enum: a malformed or
//! unreadable `cache.json` degrades to "always miss" inside the cache module
//! and is never surfaced to callers.

use thiserror::Error;

/// Errors produced while loading and rendering documents
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("front-matter parse error: {0}")]
    Parse(String),

    #[error("markdown render error: {0}")]
    Render(String),

    #[error("no such document: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
