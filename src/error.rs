use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors that reach the boundary of the blog core.
///
/// Per-file problems (missing title, bad date, broken front matter) never show up here,
/// they are reported as [`crate::content::post_parser::Skip`] and filtered out of listings.
#[derive(Debug, Error)]
pub enum BlogError {
    /// No published post carries the requested slug.
    #[error("Blog post not found: {slug}")]
    NotFound { slug: String },

    #[error("Error writing RSS feed: {0}")]
    Feed(#[from] quick_xml::Error),

    #[error("RSS feed is not valid UTF-8: {0}")]
    FeedEncoding(#[from] FromUtf8Error),

    #[error("{0}")]
    Config(String),
}

impl BlogError {
    pub fn not_found(slug: impl Into<String>) -> Self {
        BlogError::NotFound { slug: slug.into() }
    }

    /// The slug carried by a [`BlogError::NotFound`], if that is what this is.
    pub fn missing_slug(&self) -> Option<&str> {
        match self {
            BlogError::NotFound { slug } => Some(slug.as_str()),
            _ => None,
        }
    }
}
