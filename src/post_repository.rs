use std::cmp::Ordering;
use std::path::PathBuf;

use spdlog::{error, info, warn};

use crate::config::Config;
use crate::content::content_source::ContentSource;
use crate::content::post_parser::{ParseOutcome, PostParser, Skip};
use crate::error::BlogError;
use crate::post::Post;

const CONTENT_EXTENSION: &str = "md";

/// Published posts, read fresh from the content source on every call.
pub struct PostRepository<S: ContentSource> {
    source: S,
    content_dir: PathBuf,
    parser: PostParser,
}

impl<S: ContentSource> PostRepository<S> {
    pub fn new(source: S, content_dir: impl Into<PathBuf>, default_author: &str) -> Self {
        PostRepository {
            source,
            content_dir: content_dir.into(),
            parser: PostParser::new(default_author),
        }
    }

    pub fn from_config(config: &Config, source: S) -> Self {
        Self::new(source, config.paths.content_dir.clone(), &config.blog.default_author)
    }

    /// Every non-draft post that parses, newest first, ties ordered by slug.
    ///
    /// A broken file only drops that file. An unreadable content directory gives an empty list.
    pub fn list_published(&self) -> Vec<Post> {
        info!("Loading blog posts from {}", self.content_dir.display());

        let names = match self.source.list_content_files(&self.content_dir, CONTENT_EXTENSION) {
            Ok(names) => names,
            Err(e) => {
                error!("Failed to load blog posts from {}: {}", self.content_dir.display(), e);
                return vec![];
            }
        };
        info!("Found {} markdown files", names.len());

        let mut posts: Vec<Post> = names.iter()
            .filter_map(|name| self.load_post(name))
            .filter(|post| !post.is_draft())
            .collect();

        posts.sort_by(publication_order);

        info!("Loaded {} published blog posts", posts.len());
        posts
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<Post> {
        self.list_published()
            .into_iter()
            .find(|post| post.slug() == slug)
    }

    pub fn get_by_slug_or_fail(&self, slug: &str) -> Result<Post, BlogError> {
        self.find_by_slug(slug)
            .ok_or_else(|| BlogError::not_found(slug))
    }

    fn load_post(&self, name: &str) -> Option<Post> {
        let outcome = match self.source.read_content(&self.content_dir, name) {
            Ok(raw_text) => self.parser.parse(name, &raw_text),
            Err(e) => ParseOutcome::Skipped(Skip::Unreadable(e.to_string())),
        };

        match outcome {
            ParseOutcome::Parsed(post) => Some(post),
            ParseOutcome::Skipped(skip) => {
                warn!("Skipping post {}: {}", name, skip);
                None
            }
        }
    }
}

fn publication_order(a: &Post, b: &Post) -> Ordering {
    b.published_date().cmp(&a.published_date())
        .then_with(|| a.slug().cmp(b.slug()))
}
