use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("slug cannot be blank")]
    BlankSlug,
    #[error("title cannot be blank")]
    BlankTitle,
}

/// Everything needed to build a [`Post`]. Validation happens in [`Post::new`].
#[derive(Debug, Clone)]
pub struct PostFields {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub raw_content: String,
    pub html_content: String,
    pub published_date: NaiveDate,
    pub updated_date: Option<NaiveDate>,
    pub hero_image: String,
    pub author: String,
    pub tags: Vec<String>,
    pub draft: bool,
}

/// A parsed blog post. Immutable once built; slug and title are never blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    slug: String,
    title: String,
    description: String,
    raw_content: String,
    html_content: String,
    published_date: NaiveDate,
    updated_date: Option<NaiveDate>,
    hero_image: String,
    author: String,
    tags: Vec<String>,
    draft: bool,
}

impl Post {
    pub fn new(fields: PostFields) -> Result<Post, PostError> {
        if fields.slug.trim().is_empty() {
            return Err(PostError::BlankSlug);
        }
        if fields.title.trim().is_empty() {
            return Err(PostError::BlankTitle);
        }

        Ok(Post {
            slug: fields.slug,
            title: fields.title,
            description: fields.description,
            raw_content: fields.raw_content,
            html_content: fields.html_content,
            published_date: fields.published_date,
            updated_date: fields.updated_date,
            hero_image: fields.hero_image,
            author: fields.author,
            tags: fields.tags,
            draft: fields.draft,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Markdown body, front matter excluded.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn html_content(&self) -> &str {
        &self.html_content
    }

    pub fn published_date(&self) -> NaiveDate {
        self.published_date
    }

    pub fn updated_date(&self) -> Option<NaiveDate> {
        self.updated_date
    }

    pub fn hero_image(&self) -> &str {
        &self.hero_image
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_draft(&self) -> bool {
        self.draft
    }

    /// Date used for "last modified" semantics.
    pub fn effective_date(&self) -> NaiveDate {
        self.updated_date.unwrap_or(self.published_date)
    }

    /// Site-relative path of the post page.
    pub fn url(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}, tags={:?}, draft={}\ntitle={}",
               self.slug,
               self.published_date,
               self.author,
               self.tags,
               self.draft,
               self.title,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(slug: &str, title: &str) -> PostFields {
        PostFields {
            slug: slug.to_string(),
            title: title.to_string(),
            description: String::new(),
            raw_content: String::new(),
            html_content: String::new(),
            published_date: NaiveDate::from_ymd_opt(2025, 12, 14).unwrap(),
            updated_date: None,
            hero_image: String::new(),
            author: String::new(),
            tags: vec![],
            draft: false,
        }
    }

    #[test]
    fn test_blank_slug_and_title_are_rejected() {
        assert_eq!(Post::new(fields("", "Title")), Err(PostError::BlankSlug));
        assert_eq!(Post::new(fields("  ", "Title")), Err(PostError::BlankSlug));
        assert_eq!(Post::new(fields("slug", " \t")), Err(PostError::BlankTitle));
    }

    #[test]
    fn test_effective_date_and_url() {
        let post = Post::new(fields("test-post", "Test")).unwrap();
        assert_eq!(post.url(), "/blog/test-post");
        assert_eq!(post.effective_date(), NaiveDate::from_ymd_opt(2025, 12, 14).unwrap());
        assert!(post.tags().is_empty());

        let updated = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        let post = Post::new(PostFields {
            updated_date: Some(updated),
            ..fields("test-post", "Test")
        }).unwrap();
        assert_eq!(post.effective_date(), updated);
    }
}
