use spdlog::debug;
use thiserror::Error;

use crate::content::front_matter::{split_front_matter, FrontMatter};
use crate::content::markdown_renderer::MarkdownRenderer;
use crate::post::{Post, PostError, PostFields};
use crate::text_utils::{is_blank, parse_iso_date};

/// Why a content file did not become a post.
#[derive(Debug, Error)]
pub enum Skip {
    #[error("missing title")]
    MissingTitle,
    #[error("invalid or missing pubDate")]
    InvalidPubDate,
    #[error("{0}")]
    MalformedFrontMatter(String),
    #[error("{0}")]
    Render(String),
    #[error("invalid post: {0}")]
    InvalidPost(#[from] PostError),
    #[error("unreadable file: {0}")]
    Unreadable(String),
}

pub enum ParseOutcome {
    Parsed(Post),
    Skipped(Skip),
}

impl ParseOutcome {
    pub fn post(self) -> Option<Post> {
        match self {
            ParseOutcome::Parsed(post) => Some(post),
            ParseOutcome::Skipped(_) => None,
        }
    }
}

/// Turns one content file into a [`Post`], applying defaults and validation.
pub struct PostParser {
    renderer: MarkdownRenderer,
    default_author: String,
}

impl PostParser {
    pub fn new(default_author: impl Into<String>) -> Self {
        PostParser {
            renderer: MarkdownRenderer::new(),
            default_author: default_author.into(),
        }
    }

    pub fn parse(&self, file_name: &str, raw_text: &str) -> ParseOutcome {
        match self.try_parse(file_name, raw_text) {
            Ok(post) => ParseOutcome::Parsed(post),
            Err(skip) => ParseOutcome::Skipped(skip),
        }
    }

    fn try_parse(&self, file_name: &str, raw_text: &str) -> Result<Post, Skip> {
        let slug = slug_from_file_name(file_name);

        let (front_matter, body) = split_front_matter(raw_text)
            .map_err(|e| Skip::MalformedFrontMatter(e.to_string()))?;
        let html_content = self.renderer.render(body)
            .map_err(|e| Skip::Render(e.to_string()))?;

        let title = match front_matter.first("title") {
            Some(title) if !is_blank(title) => title.to_string(),
            _ => return Err(Skip::MissingTitle),
        };

        let published_date = front_matter.first("pubDate")
            .and_then(|d| parse_iso_date(d).ok())
            .ok_or(Skip::InvalidPubDate)?;

        let updated_date = self.updated_date(file_name, &front_matter);

        let description = front_matter.first("description").unwrap_or("").to_string();
        let hero_image = front_matter.first("heroImage").unwrap_or("").to_string();

        let author = match front_matter.first("author") {
            Some(author) if !is_blank(author) => author.to_string(),
            _ => self.default_author.clone(),
        };

        let tags = front_matter.values("tags").to_vec();
        let draft = front_matter.first("draft")
            .map(|d| d.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let post = Post::new(PostFields {
            slug,
            title,
            description,
            raw_content: body.to_string(),
            html_content,
            published_date,
            updated_date,
            hero_image,
            author,
            tags,
            draft,
        })?;

        Ok(post)
    }

    fn updated_date(&self, file_name: &str, front_matter: &FrontMatter) -> Option<chrono::NaiveDate> {
        let value = front_matter.first("updatedDate")?;
        match parse_iso_date(value) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!("Ignoring updatedDate of {}: {}", file_name, e);
                None
            }
        }
    }
}

pub fn slug_from_file_name(file_name: &str) -> String {
    file_name.strip_suffix(".md").unwrap_or(file_name).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::test_data::{DRAFT_POST_MD, TEST_POST_MD};

    use super::*;

    fn parser() -> PostParser {
        PostParser::new("Default Author")
    }

    fn skip_reason(outcome: ParseOutcome) -> String {
        match outcome {
            ParseOutcome::Parsed(post) => panic!("expected a skip, got {}", post),
            ParseOutcome::Skipped(skip) => skip.to_string(),
        }
    }

    #[test]
    fn test_slug_from_file_name() {
        assert_eq!(slug_from_file_name("test-post.md"), "test-post");
        assert_eq!(slug_from_file_name("archive.md.md"), "archive.md");
        assert_eq!(slug_from_file_name("README"), "README");
    }

    #[test]
    fn test_parse_test_post() {
        let post = parser().parse("test-post.md", TEST_POST_MD).post().unwrap();
        assert_eq!(post.slug(), "test-post");
        assert_eq!(post.title(), "Test Post Title");
        assert_eq!(post.description(), "This is a test post description");
        assert_eq!(post.published_date(), NaiveDate::from_ymd_opt(2025, 12, 14).unwrap());
        assert_eq!(post.author(), "Test Author");
        assert_eq!(post.tags(), ["Test", "Example"]);
        assert!(!post.is_draft());
        assert_eq!(post.updated_date(), None);
        assert_eq!(post.hero_image(), "");

        let html = post.html_content();
        assert!(html.contains("<h2>"));
        assert!(html.contains("<strong>test content</strong>"));
        assert!(html.contains("<li>"));
        assert!(html.contains("<code>"));
        assert!(html.contains("<a href="));

        assert!(post.raw_content().contains("**test content**"));
        assert!(!post.raw_content().contains("pubDate"));
    }

    #[test]
    fn test_defaults() {
        let raw = "---\ntitle: Minimal\npubDate: 2024-03-01\nauthor: \"  \"\n---\nHello";
        let post = parser().parse("minimal.md", raw).post().unwrap();
        assert_eq!(post.author(), "Default Author");
        assert_eq!(post.description(), "");
        assert!(post.tags().is_empty());
        assert!(!post.is_draft());
        assert_eq!(post.html_content(), "<p>Hello</p>");
    }

    #[test]
    fn test_optional_dates_and_hero() {
        let raw = "---\ntitle: Updated\npubDate: 2024-03-01\nupdatedDate: 2024-04-02\nheroImage: /img/hero.png\n---\n";
        let post = parser().parse("updated.md", raw).post().unwrap();
        assert_eq!(post.updated_date(), NaiveDate::from_ymd_opt(2024, 4, 2));
        assert_eq!(post.effective_date(), NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(post.hero_image(), "/img/hero.png");

        let raw = "---\ntitle: Updated\npubDate: 2024-03-01\nupdatedDate: soon\n---\n";
        let post = parser().parse("updated.md", raw).post().unwrap();
        assert_eq!(post.updated_date(), None);
    }

    #[test]
    fn test_embeds_and_numeric_metadata_kept() {
        let raw = "---\ntitle: 1e3\npubDate: 2024-03-01\ntags: [1.10, rust]\n---\n<iframe src=\"https://www.youtube.com/embed/x\"></iframe>\n";
        let post = parser().parse("embed.md", raw).post().unwrap();
        assert_eq!(post.title(), "1e3");
        assert_eq!(post.tags(), ["1.10", "rust"]);
        assert!(post.html_content().contains("<iframe src=\"https://www.youtube.com/embed/x\">"));
    }

    #[test]
    fn test_draft_flag() {
        let post = parser().parse("draft-post.md", DRAFT_POST_MD).post().unwrap();
        assert!(post.is_draft());

        for (value, expected) in [("TRUE", true), ("True", true), ("false", false), ("yes", false), ("\"true\"", true)] {
            let raw = format!("---\ntitle: T\npubDate: 2024-01-01\ndraft: {}\n---\n", value);
            let post = parser().parse("d.md", &raw).post().unwrap();
            assert_eq!(post.is_draft(), expected, "draft: {}", value);
        }
    }

    #[test]
    fn test_missing_title_is_skipped() {
        let raw = "---\npubDate: 2024-03-01\n---\nNo title";
        assert_eq!(skip_reason(parser().parse("no-title.md", raw)), "missing title");

        let raw = "---\ntitle: \"   \"\npubDate: 2024-03-01\n---\n";
        assert_eq!(skip_reason(parser().parse("blank-title.md", raw)), "missing title");

        assert_eq!(skip_reason(parser().parse("plain.md", "# Plain markdown")), "missing title");
    }

    #[test]
    fn test_bad_pub_date_is_skipped() {
        let raw = "---\ntitle: No date\n---\n";
        assert_eq!(skip_reason(parser().parse("no-date.md", raw)), "invalid or missing pubDate");

        let raw = "---\ntitle: Bad date\npubDate: 2024-13-45\n---\n";
        assert_eq!(skip_reason(parser().parse("bad-date.md", raw)), "invalid or missing pubDate");
    }

    #[test]
    fn test_malformed_front_matter_is_skipped() {
        let raw = "---\ntitle: [broken\npubDate: 2024-01-01\n---\n";
        let outcome = parser().parse("broken.md", raw);
        assert!(matches!(outcome, ParseOutcome::Skipped(Skip::MalformedFrontMatter(_))));
    }

    #[test]
    fn test_blank_slug_is_skipped() {
        let raw = "---\ntitle: Hidden\npubDate: 2024-01-01\n---\n";
        let outcome = parser().parse(".md", raw);
        assert!(matches!(outcome, ParseOutcome::Skipped(Skip::InvalidPost(PostError::BlankSlug))));
    }
}
