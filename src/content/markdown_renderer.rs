use markdown::{CompileOptions, Options, ParseOptions};
use thiserror::Error;

/// Only MDX syntax can make the `markdown` crate fail, and MDX is never enabled here.
#[derive(Debug, Error)]
#[error("Error rendering markdown: {0}")]
pub struct RenderError(pub String);

/// Markdown to HTML with GFM extensions (tables, strikethrough, autolinks, task lists, footnotes).
///
/// Raw HTML written by the author is kept as is, `<iframe>` and `<script>` included.
/// Link and image URLs using a scheme outside the safe list (http, https, mailto, ...)
/// are dropped from the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer
    }

    // markdown::Options can carry non-Send callbacks, so it is never stored.
    fn options() -> Options {
        Options {
            parse: ParseOptions::gfm(),
            compile: CompileOptions {
                allow_dangerous_html: true,
                allow_dangerous_protocol: false,
                gfm_tagfilter: false,
                ..CompileOptions::gfm()
            },
        }
    }

    pub fn render(&self, md_text: &str) -> Result<String, RenderError> {
        markdown::to_html_with_options(md_text, &Self::options())
            .map_err(|e| RenderError(e.reason.clone()))
    }
}
