pub mod content_source;
pub mod front_matter;
pub mod markdown_renderer;
pub mod post_parser;
