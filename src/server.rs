use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use ntex::web;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::content::content_source::{ContentSource, FsContentSource};
use crate::error::BlogError;
use crate::post_repository::PostRepository;
use crate::view::list_renderer::ListRenderer;
use crate::view::not_found_renderer::NotFoundRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::{ChannelMeta, FeedBuilder};
use crate::view::site::SiteView;

const INDEX_TEMPLATE: &str = "index.tpl";
const POST_TEMPLATE: &str = "post.tpl";
const NOT_FOUND_TEMPLATE: &str = "not-found.tpl";

/// Read-only state shared by every request.
pub struct AppState<S: ContentSource = FsContentSource> {
    repository: PostRepository<S>,
    channel: ChannelMeta,
    site: SiteView,
    config: Config,
}

impl AppState<FsContentSource> {
    pub fn new(config: Config) -> Self {
        Self::with_source(config, FsContentSource)
    }
}

impl<S: ContentSource> AppState<S> {
    pub fn with_source(config: Config, source: S) -> Self {
        AppState {
            repository: PostRepository::from_config(&config, source),
            channel: ChannelMeta::from_config(&config),
            site: SiteView::from_config(&config),
            config,
        }
    }
}

pub enum PostPage {
    Found(String),
    NotFound(String),
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    std::fs::read_to_string(&full_path)
        .map_err(|e| io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e)))
}

pub fn render_index<S: ContentSource>(state: &AppState<S>) -> io::Result<String> {
    let posts = state.repository.list_published();
    let template_src = read_template(&state.config.paths.template_dir, INDEX_TEMPLATE)?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(&state.site, &posts))
}

pub fn render_post<S: ContentSource>(state: &AppState<S>, slug: &str) -> io::Result<PostPage> {
    let template_dir = &state.config.paths.template_dir;
    match state.repository.get_by_slug_or_fail(slug) {
        Ok(found) => {
            let template_src = read_template(template_dir, POST_TEMPLATE)?;
            let renderer = PostRenderer::new(&template_src)?;
            Ok(PostPage::Found(renderer.render(&state.site, &found)))
        }
        Err(e) => match e.missing_slug() {
            Some(missing) => {
                info!("Blog post not found: {}", missing);
                let template_src = read_template(template_dir, NOT_FOUND_TEMPLATE)?;
                let renderer = NotFoundRenderer::new(&template_src)?;
                Ok(PostPage::NotFound(renderer.render(&state.site, missing)))
            }
            None => Err(io::Error::new(ErrorKind::Other, e.to_string())),
        },
    }
}

pub fn render_feed<S: ContentSource>(state: &AppState<S>) -> Result<String, BlogError> {
    let posts = state.repository.list_published();
    FeedBuilder::build_feed(&posts, &state.channel, state.config.blog.rss.max_items)
}

#[web::get("/")]
async fn root() -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", "/blog")
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/blog")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let state: &AppState = &state;
    match render_index(state) {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            error!("Error rendering post list: {}", e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error listing posts: {}", e))
        }
    }
}

#[web::get("/blog/rss.xml")]
async fn rss_feed(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let state: &AppState = &state;
    match render_feed(state) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => {
            error!("Error building RSS feed: {}", e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error building feed: {}", e))
        }
    }
}

#[web::get("/blog/{slug}")]
async fn post_page(slug: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = slug.into_inner();
    let state: &AppState = &state;
    match render_post(state, &slug) {
        Ok(PostPage::Found(rendered)) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Ok(PostPage::NotFound(rendered)) => web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            error!("Error rendering post {}: {}", slug, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error loading post {}: {}", slug, e))
        }
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState::new(config));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(root)
            .service(index)
            .service(rss_feed)
            .service(post_page)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::config::TEST_CONFIG;
    use crate::content::content_source::MemoryContentSource;
    use crate::test_data::{DRAFT_POST_MD, TEST_POST_MD};

    use super::*;

    fn state(template_dir: &Path) -> AppState<MemoryContentSource> {
        let mut config = Config::from_toml(TEST_CONFIG).unwrap();
        config.paths.template_dir = template_dir.to_path_buf();

        let source = MemoryContentSource::new()
            .with_file("test-post.md", TEST_POST_MD)
            .with_file("draft-post.md", DRAFT_POST_MD);
        AppState::with_source(config, source)
    }

    fn write_templates(dir: &Path) {
        fs::write(dir.join(INDEX_TEMPLATE), "{{#post_list}}<a href=\"{{link}}\">{{title}}</a>{{/post_list}}").unwrap();
        fs::write(dir.join(POST_TEMPLATE), "<h1>{{post_title}}</h1>{{{post_content}}}").unwrap();
        fs::write(dir.join(NOT_FOUND_TEMPLATE), "missing {{slug}}").unwrap();
    }

    #[test]
    fn test_render_index() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        let html = render_index(&state(dir.path())).unwrap();
        assert_eq!(html, "<a href=\"/blog/test-post\">Test Post Title</a>");
    }

    #[test]
    fn test_render_post_and_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path());
        let state = state(dir.path());

        match render_post(&state, "test-post").unwrap() {
            PostPage::Found(html) => {
                assert!(html.starts_with("<h1>Test Post Title</h1>"));
                assert!(html.contains("<strong>test content</strong>"));
            }
            PostPage::NotFound(_) => panic!("test-post should exist"),
        }

        match render_post(&state, "draft-post").unwrap() {
            PostPage::NotFound(html) => assert_eq!(html, "missing draft-post"),
            PostPage::Found(_) => panic!("drafts are not published"),
        }
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(render_index(&state(dir.path())).is_err());
    }

    #[test]
    fn test_render_feed() {
        let dir = tempfile::tempdir().unwrap();
        let xml = render_feed(&state(dir.path())).unwrap();
        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("<link>https://test.example.com/blog/test-post</link>"));
        assert!(xml.contains("<pubDate>Sun, 14 Dec 2025 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<title>Test Blog</title>"));
    }
}
