use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::text_utils::format_date;
use crate::util::url::encode_uri_component;
use crate::view::site::SiteView;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    site: &'a SiteView,
    slug: &'a str,
    author: &'a str,
    tags: Vec<ViewTag<'a>>,
    date: &'a str,
    long_date: &'a str,
    updated: bool,
    updated_date: String,
    hero_image: &'a str,
    post_title: &'a str,
    post_description: &'a str,
    post_content: &'a str,
    post_url: &'a str,
    share_url: String,
    share_title: String,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer { template })
    }

    pub fn render(&self, site: &SiteView, post: &Post) -> String {
        let tags: Vec<ViewTag> = post.tags().iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let (date, long_date) = format_date(&post.published_date());
        let updated_date = post.updated_date()
            .map(|d| format_date(&d).1)
            .unwrap_or_default();
        let post_url = format!("{}{}", site.publisher_url, post.url());

        self.template.render(&ViewItem {
            site,
            slug: post.slug(),
            author: post.author(),
            tags,
            date: date.as_str(),
            long_date: long_date.as_str(),
            updated: post.updated_date().is_some(),
            updated_date,
            hero_image: post.hero_image(),
            post_title: post.title(),
            post_description: post.description(),
            post_content: post.html_content(),
            post_url: post_url.as_str(),
            share_url: encode_uri_component(&post_url),
            share_title: encode_uri_component(post.title()),
        })
    }
}
