use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::text_utils::format_date;
use crate::view::site::SiteView;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site: &'a SiteView,
    post_list: Vec<PostItem<'a>>,
    has_posts: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    date: String,
    long_date: String,
    link: String,
    title: &'a str,
    description: &'a str,
    author: &'a str,
    hero_image: &'a str,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer { template })
    }

    pub fn render(&self, site: &SiteView, posts: &[Post]) -> String {
        let post_list: Vec<PostItem> = posts.iter().map(|post| {
            let (date, long_date) = format_date(&post.published_date());
            PostItem {
                date,
                long_date,
                link: post.url(),
                title: post.title(),
                description: post.description(),
                author: post.author(),
                hero_image: post.hero_image(),
                tags: post.tags().iter().map(|t| ViewTag { tag: t.as_str() }).collect(),
            }
        }).collect();

        self.template.render(&ListPage {
            site,
            has_posts: !post_list.is_empty(),
            post_list,
        })
    }
}
