use crate::config::Config;

/// Attributes shared by every HTML page. Templates reach them inside `{{#site}}...{{/site}}`.
#[derive(ramhorns::Content, Clone, Debug)]
pub struct SiteView {
    pub blog_title: String,
    pub blog_description: String,
    pub publisher_url: String,
    pub publisher_name: String,
    pub disqus_enabled: bool,
    pub disqus_shortname: String,
    pub social_sharing_enabled: bool,
    pub medium_url: String,
}

impl SiteView {
    pub fn from_config(config: &Config) -> Self {
        let blog = &config.blog;
        SiteView {
            blog_title: blog.title.clone(),
            blog_description: blog.description.clone(),
            publisher_url: blog.publisher_url().to_string(),
            publisher_name: blog.publisher_name.clone(),
            disqus_enabled: blog.disqus.is_enabled(),
            disqus_shortname: blog.disqus.shortname.clone(),
            social_sharing_enabled: blog.social_sharing.enabled,
            medium_url: blog.medium_url.clone(),
        }
    }
}
