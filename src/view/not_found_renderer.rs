use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::view::site::SiteView;

#[derive(ramhorns::Content)]
struct NotFoundPage<'a> {
    site: &'a SiteView,
    slug: &'a str,
}

pub struct NotFoundRenderer<'a> {
    pub template: Template<'a>,
}

impl NotFoundRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<NotFoundRenderer> {
        let template = Template::new(tpl_src)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Error parsing not found template: {}", e)))?;
        Ok(NotFoundRenderer { template })
    }

    pub fn render(&self, site: &SiteView, slug: &str) -> String {
        self.template.render(&NotFoundPage { site, slug })
    }
}
