use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[blog]
title = "My Blog"
description = "Notes about things I build"
# Absolute URL of the site, used for feed links
publisher_url = "https://example.com"
publisher_name = ""
# Used when a post has no author in its front matter
default_author = ""
medium_url = ""

[blog.disqus]
enabled = true
shortname = ""

[blog.social_sharing]
enabled = true

[blog.rss]
max_items = 20

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
content_dir = "content/blog"
template_dir = "res/template"
public_dir = "res/public"

[server]
address = "0.0.0.0"
port = 8001

# Remove this section to log to the console only
[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use markblog::config::Config;

    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let cfg = Config::from_toml(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.blog.rss.max_items, 20);
        assert!(!cfg.blog.disqus.is_enabled());
        assert!(cfg.log.is_some());
    }
}
