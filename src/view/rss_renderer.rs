use std::io::Cursor;

use chrono::NaiveTime;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::Config;
use crate::error::BlogError;
use crate::post::Post;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>Test Blog</title>
  <link>https://test.example.com/blog</link>
  <description>Test Description</description>
  <language>en</language>
  <item>
    <title>Test Post Title</title>
    <link>https://test.example.com/blog/test-post</link>
    <guid isPermaLink="true">https://test.example.com/blog/test-post</guid>
    <author>Test Author</author>
    <pubDate>Sun, 14 Dec 2025 00:00:00 +0000</pubDate>
    <description>This is a test post description</description>
  </item>
</channel>
</rss>
*/

/// Channel level data of the feed.
#[derive(Debug, Clone)]
pub struct ChannelMeta {
    pub title: String,
    pub description: String,
    /// Base URL without trailing slash
    pub publisher_url: String,
}

impl ChannelMeta {
    pub fn from_config(config: &Config) -> Self {
        ChannelMeta {
            title: config.blog.title.clone(),
            description: config.blog.description.clone(),
            publisher_url: config.blog.publisher_url().to_string(),
        }
    }

    pub fn link(&self) -> String {
        format!("{}/blog", self.publisher_url)
    }
}

pub struct FeedBuilder;

impl FeedBuilder {
    /// RSS 2.0 document with the first `max_items` posts, in the order given.
    pub fn build_feed(posts: &[Post], channel: &ChannelMeta, max_items: usize) -> Result<String, BlogError> {
        let xml = Self::render(posts, channel, max_items)?;
        Ok(String::from_utf8(xml)?)
    }

    fn render(posts: &[Post], channel: &ChannelMeta, max_items: usize) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", &channel.title)?;
        push_text(&mut writer, "link", &channel.link())?;
        push_text(&mut writer, "description", &channel.description)?;
        push_text(&mut writer, "language", "en")?;

        for post in posts.iter().take(max_items) {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", post.title())?;

            let link = format!("{}{}", channel.publisher_url, post.url());
            push_text(&mut writer, "link", &link)?;

            let mut guid = BytesStart::new("guid");
            guid.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid))?;
            writer.write_event(Event::Text(BytesText::new(&link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_text(&mut writer, "author", post.author())?;

            // Midnight UTC of the publication day
            let published = post.published_date().and_time(NaiveTime::MIN).and_utc();
            push_text(&mut writer, "pubDate", &published.to_rfc2822())?;

            push_text(&mut writer, "description", post.description())?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::config::TEST_CONFIG;
    use crate::post::PostFields;

    use super::*;

    fn create_post(slug: &str, day: u32) -> Post {
        Post::new(PostFields {
            slug: slug.to_string(),
            title: format!("title-of-{}", slug),
            description: format!("summary of {} & more", slug),
            raw_content: "**body**".to_string(),
            html_content: "<p><strong>body</strong></p>".to_string(),
            published_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            updated_date: None,
            hero_image: String::new(),
            author: "Thiago".to_string(),
            tags: vec![],
            draft: false,
        }).unwrap()
    }

    fn channel() -> ChannelMeta {
        ChannelMeta::from_config(&Config::from_toml(TEST_CONFIG).unwrap())
    }

    #[test]
    fn render_xml() {
        let posts = vec![create_post("post-2", 2), create_post("post-1", 1)];
        let xml = FeedBuilder::build_feed(&posts, &channel(), 20).unwrap();
        assert_eq!(xml, EXPECTED);
    }

    #[test]
    fn test_single_post_feed() {
        let posts = vec![create_post("test-post", 14)];
        let xml = FeedBuilder::build_feed(&posts, &channel(), 20).unwrap();
        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("<pubDate>Sun, 14 Jan 2024 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<channel><title>Test Blog</title>"));
        assert!(!xml.contains("<strong>"));
    }

    #[test]
    fn test_max_items_keeps_order() {
        let posts: Vec<Post> = (1..=5).rev().map(|d| create_post(&format!("post-{}", d), d)).collect();
        let xml = FeedBuilder::build_feed(&posts, &channel(), 2).unwrap();
        assert_eq!(xml.matches("<item>").count(), 2);
        let first = xml.find("/blog/post-5<").unwrap();
        let second = xml.find("/blog/post-4<").unwrap();
        assert!(first < second);
        assert!(!xml.contains("post-3"));
    }

    #[test]
    fn test_empty_feed() {
        let xml = FeedBuilder::build_feed(&[], &channel(), 20).unwrap();
        assert!(!xml.contains("<item>"));
        assert!(xml.ends_with("<language>en</language></channel></rss>"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Test Blog</title><link>https://test.example.com/blog</link><description>Test Description</description><language>en</language><item><title>title-of-post-2</title><link>https://test.example.com/blog/post-2</link><guid isPermaLink="true">https://test.example.com/blog/post-2</guid><author>Thiago</author><pubDate>Tue, 2 Jan 2024 00:00:00 +0000</pubDate><description>summary of post-2 &amp; more</description></item><item><title>title-of-post-1</title><link>https://test.example.com/blog/post-1</link><guid isPermaLink="true">https://test.example.com/blog/post-1</guid><author>Thiago</author><pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate><description>summary of post-1 &amp; more</description></item></channel></rss>"##;
}
