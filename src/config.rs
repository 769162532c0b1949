use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;

use crate::error::BlogError;
use crate::text_utils::is_blank;

#[derive(Deserialize, Clone, Debug)]
pub struct Disqus {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub shortname: String,
}

impl Default for Disqus {
    fn default() -> Self {
        Disqus { enabled: true, shortname: String::new() }
    }
}

impl Disqus {
    /// Comments are only embedded when a shortname is configured.
    pub fn is_enabled(&self) -> bool {
        self.enabled && !is_blank(&self.shortname)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SocialSharing {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SocialSharing {
    fn default() -> Self {
        SocialSharing { enabled: true }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Rss {
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for Rss {
    fn default() -> Self {
        Rss { max_items: default_max_items() }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Blog {
    pub title: String,
    pub description: String,
    publisher_url: String,
    #[serde(default)]
    pub publisher_name: String,
    #[serde(default)]
    pub default_author: String,
    #[serde(default)]
    pub medium_url: String,
    #[serde(default)]
    pub disqus: Disqus,
    #[serde(default)]
    pub social_sharing: SocialSharing,
    #[serde(default)]
    pub rss: Rss,
}

impl Blog {
    /// Publisher URL without its trailing slash, ready for concatenation.
    pub fn publisher_url(&self) -> &str {
        self.publisher_url.strip_suffix('/').unwrap_or(&self.publisher_url)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Paths {
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub blog: Blog,
    pub paths: Paths,
    pub server: Server,
    pub log: Option<Log>,
}

fn default_true() -> bool {
    true
}

fn default_max_items() -> usize {
    20
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content/blog")
}

impl Config {
    pub fn from_toml(cfg_content: &str) -> Result<Config, BlogError> {
        let mut cfg = toml::from_str::<Config>(cfg_content)
            .map_err(|e| BlogError::Config(format!("Error parsing configuration file: {}", e)))?;
        cfg.validate()?;

        cfg.paths = Paths {
            content_dir: parse_path(cfg.paths.content_dir),
            template_dir: parse_path(cfg.paths.template_dir),
            public_dir: parse_path(cfg.paths.public_dir),
        };

        Ok(cfg)
    }

    fn validate(&self) -> Result<(), BlogError> {
        let blog = &self.blog;
        if is_blank(&blog.title) {
            return Err(BlogError::Config("blog.title is required".to_string()));
        }
        if is_blank(&blog.description) {
            return Err(BlogError::Config("blog.description is required".to_string()));
        }
        if is_blank(&blog.publisher_url) {
            return Err(BlogError::Config("blog.publisher_url is required".to_string()));
        }
        if blog.rss.max_items < 1 {
            return Err(BlogError::Config("blog.rss.max_items must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Expands a leading `${exe_dir}` to the directory of the running executable.
fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    match exe_dir {
        Some(exe_dir) => PathBuf::from(str_path.replacen("${exe_dir}", &exe_dir.to_string_lossy(), 1)),
        None => path,
    }
}

pub fn read_config(cfg_path: &Path) -> Result<Config, BlogError> {
    let cfg_content = fs::read_to_string(cfg_path)
        .map_err(|e| BlogError::Config(format!("Error opening configuration file {}: {}", cfg_path.display(), e)))?;

    Config::from_toml(&cfg_content)
}

#[cfg(test)]
pub(crate) const TEST_CONFIG: &str = r##"
[blog]
title = "Test Blog"
description = "Test Description"
publisher_url = "https://test.example.com/"
publisher_name = "Test Publisher"
default_author = "Default Author"

[blog.disqus]
shortname = "test-blog"

[paths]
template_dir = "res/template"
public_dir = "res/public"

[server]
address = "127.0.0.1"
port = 8001
"##;
