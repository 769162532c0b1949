pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod post;
pub mod post_repository;
pub mod server;
pub mod view;
mod test_data;
mod text_utils;
mod util;
