pub mod config;
pub mod logging;

pub mod coordinate;
pub mod downloader;
pub mod fetch;
pub mod layout;
pub mod manifest;
pub mod resolver;
