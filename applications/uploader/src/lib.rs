/// Cantata Uploader - publish one song to the music catalog
pub mod config;
pub mod error;
pub mod pipeline;
