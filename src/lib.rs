//! Resolve OPML podcast exports into podcasts and episodes.
//!
//! The core is [`feed::resolve`]: a pure function from OPML text to a flat
//! `Vec<Podcast>`. Everything else supports the `podview` command line.

pub mod config;
pub mod feed;
pub mod podcast;
pub mod render;
pub mod util;
