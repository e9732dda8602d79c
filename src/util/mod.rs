//! Display helpers for the text listing.
//!
//! - **Formatting**: release dates and elapsed progress
//! - **Text**: unicode-aware width, truncation and control-character stripping

mod format;
mod text;

pub use format::{format_progress, format_release_date, UNKNOWN_DATE};
pub use text::{display_width, strip_control_chars, truncate_to_width};
