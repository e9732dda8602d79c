//! OPML resolution: from subscription export text to podcasts and episodes.
//!
//! - [`outline`] - XML text to an element tree, using `quick-xml`'s pull reader
//! - [`opml`] - the outline walk that classifies podcasts, folders and episodes
//!
//! # Example
//!
//! ```
//! use podview::feed::resolve;
//! use podview::podcast::PlayedStatus;
//!
//! let opml = r#"<opml version="2.0"><body>
//!   <outline title="Show A" xmlUrl="http://x">
//!     <outline title="Ep1" played="1"/>
//!   </outline>
//! </body></opml>"#;
//!
//! let podcasts = resolve(opml).unwrap();
//! assert_eq!(podcasts[0].title, "Show A");
//! assert_eq!(podcasts[0].episodes[0].status, PlayedStatus::Played);
//! ```

mod opml;
mod outline;

pub use opml::{parse, resolve, resolve_with_depth, OpmlError};
pub use outline::{decode, outlines, OutlineNode, DEFAULT_MAX_DEPTH};
