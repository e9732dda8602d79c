//! Podcast data model and the helpers that operate on a resolved list.
//!
//! - [`types`] - `Podcast`, `Episode`, `PlayedStatus` and their JSON shape
//! - [`filter`] - status filtering and title sorting for display
//! - [`dataset`] - loading a list that is already in the resolved shape

mod dataset;
mod filter;
mod types;

pub use dataset::{load_dataset, parse_dataset, DatasetError};
pub use filter::{filter_podcasts, sort_by_title, StatusFilter};
pub use types::{Attributes, Episode, MissingProgress, PlayedStatus, Podcast};
