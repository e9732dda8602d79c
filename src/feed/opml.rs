use anyhow::{Context, Result};
use thiserror::Error;

use super::outline::{decode, outlines, OutlineNode, DEFAULT_MAX_DEPTH};
use crate::podcast::{Episode, Podcast};

/// Errors that can occur while resolving an OPML document.
#[derive(Debug, Error)]
pub enum OpmlError {
    /// The text is not well-formed XML, or nests deeper than allowed.
    #[error("Malformed OPML document: {0}")]
    MalformedDocument(String),
}

/// Reads an OPML file from disk and resolves it into podcasts.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text or if the
/// content is not well-formed XML (see [`resolve`]).
pub async fn parse(path: &str, max_depth: usize) -> Result<Vec<Podcast>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read OPML file: {}", path))?;
    Ok(resolve_with_depth(content.as_str(), max_depth)?)
}

/// Resolves OPML text into a flat list of podcasts.
///
/// Every `<outline>` under `opml > body` is visited depth-first in document
/// order. An outline with a non-empty `xmlUrl` becomes a [`Podcast`] whose
/// episodes are its direct child outlines. Its children are also searched
/// for further podcasts, exactly like the children of a folder outline
/// (one without `xmlUrl`).
///
/// Empty or absent input resolves to an empty list. Missing attributes
/// default to empty strings and are never an error.
///
/// # Errors
///
/// [`OpmlError::MalformedDocument`] if the text is not well-formed XML. No
/// partial result is returned.
pub fn resolve<'a>(content: impl Into<Option<&'a str>>) -> Result<Vec<Podcast>, OpmlError> {
    resolve_with_depth(content, DEFAULT_MAX_DEPTH)
}

/// [`resolve`] with an explicit element nesting limit.
pub fn resolve_with_depth<'a>(
    content: impl Into<Option<&'a str>>,
    max_depth: usize,
) -> Result<Vec<Podcast>, OpmlError> {
    let content = match content.into() {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(Vec::new()),
    };

    let root = decode(content, max_depth)?;
    let body = root
        .as_ref()
        .filter(|node| node.name == "opml")
        .and_then(|opml| opml.child("body"));

    let mut podcasts = Vec::new();
    collect_podcasts(body, &mut podcasts);

    tracing::debug!(
        podcasts = podcasts.len(),
        episodes = podcasts.iter().map(|p| p.episodes.len()).sum::<usize>(),
        "Resolved OPML document"
    );
    Ok(podcasts)
}

/// Pre-order walk over the outlines nested in `parent`.
fn collect_podcasts(parent: Option<&OutlineNode>, podcasts: &mut Vec<Podcast>) {
    for node in outlines(parent) {
        if node.attributes.get_non_empty("xmlUrl").is_some() {
            podcasts.push(podcast_from(node));
        }
        collect_podcasts(Some(node), podcasts);
    }
}

fn podcast_from(node: &OutlineNode) -> Podcast {
    Podcast {
        title: node.attributes.get("title").unwrap_or_default().to_string(),
        episodes: outlines(Some(node))
            .map(|child| Episode::from_attributes(&child.attributes))
            .collect(),
    }
}
