use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Attributes
// ============================================================================

/// Attribute set of an outline element, in document order.
///
/// Lookups return the first occurrence of a name. Serializes as a JSON
/// object whose keys keep the order they had in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Returns the value of `name`, if the attribute is present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value of `name` only when it is present and not empty.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut attributes = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    attributes.push((key, value));
                }
                Ok(Attributes(attributes))
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

// ============================================================================
// Played Status
// ============================================================================

/// Playback state of an episode.
///
/// `InProgress` carries the raw elapsed-seconds text exactly as it appeared
/// in the `progress` attribute; the other states have no progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayedStatus {
    Unplayed,
    Played,
    InProgress { progress: String },
}

impl PlayedStatus {
    /// Classifies an outline's attributes. First match wins:
    /// a non-empty `progress`, then `played="1"`, then unplayed.
    pub fn classify(attributes: &Attributes) -> Self {
        if let Some(progress) = attributes.get_non_empty("progress") {
            PlayedStatus::InProgress {
                progress: progress.to_string(),
            }
        } else if attributes.get("played") == Some("1") {
            PlayedStatus::Played
        } else {
            PlayedStatus::Unplayed
        }
    }

    /// Label used in JSON output and the text listing.
    pub fn label(&self) -> &'static str {
        match self {
            PlayedStatus::Unplayed => "unplayed",
            PlayedStatus::Played => "played",
            PlayedStatus::InProgress { .. } => "in progress",
        }
    }

    pub fn progress(&self) -> Option<&str> {
        match self {
            PlayedStatus::InProgress { progress } => Some(progress),
            _ => None,
        }
    }
}

impl fmt::Display for PlayedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Podcast / Episode
// ============================================================================

/// A podcast subscription resolved from an outline node carrying `xmlUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podcast {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// One episode, resolved from a direct child outline of a podcast node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EpisodeRecord", try_from = "EpisodeRecord")]
pub struct Episode {
    pub title: String,
    /// Raw `pubDate` text, unparsed.
    pub release_date: String,
    pub status: PlayedStatus,
    /// Every attribute of the source outline, verbatim.
    pub raw_info: Attributes,
}

impl Episode {
    /// Builds an episode from an outline's attribute set, defaulting absent
    /// fields to empty strings.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        Self {
            title: attributes.get("title").unwrap_or_default().to_string(),
            release_date: attributes.get("pubDate").unwrap_or_default().to_string(),
            status: PlayedStatus::classify(attributes),
            raw_info: attributes.clone(),
        }
    }
}

/// Rejected when a dataset marks an episode in progress without a position.
#[derive(Debug, Error)]
#[error("episode {title:?} is marked \"in progress\" but has no progress")]
pub struct MissingProgress {
    pub title: String,
}

#[derive(Serialize, Deserialize)]
enum StatusLabel {
    #[serde(rename = "unplayed")]
    Unplayed,
    #[serde(rename = "played")]
    Played,
    #[serde(rename = "in progress")]
    InProgress,
}

/// JSON shape of an episode: flat status label plus optional `progress`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    release_date: String,
    played_status: StatusLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    progress: Option<String>,
    #[serde(default)]
    raw_info: Attributes,
}

impl From<Episode> for EpisodeRecord {
    fn from(episode: Episode) -> Self {
        let (played_status, progress) = match episode.status {
            PlayedStatus::Unplayed => (StatusLabel::Unplayed, None),
            PlayedStatus::Played => (StatusLabel::Played, None),
            PlayedStatus::InProgress { progress } => (StatusLabel::InProgress, Some(progress)),
        };
        Self {
            title: episode.title,
            release_date: episode.release_date,
            played_status,
            progress,
            raw_info: episode.raw_info,
        }
    }
}

impl TryFrom<EpisodeRecord> for Episode {
    type Error = MissingProgress;

    fn try_from(record: EpisodeRecord) -> Result<Self, Self::Error> {
        let status = match record.played_status {
            StatusLabel::Unplayed => PlayedStatus::Unplayed,
            StatusLabel::Played => PlayedStatus::Played,
            StatusLabel::InProgress => match record.progress {
                Some(progress) if !progress.is_empty() => PlayedStatus::InProgress { progress },
                _ => {
                    return Err(MissingProgress {
                        title: record.title,
                    })
                }
            },
        };
        Ok(Self {
            title: record.title,
            release_date: record.release_date,
            status,
            raw_info: record.raw_info,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
