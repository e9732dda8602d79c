use super::types::{Episode, PlayedStatus, Podcast};

/// Which playback states to keep when filtering episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    pub unplayed: bool,
    pub played: bool,
    pub in_progress: bool,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self {
            unplayed: true,
            played: true,
            in_progress: true,
        }
    }
}

impl StatusFilter {
    /// A filter with every state disabled, for building up from flags.
    pub fn none() -> Self {
        Self {
            unplayed: false,
            played: false,
            in_progress: false,
        }
    }

    pub fn matches(&self, status: &PlayedStatus) -> bool {
        match status {
            PlayedStatus::Unplayed => self.unplayed,
            PlayedStatus::Played => self.played,
            PlayedStatus::InProgress { .. } => self.in_progress,
        }
    }

    fn keeps(&self, episode: &Episode) -> bool {
        self.matches(&episode.status)
    }
}

/// Keeps only episodes matching `filter`, then drops podcasts left with no
/// episodes. Podcasts that started out empty are dropped too.
pub fn filter_podcasts(podcasts: Vec<Podcast>, filter: &StatusFilter) -> Vec<Podcast> {
    podcasts
        .into_iter()
        .filter_map(|mut podcast| {
            podcast.episodes.retain(|ep| filter.keeps(ep));
            (!podcast.episodes.is_empty()).then_some(podcast)
        })
        .collect()
}

/// Stable, case-insensitive sort by podcast title.
pub fn sort_by_title(podcasts: &mut [Podcast]) {
    podcasts.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
}
