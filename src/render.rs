//! Output for the command line: pretty JSON or a plain-text listing.

use std::fmt::Write;

use crate::podcast::{Episode, Podcast};
use crate::util::{format_progress, format_release_date, strip_control_chars, truncate_to_width};

const UNTITLED_EPISODE: &str = "Untitled Episode";
/// Width of the longest status label, `in progress`.
const STATUS_WIDTH: usize = 11;

pub fn render_json(podcasts: &[Podcast]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(podcasts)
}

/// Renders one header per podcast followed by an indented line per episode.
///
/// Titles are stripped of terminal control sequences, kept to one line and
/// truncated to `title_width` columns.
pub fn render_text(podcasts: &[Podcast], title_width: usize) -> String {
    if podcasts.is_empty() {
        return "No podcasts found.\n".to_string();
    }

    let mut out = String::new();
    for (i, podcast) in podcasts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let count = podcast.episodes.len();
        let _ = writeln!(
            out,
            "{} ({} episode{})",
            clean_title(&podcast.title, title_width),
            count,
            if count == 1 { "" } else { "s" }
        );
        for episode in &podcast.episodes {
            let _ = writeln!(out, "  {}", episode_line(episode, title_width));
        }
    }
    out
}

fn clean_title(title: &str, width: usize) -> String {
    truncate_to_width(&single_line(title), width).into_owned()
}

/// Control sequences stripped and line breaks or tabs turned into spaces,
/// so a field can never start a row of its own.
fn single_line(text: &str) -> String {
    strip_control_chars(text)
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

fn episode_line(episode: &Episode, title_width: usize) -> String {
    let title = if episode.title.is_empty() {
        UNTITLED_EPISODE.to_string()
    } else {
        clean_title(&episode.title, title_width)
    };
    let mut line = format!(
        "[{:<width$}] {} | Released {}",
        episode.status.label(),
        title,
        single_line(&format_release_date(&episode.release_date)),
        width = STATUS_WIDTH
    );
    if let Some(progress) = episode.status.progress().and_then(format_progress) {
        let _ = write!(line, " | Progress {}", progress);
    }
    line
}
