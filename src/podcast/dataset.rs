use anyhow::{Context, Result};
use thiserror::Error;

use super::filter::sort_by_title;
use super::types::Podcast;

/// Errors from decoding a pre-resolved podcast dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Not a JSON array of podcasts, or an episode failed validation.
    #[error("Invalid podcast dataset")]
    Json(#[from] serde_json::Error),
}

/// Decodes a JSON dataset already in the podcast/episode shape.
///
/// Podcasts are sorted by title after decoding, matching how a freshly
/// loaded dataset is presented.
pub fn parse_dataset(json: &str) -> Result<Vec<Podcast>, DatasetError> {
    let mut podcasts: Vec<Podcast> = serde_json::from_str(json)?;
    sort_by_title(&mut podcasts);
    tracing::debug!(podcasts = podcasts.len(), "Loaded podcast dataset");
    Ok(podcasts)
}

/// Reads and decodes a dataset file. See [`parse_dataset`].
pub async fn load_dataset(path: &str) -> Result<Vec<Podcast>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read dataset file: {}", path))?;
    Ok(parse_dataset(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::PlayedStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_dataset_sorts_by_title() {
        let json = r#"[
            {"title": "zebra talk", "episodes": []},
            {"title": "Apple Hour", "episodes": [
                {"title": "One", "releaseDate": "Mon, 01 Jan 2024 10:00:00 GMT",
                 "playedStatus": "in progress", "progress": "61", "rawInfo": {"title": "One"}}
            ]}
        ]"#;

        let podcasts = parse_dataset(json).unwrap();
        assert_eq!(podcasts.len(), 2);
        assert_eq!(podcasts[0].title, "Apple Hour");
        assert_eq!(podcasts[1].title, "zebra talk");
        assert_eq!(
            podcasts[0].episodes[0].status,
            PlayedStatus::InProgress {
                progress: "61".to_string()
            }
        );
    }

    #[test]
    fn test_parse_dataset_missing_fields_default() {
        let podcasts = parse_dataset(r#"[{}]"#).unwrap();
        assert_eq!(podcasts.len(), 1);
        assert_eq!(podcasts[0].title, "");
        assert!(podcasts[0].episodes.is_empty());
    }

    #[test]
    fn test_parse_dataset_rejects_non_array() {
        let err = parse_dataset(r#"{"title": "x"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid podcast dataset"));
    }

    #[test]
    fn test_dataset_error_reports_serde_detail_once() {
        let err = anyhow::Error::from(parse_dataset(r#"{"x":1}"#).unwrap_err());
        let chain = format!("{:#}", err);
        assert!(chain.starts_with("Invalid podcast dataset: "), "{chain}");
        assert_eq!(chain.matches("expected a sequence").count(), 1, "{chain}");
    }

    #[test]
    fn test_parse_dataset_rejects_in_progress_without_progress() {
        let json = r#"[{"title": "p", "episodes": [{"title": "e", "playedStatus": "in progress"}]}]"#;
        assert!(matches!(parse_dataset(json), Err(DatasetError::Json(_))));
    }

    #[tokio::test]
    async fn test_load_dataset_missing_file() {
        let err = load_dataset("/tmp/podview_test_nonexistent_dataset.json")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset file"));
    }

    #[tokio::test]
    async fn test_load_dataset_from_file() {
        let dir = std::env::temp_dir().join("podview_dataset_test_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("default.json");
        std::fs::write(&path, r#"[{"title": "Solo", "episodes": []}]"#).unwrap();

        let podcasts = load_dataset(path.to_str().unwrap()).await.unwrap();
        assert_eq!(podcasts.len(), 1);
        assert_eq!(podcasts[0].title, "Solo");

        std::fs::remove_dir_all(&dir).ok();
    }
}
