//! Concurrent retrieval of the raw dataset text.

use crate::{FetchError, config::DataLocation, config::DatasetLocations, retry};

/// Unparsed contents of every configured file.
#[derive(Debug, Clone, Default)]
pub struct RawBundle {
    pub births: String,
    pub names: String,
    /// `None` when no demographic file is configured.
    pub demographics: Option<String>,
    pub boundaries: String,
}

/// Reads one location as text.
///
/// # Errors
///
/// Returns [`FetchError`] if the file cannot be read or the download fails.
pub async fn fetch_text(
    client: &reqwest::Client,
    location: &DataLocation,
) -> Result<String, FetchError> {
    log::debug!("Fetching {location}");

    let text = match location {
        DataLocation::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DataLocation::Url(url) => retry::send_text(|| client.get(url)).await?,
    };

    log::info!("Fetched {location} ({} bytes)", text.len());
    Ok(text)
}

/// Fetches every configured file concurrently.
///
/// All fetches must succeed; the first failure cancels the rest and is
/// returned as is.
///
/// # Errors
///
/// Returns the first [`FetchError`] encountered.
pub async fn fetch_all(
    client: &reqwest::Client,
    locations: &DatasetLocations,
) -> Result<RawBundle, FetchError> {
    let demographics = async {
        match &locations.demographics {
            Some(location) => fetch_text(client, location).await.map(Some),
            None => Ok(None),
        }
    };

    let (births, names, demographics, boundaries) = tokio::try_join!(
        fetch_text(client, &locations.births),
        fetch_text(client, &locations.names),
        demographics,
        fetch_text(client, &locations.boundaries),
    )?;

    Ok(RawBundle {
        births,
        names,
        demographics,
        boundaries,
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> DataLocation {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        DataLocation::Path(path)
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn reads_local_files() {
        let dir = scratch("birth_map_fetch_local");
        let location = write(&dir, "births.csv", "State,Year\n");
        let text = fetch_text(&reqwest::Client::new(), &location).await.unwrap();
        assert_eq!(text, "State,Year\n");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn fetches_everything_together() {
        let dir = scratch("birth_map_fetch_all");
        let locations = DatasetLocations {
            births: write(&dir, "b.csv", "births"),
            names: write(&dir, "n.csv", "names"),
            demographics: None,
            boundaries: write(&dir, "s.json", "{}"),
            strict: false,
        };

        let bundle = fetch_all(&reqwest::Client::new(), &locations).await.unwrap();
        assert_eq!(bundle.births, "births");
        assert_eq!(bundle.names, "names");
        assert_eq!(bundle.demographics, None);
        assert_eq!(bundle.boundaries, "{}");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn one_missing_file_fails_the_whole_load() {
        let dir = scratch("birth_map_fetch_missing");
        let locations = DatasetLocations {
            births: write(&dir, "b.csv", "births"),
            names: DataLocation::Path(dir.join("absent.csv")),
            demographics: Some(write(&dir, "d.csv", "demo")),
            boundaries: write(&dir, "s.json", "{}"),
            strict: false,
        };

        let err = fetch_all(&reqwest::Client::new(), &locations)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { ref path, .. } if path.ends_with("absent.csv")));
        std::fs::remove_dir_all(&dir).ok();
    }
}
