//! Dataset download and CSV parsing.
//!
//! This module fetches the HR dataset over HTTP and parses it into a raw
//! in-memory table (header record plus string rows). An optional cache
//! file lets a run survive the remote source being unavailable.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default location of the HR capstone dataset.
pub const DATASET_URL: &str = "https://raw.githubusercontent.com/rhafaelc/Google-Advanced-Data-Analytics-Capstone/refs/heads/main/HR_capstone_dataset.csv";

/// Errors raised while obtaining or parsing the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not well-formed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no header row")]
    MissingHeader,
}

/// The parsed dataset before cleaning: one header record and the data
/// rows exactly as they appeared in the CSV.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: csv::StringRecord,
    pub rows: Vec<csv::StringRecord>,
}

impl RawTable {
    /// Parse CSV text (with a header row) into a raw table.
    pub fn parse(data: &str) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(LoadError::MissingHeader);
        }

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, csv::Error>>()?;

        debug!("Parsed {} rows, {} columns", rows.len(), headers.len());
        Ok(RawTable { headers, rows })
    }
}

/// Where the raw CSV actually came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Fetched from the remote URL.
    Remote(String),
    /// Read from the cache file after a failed fetch.
    Cache(PathBuf),
    /// Read from a local file given on the command line.
    LocalFile(PathBuf),
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Remote(url) => write!(f, "{}", url),
            DatasetSource::Cache(path) => write!(f, "cache: {}", path.display()),
            DatasetSource::LocalFile(path) => write!(f, "file: {}", path.display()),
        }
    }
}

/// Options controlling how the dataset is obtained.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Read this local CSV file instead of fetching.
    pub local_file: Option<PathBuf>,
    /// Cache file: written after a successful fetch, read as a fallback
    /// when the fetch fails.
    pub cache_file: Option<PathBuf>,
    /// Show a spinner while downloading.
    pub show_progress: bool,
}

/// Obtain the raw dataset and parse it into a table.
///
/// Resolution order: a local file, if given, is used directly; otherwise
/// the URL is fetched, with the cache file (when configured) written on
/// success and used as a fallback on failure.
pub async fn fetch_dataset(
    url: &str,
    options: &LoadOptions,
) -> Result<(RawTable, DatasetSource), LoadError> {
    if let Some(ref path) = options.local_file {
        info!("Loading dataset from local file: {}", path.display());
        let data = read_file(path)?;
        return Ok((RawTable::parse(&data)?, DatasetSource::LocalFile(path.clone())));
    }

    match fetch_csv(url, options.show_progress).await {
        Ok(data) => {
            if let Some(ref cache) = options.cache_file {
                if let Err(e) = std::fs::write(cache, &data) {
                    warn!("Failed to write cache file {}: {}", cache.display(), e);
                } else {
                    debug!("Cached raw dataset at {}", cache.display());
                }
            }
            Ok((RawTable::parse(&data)?, DatasetSource::Remote(url.to_string())))
        }
        Err(fetch_err) => {
            if let Some(ref cache) = options.cache_file {
                if cache.exists() {
                    warn!("Fetch failed ({}); falling back to cache", fetch_err);
                    let data = read_file(cache)?;
                    return Ok((RawTable::parse(&data)?, DatasetSource::Cache(cache.clone())));
                }
            }
            Err(fetch_err)
        }
    }
}

/// Fetch the CSV payload over HTTP.
async fn fetch_csv(url: &str, show_progress: bool) -> Result<String, LoadError> {
    info!("Fetching dataset: {}", url);

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Downloading {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = async {
        let response = reqwest::get(url).await.map_err(|e| LoadError::Network {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| LoadError::Network {
            url: url.to_string(),
            source: e,
        })
    }
    .await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if let Ok(ref data) = result {
        debug!("Downloaded {} bytes", data.len());
    }

    result
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::File {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
satisfaction_level,last_evaluation,number_project,average_montly_hours,time_spend_company,Work_accident,left,promotion_last_5years,Department,salary
0.38,0.53,2,157,3,0,1,0,sales,low
0.80,0.86,5,262,6,0,1,0,sales,medium
";

    #[test]
    fn test_parse_sample() {
        let table = RawTable::parse(SAMPLE).unwrap();
        assert_eq!(table.headers.len(), 10);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(&table.headers[3], "average_montly_hours");
        assert_eq!(&table.rows[0][0], "0.38");
    }

    #[test]
    fn test_parse_fixture() {
        let table = RawTable::parse(include_str!("../../fixtures/hr_sample.csv")).unwrap();
        assert_eq!(table.headers.len(), 10);
        assert!(table.rows.len() >= 10);
    }

    #[test]
    fn test_parse_ragged_row_is_error() {
        let data = "a,b,c\n1,2,3\n4,5\n";
        assert!(RawTable::parse(data).is_err());
    }

    #[test]
    fn test_parse_header_only() {
        let table = RawTable::parse("a,b,c\n").unwrap();
        assert!(table.rows.is_empty());
    }

    #[tokio::test]
    async fn test_local_file_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hr.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let options = LoadOptions {
            local_file: Some(path.clone()),
            ..Default::default()
        };
        // The URL is intentionally unreachable; the local file wins.
        let (table, source) = fetch_dataset("http://invalid.localhost", &options)
            .await
            .unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(source, DatasetSource::LocalFile(path));
    }
}
