//! Utility functions and helpers

use crate::error::{Result, SubmitError};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;


/// URL validation and parsing utilities
pub struct UrlUtils;

impl UrlUtils {
    /// Validate and normalize URL
    pub fn validate_url(input: &str) -> Result<Url> {
        // Add http:// if no scheme is provided
        let url_str = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        let url = Url::parse(&url_str)
            .map_err(|e| SubmitError::InvalidUrl(format!("Invalid URL '{}': {}", input, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SubmitError::InvalidUrl(format!(
                "Unsupported scheme '{}' in '{}'",
                other, input
            ))),
        }
    }
}

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        let rest = match path.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
            _ => return Ok(PathBuf::from(path)),
        };

        match dirs::home_dir() {
            Some(home_dir) if rest.is_empty() => Ok(home_dir),
            Some(home_dir) => Ok(home_dir.join(rest)),
            None => Err(SubmitError::Config(
                "Cannot determine home directory".to_string(),
            )),
        }
    }

    /// `expand_path` for paths that arrive already typed, e.g. from a
    /// config file. Non UTF-8 paths are returned unchanged.
    pub fn expand_path_buf(path: &Path) -> Result<PathBuf> {
        match path.to_str() {
            Some(raw) => Self::expand_path(raw),
            None => Ok(path.to_path_buf()),
        }
    }

    /// Check that the path names an existing regular file
    pub fn check_file_readable(path: &Path) -> Result<()> {
        let metadata = std::fs::metadata(path).map_err(|source| SubmitError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(SubmitError::FileAccess {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        Ok(())
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse timeout values (supports suffixes like 's', 'm', 'h')
    pub fn parse_timeout(input: &str) -> Result<Duration> {
        if let Ok(seconds) = input.parse::<u64>() {
            return Ok(Duration::from_secs(seconds));
        }

        let (number_part, suffix) = if let Some(stripped) = input.strip_suffix('s') {
            (stripped, 1)
        } else if let Some(stripped) = input.strip_suffix('m') {
            (stripped, 60)
        } else if let Some(stripped) = input.strip_suffix('h') {
            (stripped, 3600)
        } else {
            return Err(SubmitError::Config(format!(
                "Invalid timeout format: '{}'. Use number with optional suffix (s/m/h)",
                input
            )));
        };

        let number: u64 = number_part.parse().map_err(|_| {
            SubmitError::Config(format!("Invalid timeout number: '{}'", number_part))
        })?;

        let seconds = number.checked_mul(suffix).ok_or_else(|| {
            SubmitError::Config(format!("Timeout out of range: '{}'", input))
        })?;

        Ok(Duration::from_secs(seconds))
    }
}
