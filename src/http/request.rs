//! Request descriptor and multipart form construction

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Body;
use url::Url;

use crate::config::{Config, Credentials, FormFields, FILE_FIELD};
use crate::error::{Result, SubmitError};
use crate::utils::{FileUtils, UrlUtils};

/// The uploaded file, held open until the request body has been sent
#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub length: u64,
    file: tokio::fs::File,
}

impl FilePart {
    /// Open `path` for upload. Fails with `FileAccess` if it is missing,
    /// not a regular file, or unreadable.
    pub async fn open(path: &Path) -> Result<Self> {
        FileUtils::check_file_readable(path)?;

        let access_error = |source| SubmitError::FileAccess {
            path: path.to_path_buf(),
            source,
        };
        let file = tokio::fs::File::open(path).await.map_err(access_error)?;
        let length = file.metadata().await.map_err(access_error)?.len();

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FILE_FIELD.to_string());

        Ok(Self {
            file_name,
            length,
            file,
        })
    }

    fn into_part(self) -> Result<Part> {
        let part = Part::stream_with_length(Body::from(self.file), self.length)
            .file_name(self.file_name)
            .mime_str("application/octet-stream")?;
        Ok(part)
    }
}

/// Everything one submission needs; built right before the request and
/// consumed by it.
#[derive(Debug)]
pub struct Submission {
    pub url: Url,
    pub fields: FormFields,
    pub file: FilePart,
    pub credentials: Option<Credentials>,
}

impl Submission {
    /// Build the descriptor from configuration, opening the upload file.
    pub async fn open(config: &Config) -> Result<Self> {
        let url = UrlUtils::validate_url(&config.url)?;
        let file = FilePart::open(&config.file_path).await?;
        log::debug!(
            "opened {:?} ({} bytes) as {}",
            config.file_path,
            file.length,
            FILE_FIELD
        );

        Ok(Self {
            url,
            fields: config.form.clone(),
            file,
            credentials: config.credentials.clone(),
        })
    }

    /// Split into the target URL, the multipart body and the credentials
    pub fn into_form(self) -> Result<(Url, Form, Option<Credentials>)> {
        let mut form = Form::new();
        for (name, value) in self.fields.pairs() {
            form = form.text(name, value.to_string());
        }
        let form = form.part(FILE_FIELD, self.file.into_part()?);
        Ok((self.url, form, self.credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::{FilePart, Submission};
    use crate::config::Config;
    use crate::error::SubmitError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn file_part_reports_missing_file() {
        let temp = tempdir().expect("tempdir");
        let err = FilePart::open(&temp.path().join("missing.teIn"))
            .await
            .expect_err("missing file");
        assert!(matches!(err, SubmitError::FileAccess { .. }));
    }

    #[tokio::test]
    async fn file_part_uses_final_path_component() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("HW5-Exp-1.1b.teIn");
        std::fs::write(&path, "51 Q0 doc 1 1.0 run\n").expect("write");

        let part = FilePart::open(&path).await.expect("open");
        assert_eq!(part.file_name, "HW5-Exp-1.1b.teIn");
        assert_eq!(part.length, 20);
    }

    #[tokio::test]
    async fn submission_validates_url_before_opening_file() {
        let config = Config {
            url: "ftp://example.com/nes.cgi".to_string(),
            ..Config::default()
        };
        let err = Submission::open(&config).await.expect_err("bad url");
        assert!(matches!(err, SubmitError::InvalidUrl(_)));
    }
}
