//! The submission operation: upload, read the reply, turn it into text.

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::config::Config;
use crate::error::Result;
use crate::http::request::Submission;
use crate::http::response::{classify_status, replace_line_breaks};
use crate::http::{transport_error, HttpClient};
use crate::output::decode_body_with_charset;

/// What the server answered, after `<br />` substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub status: StatusCode,
    pub text: String,
}

/// Sends one run file to the evaluation endpoint
pub struct Submitter {
    client: HttpClient,
    config: Config,
}

impl Submitter {
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Perform exactly one POST.
    ///
    /// The file is opened first, so a missing or unreadable file fails with
    /// `FileAccess` before any connection is attempted. Unless status
    /// checking is turned off, non-2xx replies become rejection errors.
    pub async fn submit(&self) -> Result<SubmissionOutcome> {
        let submission = Submission::open(&self.config).await?;
        let response = self.client.execute(submission).await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await.map_err(transport_error)?;
        log::debug!("received {} ({} bytes)", status, bytes.len());

        let body = decode_body_with_charset(bytes.to_vec(), content_type.as_deref())?;
        let text = replace_line_breaks(&body);

        let text = if self.config.check_status {
            classify_status(status, text)?
        } else {
            if !status.is_success() {
                log::warn!("server answered {}; printing body anyway", status);
            }
            text
        };

        Ok(SubmissionOutcome { status, text })
    }
}
