//! HTTP client module
//!
//! This module wraps the reqwest client used for the one submission POST.

use crate::config::Config;
use crate::error::{Result, SubmitError};
use crate::output::write_verbose_request_headers;
use crate::ssl::SslUtils;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, ClientBuilder};

pub mod auth;
pub mod request;
pub mod response;

use auth::Auth;
use request::Submission;

/// HTTP client wrapper
pub struct HttpClient {
    client: Client,
    user_agent: Option<String>,
    verbose: bool,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: &Config) -> Result<Self> {
        let builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        let builder = SslUtils::configure(builder, &config.ssl)?;
        let client = builder.build().map_err(SubmitError::Transport)?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            verbose: config.output.verbose && !config.output.silent,
        })
    }

    /// POST the submission as `multipart/form-data`
    pub async fn execute(&self, submission: Submission) -> Result<reqwest::Response> {
        let (url, form, credentials) = submission.into_form()?;

        let mut request = self.client.post(url).multipart(form);

        if let Some(user_agent) = &self.user_agent {
            request = request.header(USER_AGENT, user_agent);
        }

        if let Some(credentials) = &credentials {
            request = request.header(AUTHORIZATION, Auth::header_value(credentials));
        } else {
            log::warn!("no credentials configured; sending request without authentication");
        }

        let request = request.build().map_err(SubmitError::Transport)?;

        if self.verbose {
            write_verbose_request_headers(&request);
        }

        log::info!("POST {}", request.url());
        self.client.execute(request).await.map_err(transport_error)
    }
}

/// Fragments that mark a TLS-layer failure in rustls, native-tls and
/// OpenSSL error messages
const TLS_MARKERS: [&str; 6] = [
    "tls",
    "ssl",
    "certificate",
    "handshake",
    "corrupt message",
    "wrong version number",
];

/// Timeouts and TLS failures get their own variants; everything else stays
/// a transport error
pub(crate) fn transport_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::Timeout;
    }
    if let Some(detail) = tls_failure(&err) {
        return SubmitError::Ssl(format!("TLS failure: {}", detail));
    }
    SubmitError::Transport(err)
}

/// Message of the first cause in the source chain that reads like a TLS
/// error. The top-level error is skipped since it only names the URL.
fn tls_failure(err: &(dyn std::error::Error + 'static)) -> Option<String> {
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        let lower = message.to_ascii_lowercase();
        if TLS_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return Some(message);
        }
        source = cause.source();
    }
    None
}
