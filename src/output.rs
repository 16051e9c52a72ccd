//! Output formatting and display utilities

use crate::config::OutputConfig;
use crate::error::Result;
use encoding_rs::{Encoding, UTF_8};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use url::Url;


/// Output writer that handles file vs stdout
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write content to configured output
    pub fn write(&self, content: &str) -> Result<()> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(content, file_path)
        } else {
            self.write_to_stdout(content)
        }
    }

    /// Write error message
    pub fn write_error(&self, message: &str) {
        if !self.config.silent {
            eprintln!("nes-submit: error: {}", message);
        }
    }

    fn write_to_file(&self, content: &str, file_path: &Path) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_to_stdout(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", content)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Pull the `charset` parameter out of a Content-Type value
pub fn extract_charset(content_type: Option<&str>) -> Option<String> {
    content_type?.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_ascii_lowercase())
        } else {
            None
        }
    })
}

/// Decode a response body using its declared charset, falling back to
/// UTF-8. Invalid sequences are replaced rather than rejected.
pub fn decode_body_with_charset(body: Vec<u8>, content_type: Option<&str>) -> Result<String> {
    let encoding = extract_charset(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, had_errors) = encoding.decode(&body);
    if had_errors {
        log::debug!("response body is not valid {}", encoding.name());
    }
    Ok(text.into_owned())
}

/// Dump the outgoing request line and headers to stderr, curl style
pub fn write_verbose_request_headers(request: &reqwest::Request) {
    let url = request.url();
    eprintln!("> {} {}", request.method(), request_path(url));

    if let Some(host) = url.host_str() {
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        eprintln!("> Host: {}", host);
    }

    for (name, value) in request.headers().iter() {
        if *name == reqwest::header::AUTHORIZATION {
            eprintln!("> {}: Basic <redacted>", name);
            continue;
        }
        let value = value.to_str().unwrap_or("<non-utf8>");
        eprintln!("> {}: {}", name, value);
    }
    eprintln!(">");
}

fn request_path(url: &Url) -> String {
    match url[url::Position::BeforePath..].trim() {
        "" => "/".to_string(),
        path => path.to_string(),
    }
}
