//! Configuration management for nes-submit

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SubmitError};
use crate::utils::FileUtils;

/// Evaluation endpoint used when nothing else is configured
pub const DEFAULT_URL: &str = "http://boston.lti.cs.cmu.edu/classes/11-642/HW/HTS/nes.cgi";

/// Relevance judgments the evaluation runs against
pub const DEFAULT_QREL: &str = "cw09a.diversity.1-200.qrel.indexed";

pub const DEFAULT_HWID: &str = "HW5";

pub const DEFAULT_FILE: &str = "./QryEval/HW5-Exp-1.1b.teIn";

/// Multipart field the uploaded file is bound to
pub const FILE_FIELD: &str = "infile";

/// The two plain text fields sent alongside the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub qrel: String,
    pub hwid: String,
}

impl FormFields {
    /// Fields in wire order
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [("qrel", self.qrel.as_str()), ("hwid", self.hwid.as_str())]
    }
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            qrel: DEFAULT_QREL.to_string(),
            hwid: DEFAULT_HWID.to_string(),
        }
    }
}

/// Basic authentication credential pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// SSL/TLS configuration
#[derive(Debug, Clone)]
pub struct SslConfig {
    pub verify_certs: bool,
    pub ca_cert_file: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub file: Option<PathBuf>,
    pub verbose: bool,
    pub silent: bool,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub form: FormFields,
    pub file_path: PathBuf,
    pub credentials: Option<Credentials>,
    pub user_agent: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub check_status: bool,
    pub ssl: SslConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_string(),
            form: FormFields::default(),
            file_path: PathBuf::from(DEFAULT_FILE),
            credentials: None,
            user_agent: Some(format!("nes-submit/{}", crate::VERSION)),
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
            check_status: true,
            ssl: SslConfig {
                verify_certs: true,
                ca_cert_file: None,
            },
            output: OutputConfig::default(),
        }
    }
}

/// On-disk configuration; every key is optional and overrides the defaults
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub qrel: Option<String>,
    pub hwid: Option<String>,
    pub file: Option<PathBuf>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub insecure: Option<bool>,
    pub cacert: Option<PathBuf>,
}

impl ConfigFile {
    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SubmitError::Config(format!("Cannot read config file {:?}: {}", path, e))
        })?;
        Self::parse(&raw)
            .map_err(|e| SubmitError::Config(format!("Invalid config file {:?}: {}", path, e)))
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Overlay the values present in the file onto `config`. Paths get the
    /// same `~` expansion as their command line counterparts.
    pub fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(qrel) = self.qrel {
            config.form.qrel = qrel;
        }
        if let Some(hwid) = self.hwid {
            config.form.hwid = hwid;
        }
        if let Some(file) = self.file {
            config.file_path = FileUtils::expand_path_buf(&file)?;
        }
        if let Some(username) = self.username {
            config.credentials = Some(Credentials {
                username,
                password: self.password.unwrap_or_default(),
            });
        } else if let (Some(creds), Some(password)) = (config.credentials.as_mut(), self.password)
        {
            creds.password = password;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(insecure) = self.insecure {
            config.ssl.verify_certs = !insecure;
        }
        if let Some(cacert) = self.cacert {
            config.ssl.ca_cert_file = Some(FileUtils::expand_path_buf(&cacert)?);
        }
        Ok(())
    }
}
