//! SSL/TLS configuration and utilities

use crate::config::SslConfig;
use crate::error::{Result, SubmitError};
use reqwest::{Certificate, ClientBuilder};
use std::path::Path;

/// SSL/TLS certificate utilities
pub struct SslUtils;

impl SslUtils {
    /// Validate SSL configuration
    pub fn validate_config(config: &SslConfig) -> Result<()> {
        if let Some(ca_cert) = &config.ca_cert_file {
            if !ca_cert.is_file() {
                return Err(SubmitError::Ssl(format!(
                    "CA certificate file not found: {:?}",
                    ca_cert
                )));
            }
        }
        Ok(())
    }

    /// Read certificate file contents
    pub fn read_cert_file(path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| {
            SubmitError::Ssl(format!("Cannot read CA certificate {:?}: {}", path, e))
        })
    }

    /// Apply the TLS options to a client builder
    pub fn configure(mut builder: ClientBuilder, config: &SslConfig) -> Result<ClientBuilder> {
        Self::validate_config(config)?;

        if !config.verify_certs {
            log::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(path) = &config.ca_cert_file {
            let pem = Self::read_cert_file(path)?;
            let cert = Certificate::from_pem(&pem).map_err(|e| {
                SubmitError::Ssl(format!("Invalid CA certificate {:?}: {}", path, e))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::SslUtils;
    use crate::config::SslConfig;
    use crate::error::SubmitError;
    use tempfile::tempdir;

    #[test]
    fn validate_config_reports_missing_ca_file() {
        let temp = tempdir().expect("tempdir");
        let config = SslConfig {
            verify_certs: true,
            ca_cert_file: Some(temp.path().join("ca.pem")),
        };
        let err = SslUtils::validate_config(&config).expect_err("missing ca");
        assert!(matches!(err, SubmitError::Ssl(ref m) if m.contains("CA certificate")));
    }
}
