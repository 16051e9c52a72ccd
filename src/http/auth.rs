//! HTTP authentication utilities

use crate::config::Credentials;
use crate::error::{Result, SubmitError};
use base64::Engine;

/// Authentication helper
pub struct Auth;

impl Auth {
    /// Create basic auth header value
    pub fn basic_auth(username: &str, password: &str) -> String {
        let credentials = format!("{}:{}", username, password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// Header value for a credential pair
    pub fn header_value(credentials: &Credentials) -> String {
        Self::basic_auth(&credentials.username, &credentials.password)
    }

    /// Parse user:password format
    pub fn parse_user_pass(input: &str) -> Result<(String, String)> {
        let (user, pass) = match input.split_once(':') {
            Some((user, pass)) => (user, pass),
            None => (input, ""),
        };
        if user.is_empty() {
            return Err(SubmitError::Config(
                "Invalid user:password format: empty user name".to_string(),
            ));
        }
        Ok((user.to_string(), pass.to_string()))
    }
}
