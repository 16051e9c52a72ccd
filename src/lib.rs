//! nes-submit - upload a run file to a CGI evaluation endpoint
//!
//! This crate sends one local file plus the `qrel` and `hwid` form fields
//! as a `multipart/form-data` POST with HTTP Basic Authentication, and turns
//! the HTML-ish response (`<br />` line breaks) back into plain text.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod http;
pub mod logging;
pub mod output;
pub mod ssl;
pub mod submitter;
pub mod utils;

pub use error::{Result, SubmitError};
pub use submitter::{Submitter, SubmissionOutcome};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
