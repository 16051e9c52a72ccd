//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and application entry point.

use crate::config::{Config, ConfigFile, Credentials, OutputConfig};
use crate::error::{Result, SubmitError};
use crate::exit_code::exit_code_for_error;
use crate::http::auth::Auth;
use crate::logging;
use crate::output::OutputWriter;
use crate::submitter::Submitter;
use crate::utils::{FileUtils, StringUtils, UrlUtils};
use clap::{Arg, ArgAction, ArgMatches, Command};


/// Main entry point for the CLI application
pub fn run() {
    let matches = create_app().get_matches();
    logging::init(matches.get_flag("verbose"));

    let errors = OutputWriter::new(OutputConfig {
        silent: matches.get_flag("silent"),
        ..OutputConfig::default()
    });

    if let Err(e) = run_with_args(&matches) {
        errors.write_error(&e.to_string());
        if let Some(body) = e.body() {
            if !matches.get_flag("silent") && !body.trim().is_empty() {
                eprintln!("{}", body);
            }
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Run a submission with parsed command line arguments
fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let config = build_config_from_args(matches)?;
    log::debug!("resolved configuration: {:?}", config);
    let writer = OutputWriter::new(config.output.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| SubmitError::Config(format!("Failed to create async runtime: {}", e)))?;

    let outcome = rt.block_on(async {
        let submitter = Submitter::new(config)?;
        submitter.submit().await
    })?;

    writer.write(&outcome.text)
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    Command::new("nes-submit")
        .version(crate::VERSION)
        .about("Upload a run file to the evaluation CGI and print its report")
        .arg(Arg::new("file")
            .help("Run file uploaded as the 'infile' form part")
            .value_name("FILE")
            .env("NES_FILE")
            .index(1))
        .arg(Arg::new("url")
            .long("url")
            .value_name("URL")
            .env("NES_URL")
            .help("Evaluation endpoint"))
        .arg(Arg::new("qrel")
            .long("qrel")
            .value_name("VALUE")
            .env("NES_QREL")
            .help("Value of the 'qrel' form field"))
        .arg(Arg::new("hwid")
            .long("hwid")
            .value_name("VALUE")
            .env("NES_HWID")
            .help("Value of the 'hwid' form field"))
        .arg(Arg::new("user")
            .short('u')
            .long("user")
            .value_name("USER[:PASSWORD]")
            .env("NES_USER")
            .help("HTTP basic authentication"))
        .arg(Arg::new("password")
            .long("password")
            .value_name("PASSWORD")
            .env("NES_PASSWORD")
            .hide_env_values(true)
            .help("Password for basic authentication"))
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .value_name("FILE")
            .env("NES_CONFIG")
            .help("JSON configuration file"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .help("Maximum time for the whole request"))
        .arg(Arg::new("connect-timeout")
            .long("connect-timeout")
            .value_name("SECONDS")
            .help("Maximum time for connection"))
        .arg(Arg::new("user-agent")
            .short('A')
            .long("user-agent")
            .value_name("STRING")
            .help("User-Agent header"))
        .arg(Arg::new("ignore-status")
            .long("ignore-status")
            .help("Print the response body even when the server answers with an error status")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("insecure")
            .short('k')
            .long("insecure")
            .help("Allow insecure SSL connections")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("cacert")
            .long("cacert")
            .value_name("FILE")
            .help("CA certificate bundle file"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Write the report to file instead of stdout"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Verbose output")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("silent")
            .short('s')
            .long("silent")
            .help("Silent mode")
            .action(ArgAction::SetTrue))
}

/// Build configuration from command line arguments
///
/// Defaults first, then the config file, then environment and flags.
pub fn build_config_from_args(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = matches.get_one::<String>("config") {
        ConfigFile::load(&FileUtils::expand_path(path)?)?.apply(&mut config)?;
    }

    if let Some(url) = matches.get_one::<String>("url") {
        config.url = url.clone();
    }
    config.url = UrlUtils::validate_url(&config.url)?.to_string();

    if let Some(qrel) = matches.get_one::<String>("qrel") {
        config.form.qrel = qrel.clone();
    }
    if let Some(hwid) = matches.get_one::<String>("hwid") {
        config.form.hwid = hwid.clone();
    }

    if let Some(file) = matches.get_one::<String>("file") {
        config.file_path = FileUtils::expand_path(file)?;
    }

    // Parse authentication
    if let Some(user_str) = matches.get_one::<String>("user") {
        let (username, mut password) = Auth::parse_user_pass(user_str)?;
        // A bare user name keeps the password the config file has for it
        if !user_str.contains(':') {
            if let Some(existing) = config
                .credentials
                .as_ref()
                .filter(|c| c.username == username)
            {
                password = existing.password.clone();
            }
        }
        config.credentials = Some(Credentials { username, password });
    }
    if let Some(password) = matches.get_one::<String>("password") {
        match config.credentials.as_mut() {
            Some(credentials) => credentials.password = password.clone(),
            None => {
                return Err(SubmitError::Config(
                    "--password given without a user name".to_string(),
                ))
            }
        }
    }

    if let Some(timeout_str) = matches.get_one::<String>("timeout") {
        config.timeout = StringUtils::parse_timeout(timeout_str)?;
    }
    if let Some(connect_timeout_str) = matches.get_one::<String>("connect-timeout") {
        config.connect_timeout = StringUtils::parse_timeout(connect_timeout_str)?;
    }

    if let Some(user_agent) = matches.get_one::<String>("user-agent") {
        config.user_agent = Some(user_agent.clone());
    }

    if matches.get_flag("ignore-status") {
        config.check_status = false;
    }

    // Configure SSL
    if matches.get_flag("insecure") {
        config.ssl.verify_certs = false;
    }
    if let Some(cacert_file) = matches.get_one::<String>("cacert") {
        config.ssl.ca_cert_file = Some(FileUtils::expand_path(cacert_file)?);
    }

    // Configure output
    config.output.verbose = matches.get_flag("verbose");
    config.output.silent = matches.get_flag("silent");
    if let Some(output_file) = matches.get_one::<String>("output") {
        config.output.file = Some(FileUtils::expand_path(output_file)?);
    }

    Ok(config)
}
