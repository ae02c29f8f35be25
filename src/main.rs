//! RAX LDAP Auth - Entry Point
//!
//! Manual invocation of the credential validator: checks one
//! username/password pair against the configured directory.

use clap::Parser;
use log::{error, info};
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use rax_ldap_auth::utils::setup_logging;
use rax_ldap_auth::{CredentialValidator, DirectoryConfig};

/// Password source that stays clear of the `LDAP_AUTH_` configuration prefix.
const PASSWORD_ENV: &str = "RAX_LDAP_PASSWORD";

#[derive(Parser)]
#[clap(version, about = "Validate a username/password pair with an LDAP simple bind")]
struct Cli {
    /// Configuration file (defaults to ./ldap-auth.toml when present)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Unqualified account name
    username: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DirectoryConfig::load_from(path),
        None => DirectoryConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let password = match read_password() {
        Ok(password) => password,
        Err(e) => {
            error!("Failed to read password: {}", e);
            return ExitCode::from(2);
        }
    };

    info!("Validating credentials against {}", config.url());

    let validator = CredentialValidator::from_config(&config);
    if validator.validate(&cli.username, &password).await {
        println!("authenticated");
        ExitCode::SUCCESS
    } else {
        println!("rejected");
        ExitCode::from(1)
    }
}

/// Read the password from the environment, or else the first line of stdin.
fn read_password() -> std::io::Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    Ok(trimmed.strip_suffix('\r').unwrap_or(trimmed).to_string())
}
