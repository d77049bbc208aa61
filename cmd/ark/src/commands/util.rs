//! Shared helpers for CLI commands.

use std::{env, fs, path::Path};

use anyhow::{Context, bail};
use serde::{Serialize, de::DeserializeOwned};

use byteark::{Client, DEFAULT_BASE_URL};

use crate::Cli;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ARK_API_KEY";

/// Creates an Ark client from CLI flags and the environment.
pub fn create_client(cli: &Cli) -> anyhow::Result<Client> {
    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None => env::var(API_KEY_ENV)
            .with_context(|| format!("--api-key not given and {} not set", API_KEY_ENV))?,
    };

    let base_url = cli.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

    Ok(Client::builder(api_key).base_url(base_url).build()?)
}

/// Returns the input file path, failing if -f was not given.
pub fn require_input_file(cli: &Cli) -> anyhow::Result<&str> {
    match &cli.input {
        Some(path) => Ok(path),
        None => bail!("an input request file is required (use -f/--file)"),
    }
}

/// Loads a request from a YAML or JSON file into the provided type.
pub fn load_request<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path))?;

    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_slice(&data)?),
        Some("json") => Ok(serde_json::from_slice(&data)?),
        _ => {
            // Try YAML first, then JSON
            if let Ok(v) = serde_yaml::from_slice(&data) {
                return Ok(v);
            }
            if let Ok(v) = serde_json::from_slice(&data) {
                return Ok(v);
            }
            bail!("failed to parse {} (tried YAML and JSON)", path)
        }
    }
}

/// Writes the result as YAML (default) or JSON to stdout or a file.
pub fn output_result<T: Serialize>(
    value: &T,
    file: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let output = if json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_yaml::to_string(value)?
    };

    match file {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("failed to write {}", path))?
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Prints a success message to stderr.
pub fn print_success(message: &str) {
    eprintln!("✓ {}", message);
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, message: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", message);
    }
}
