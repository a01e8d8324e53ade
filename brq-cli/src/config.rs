//! Configuration loading for the `brq` command.
//!
//! Reads a TOML file whose keys are those of [`GatewayConfig`], expands
//! `$VAR` / `${VAR}` references in it, then lets environment variables
//! override individual settings.
//!
//! # Example Configuration
//!
//! ```toml
//! website_key = "ABCDEF1234"
//! secret = "${BRQ_SHARED_SECRET}"
//! environment = "test"
//! callback_url = "https://shop.example/checkout/return"
//! push_url = "https://shop.example/checkout/push"
//! ```
//!
//! # Environment Variables
//!
//! - `BRQ_WEBSITE_KEY` - Website key
//! - `BRQ_SECRET` - Shared secret
//! - `BRQ_TEST_MODE` - `true` selects the test gateway, `false` the live one
//! - `BRQ_CALLBACK_URL` - Default return URL
//! - `BRQ_PUSH_URL` - Push notification URL
//! - `BRQ_DEBUG` - Log request and response fields

use std::path::{Path, PathBuf};

use brq::{Environment, GatewayConfig};
use toml::{Table, Value};

/// Configuration file used when `--config` / `BRQ_CONFIG` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "brq.toml";

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or misses required settings.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A boolean environment variable holds something else.
    #[error("{name} must be a boolean, got '{value}'")]
    InvalidFlag {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Loads the configuration from `path` and the process environment.
///
/// A missing file is treated as empty, so everything can come from the
/// environment.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed, or if the
/// resulting settings lack a website key or secret.
pub fn load(path: &Path) -> Result<GatewayConfig, ConfigError> {
    load_with(path, &|name: &str| std::env::var(name).ok())
}

fn load_with(
    path: &Path,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<GatewayConfig, ConfigError> {
    let content = if path.exists() {
        std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?
    } else {
        String::new()
    };
    parse(&content, lookup)
}

fn parse(
    content: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<GatewayConfig, ConfigError> {
    let mut table: Table = toml::from_str(&expand_env_vars(content, lookup))?;
    apply_overrides(&mut table, lookup)?;
    Ok(Value::Table(table).try_into()?)
}

fn apply_overrides(
    table: &mut Table,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    for (name, key) in [
        ("BRQ_WEBSITE_KEY", "website_key"),
        ("BRQ_SECRET", "secret"),
        ("BRQ_CALLBACK_URL", "callback_url"),
        ("BRQ_PUSH_URL", "push_url"),
    ] {
        if let Some(value) = lookup(name) {
            table.insert(key.to_owned(), Value::String(value));
        }
    }
    if let Some(value) = lookup("BRQ_TEST_MODE") {
        let environment = Environment::from_test_mode(parse_flag("BRQ_TEST_MODE", value)?);
        table.insert(
            "environment".to_owned(),
            Value::String(environment.to_string()),
        );
    }
    if let Some(value) = lookup("BRQ_DEBUG") {
        table.insert(
            "debug".to_owned(),
            Value::Boolean(parse_flag("BRQ_DEBUG", value)?),
        );
    }
    Ok(())
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}

/// Replaces `$VAR` and `${VAR}` with values from `lookup`.
///
/// References that do not resolve are kept verbatim.
fn expand_env_vars(input: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, token_len) = if let Some(braced) = after.strip_prefix('{') {
            braced.find('}').map_or(("", 0), |end| (&braced[..end], end + 2))
        } else {
            let end = after
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        let token_end = pos + 1 + token_len;
        let value = if name.is_empty() { None } else { lookup(name) };
        match value {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[pos..token_end]),
        }
        rest = &rest[token_end..];
    }
    out.push_str(rest);
    out
}
