//! Server configuration.
//!
//! Values come from environment variables, with an optional positional port
//! argument on the command line taking precedence:
//!
//! - `ALGOVIZ_HOST`: bind address (default `127.0.0.1`)
//! - `ALGOVIZ_PORT`: listen port (default `3000`)
//! - `ALGOVIZ_STATIC_DIR`: directory of client assets (default `static`)
//! - `ALGOVIZ_MAX_ELEMENTS`: longest array accepted (default `20`)
//! - `ALGOVIZ_MAX_OPERATIONS`: longest operation script accepted (default `200`)
//! - `ALGOVIZ_VERBOSE_BUBBLE`: `true` to add `no_swap` and pass markers to
//!   bubble sort traces of the direct binding (default `false`)

use std::path::PathBuf;
use thiserror::Error;

use crate::sorting::{MAX_ELEMENTS, SortOptions};
use crate::structures::MAX_SCRIPT_LINES;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_elements: usize,
    pub max_operations: usize,
    pub verbose_bubble: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("static"),
            max_elements: MAX_ELEMENTS,
            max_operations: MAX_SCRIPT_LINES,
            verbose_bubble: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(host) = lookup("ALGOVIZ_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("ALGOVIZ_PORT") {
            config.port = parse_value("ALGOVIZ_PORT", &port)?;
        }
        if let Some(dir) = lookup("ALGOVIZ_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(max) = lookup("ALGOVIZ_MAX_ELEMENTS") {
            config.max_elements = parse_value("ALGOVIZ_MAX_ELEMENTS", &max)?;
        }
        if let Some(max) = lookup("ALGOVIZ_MAX_OPERATIONS") {
            config.max_operations = parse_value("ALGOVIZ_MAX_OPERATIONS", &max)?;
        }
        if let Some(flag) = lookup("ALGOVIZ_VERBOSE_BUBBLE") {
            config.verbose_bubble = parse_flag("ALGOVIZ_VERBOSE_BUBBLE", &flag)?;
        }

        Ok(config)
    }

    /// Applies command-line arguments (program name excluded). The first
    /// positional argument, if any, is the port.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(port) = args.into_iter().next() {
            self.port = parse_value("port", port.as_ref())?;
        }
        Ok(self)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn sort_options(&self) -> SortOptions {
        if self.verbose_bubble {
            SortOptions::verbose()
        } else {
            SortOptions::default()
        }
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
