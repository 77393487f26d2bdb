// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application configuration loaded from `regform.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "REGFORM_CONFIG";

/// Config file looked up in the working directory when no override is set.
pub const DEFAULT_CONFIG_FILE: &str = "regform.toml";

/// Top-level configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub form: FormOptions,
}

/// Initial native window geometry.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

/// Optional parts of the registration markup.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FormOptions {
    /// Whether the upload control carries the `required` flag.
    #[serde(default = "default_true")]
    pub require_attachment: bool,

    /// Hobby checkboxes; an empty list removes the group entirely.
    #[serde(default = "default_hobbies")]
    pub hobbies: Vec<String>,

    /// Options offered by the state dropdown.
    #[serde(default = "default_states")]
    pub states: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            window: WindowConfig::default(),
            form: FormOptions::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            require_attachment: default_true(),
            hobbies: default_hobbies(),
            states: default_states(),
        }
    }
}

impl AppConfig {
    /// Parse a config file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load from `$REGFORM_CONFIG`, else `./regform.toml`, else defaults.
    ///
    /// An explicitly configured path must exist; the implicit default may be absent.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(&PathBuf::from(path)),
            None => Self::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_width() -> f32 {
    820.0
}

fn default_height() -> f32 {
    900.0
}

fn default_true() -> bool {
    true
}

fn default_hobbies() -> Vec<String> {
    ["Reading", "Music", "Sports", "Travel"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_states() -> Vec<String> {
    [
        "Delhi",
        "Karnataka",
        "Kerala",
        "Maharashtra",
        "Tamil Nadu",
        "West Bengal",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
