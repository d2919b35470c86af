// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module provides the finder configuration.
//!
//! A config file is either yaml or json, every field is optional:
//!
//! ```yaml
//! enum_count: 10
//! enum_ratio: 0.1
//! limits:
//!   max_groups: 10
//!   max_words: 6
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Error;

/// Word sets with at most this many distinct words are enumerated.
pub const DEFAULT_ENUM_COUNT: usize = 10;

/// Words more frequent than this ratio are enumerated, the other are generalized.
pub const DEFAULT_ENUM_RATIO: f64 = 0.1;

/// The loaded finder config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// The maximum number of distinct words rendered as a full enumeration.
    pub enum_count: usize,
    /// The frequency a word needs to be kept literally in a partial enumeration.
    pub enum_ratio: f64,
    /// When set, records are merged until the limits are met.
    pub limits: Option<Limits>,
}

/// The bounds enforced by merging records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    pub max_groups: usize,
    pub max_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            enum_count: DEFAULT_ENUM_COUNT,
            enum_ratio: DEFAULT_ENUM_RATIO,
            limits: None,
        }
    }
}

/// The config file content.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default = "default_enum_count")]
    enum_count: usize,
    #[serde(default = "default_enum_ratio")]
    enum_ratio: f64,
    #[serde(default)]
    limits: Option<Limits>,
}

fn default_enum_count() -> usize {
    DEFAULT_ENUM_COUNT
}

fn default_enum_ratio() -> f64 {
    DEFAULT_ENUM_RATIO
}

impl Config {
    pub fn from_path(path: PathBuf) -> Result<Self, Error> {
        let content = std::fs::read_to_string(&path)?;
        Config::from_str_ext(&path, &content)
    }

    fn from_str_ext(path: &std::path::Path, content: &str) -> Result<Self, Error> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let cf: ConfigFile = match path.extension().and_then(std::ffi::OsStr::to_str) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(content)?,
            Some("json") => serde_json::from_str(content)?,
            m_ext => {
                return Err(Error::UnknownFormat(
                    m_ext.map(|s| s.to_string()).unwrap_or("".to_string()),
                ))
            }
        };
        Config::from_config_file(&cf)
    }

    /// Convert the raw ConfigFile into a checked Config
    fn from_config_file(cf: &ConfigFile) -> Result<Self, Error> {
        Config {
            enum_count: cf.enum_count,
            enum_ratio: cf.enum_ratio,
            limits: cf.limits,
        }
        .validate()
    }

    /// Apply the `REGEX_FINDER_ENUM_COUNT` and `REGEX_FINDER_ENUM_RATIO` environment overrides.
    pub fn with_env(self) -> Result<Self, Error> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides<F>(self, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enum_count = match lookup("REGEX_FINDER_ENUM_COUNT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|e| Error::BadConfig(format!("REGEX_FINDER_ENUM_COUNT={v}: {e}")))?,
            None => self.enum_count,
        };
        let enum_ratio = match lookup("REGEX_FINDER_ENUM_RATIO") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|e| Error::BadConfig(format!("REGEX_FINDER_ENUM_RATIO={v}: {e}")))?,
            None => self.enum_ratio,
        };
        Config {
            enum_count,
            enum_ratio,
            ..self
        }
        .validate()
    }

    fn validate(self) -> Result<Self, Error> {
        if !(0.0..1.0).contains(&self.enum_ratio) {
            return Err(Error::BadConfig(format!(
                "enum_ratio must be in [0, 1), got {}",
                self.enum_ratio
            )));
        }
        match self.limits {
            Some(limits) if limits.max_groups == 0 || limits.max_words == 0 => Err(
                Error::BadConfig("limits must be positive".to_string()),
            ),
            _ => Ok(self),
        }
    }
}
