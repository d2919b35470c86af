// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("bad regex: {0}")]
    BadRegex(#[from] regex::Error),

    #[error("{line:?} is not matched by {pattern}")]
    Mismatch { line: String, pattern: String },

    #[error("no input")]
    EmptyInput,

    #[error("invalid file: {0}")]
    BadFile(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    BadJSON(#[from] serde_json::Error),

    #[error("invalid yaml: {0}")]
    BadYAML(#[from] serde_yaml::Error),

    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("bad config: {0}")]
    BadConfig(String),
}
