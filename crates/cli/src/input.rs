// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module reads the sentences given to the command line.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Surrounding whitespaces are not part of a sentence.
fn to_sentences(content: &str) -> impl Iterator<Item = String> + '_ {
    content.lines().map(|line| line.trim().to_string())
}

/// Read one sentence per line from the paths, or from stdin when there are none.
pub fn read_sentences(paths: &[PathBuf]) -> Result<Vec<String>> {
    if paths.is_empty() {
        if atty::is(atty::Stream::Stdin) {
            anyhow::bail!("stdin is a terminal, please provide a PATH or pipe the lines");
        }
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(to_sentences(&content).collect());
    }
    let mut sentences = Vec::new();
    for path in paths {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let before = sentences.len();
        sentences.extend(to_sentences(&content));
        tracing::debug!(path = ?path, lines = sentences.len() - before, "Read file");
    }
    Ok(sentences)
}
