// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module is the entrypoint of the regex-finder command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use regex_finder::{Config, Error, Finder, GroupPattern};
use regex_finder_tokenizer::Record;
use serde::Serialize;
use std::path::PathBuf;

mod input;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_subcommand = true)]
struct Cli {
    #[clap(long, help = "regex-finder configuration", value_name = "FILE")]
    config: Option<PathBuf>,

    #[clap(long, help = "Print a json report including the groups")]
    json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[clap(about = "Infer a regex matching every line, read stdin when no path is given")]
    Infer {
        #[clap(long, help = "Do not check the regex against the lines")]
        no_verify: bool,

        paths: Vec<PathBuf>,
    },

    #[clap(about = "Check that a regex matches every line")]
    Check { pattern: String, paths: Vec<PathBuf> },

    // Debug tokenizer
    #[clap(hide = true, about = "Split a single line")]
    DebugTokenizer { line: String },

    // Debug grouping
    #[clap(hide = true, about = "List the groups, the biggest first")]
    DebugGroups { paths: Vec<PathBuf> },
}

#[derive(Serialize)]
struct Report<'a> {
    pattern: &'a str,
    groups: &'a [GroupPattern],
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = match self.config {
            Some(path) => Config::from_path(path.clone())
                .with_context(|| format!("Failed to load {:?}", path))?,
            None => Config::default(),
        }
        .with_env()?;
        let finder = Finder::new(config);
        match self.command {
            Commands::Infer { no_verify, paths } => {
                let sentences = input::read_sentences(&paths)?;
                infer(&finder, &sentences, !no_verify, self.json)
            }
            Commands::Check { pattern, paths } => {
                let sentences = input::read_sentences(&paths)?;
                regex_finder::verify(&pattern, &sentences)?;
                println!("Good pattern: matched {} lines", sentences.len());
                Ok(())
            }

            // Debug handlers
            Commands::DebugTokenizer { line } => {
                let record = Record::split(&line);
                if self.json {
                    println!("{}", serde_json::to_string(&record)?);
                } else {
                    println!("{}\n{}", record.type_key(), record);
                }
                Ok(())
            }
            Commands::DebugGroups { paths } => {
                let sentences = input::read_sentences(&paths)?;
                finder
                    .infer_groups(&sentences)
                    .into_iter()
                    .sorted_by_key(|group| std::cmp::Reverse(group.records))
                    .for_each(|group| {
                        println!("{}: {} lines, {} words", group.key, group.records, group.words);
                        println!("  {}", group.pattern);
                    });
                Ok(())
            }
        }
    }
}

/// infer is the regex-finder implementation after command line parsing.
#[tracing::instrument(level = "debug", skip_all, fields(lines = sentences.len()))]
fn infer(finder: &Finder, sentences: &[String], verify: bool, json: bool) -> Result<()> {
    if sentences.is_empty() {
        return Err(Error::EmptyInput.into());
    }
    let groups = finder.infer_groups(sentences);
    let pattern = regex_finder::union(&groups);
    tracing::info!(
        lines = sentences.len(),
        groups = groups.len(),
        "Inferred pattern"
    );

    if verify {
        // A mismatch is a bug in the finder, report it with the offending line.
        regex_finder::verify(&pattern, sentences).context("The inferred pattern is invalid")?;
    }

    if json {
        let report = Report {
            pattern: &pattern,
            groups: &groups,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", pattern);
    }
    Ok(())
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let logger = tracing_subscriber::Registry::default();

    let _flush = match std::env::var_os("REGEX_FINDER_LOG") {
        None => {
            // Default INFO stderr logger, stdout is for the pattern
            logger
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr)
                        .compact()
                        .with_filter(tracing_subscriber::filter::LevelFilter::INFO),
                )
                .init();
            None
        }
        Some(_level) => {
            // Tracing spans
            let logger = logger.with(
                tracing_tree::HierarchicalLayer::new(1)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
                    .with_bracketed_fields(true)
                    .with_filter(tracing_subscriber::filter::EnvFilter::from_env(
                        "REGEX_FINDER_LOG",
                    )),
            );
            if let Ok(fp) = std::env::var("REGEX_FINDER_TRACE") {
                let chrome = tracing_chrome::ChromeLayerBuilder::new()
                    .file(fp)
                    .include_args(true)
                    .build();
                logger.with(chrome.0).init();
                // Return the chrome flush guard so that it is not dropped until the end
                Some(chrome.1)
            } else {
                logger.init();
                None
            }
        }
    };
    Cli::parse().run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_empty_input() {
        let err = infer(&Finder::default(), &[], true, false).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::EmptyInput)));
    }

    #[test]
    fn test_infer() {
        let sentences = vec!["$100".to_string(), "$200".to_string()];
        assert!(infer(&Finder::default(), &sentences, true, true).is_ok());
    }

    #[test]
    fn test_report() {
        let groups = Finder::default().infer_groups(["$100", "$200", "apple"]);
        let pattern = regex_finder::union(&groups);
        let report = serde_json::to_value(Report {
            pattern: &pattern,
            groups: &groups,
        })
        .unwrap();
        assert_eq!(report["pattern"], r"^(?:\$(?:100|200)|apple)$");
        assert_eq!(report["groups"].as_array().map(Vec::len), Some(2));
        assert_eq!(report["groups"][0]["key"], "P$SD");
        assert_eq!(report["groups"][0]["records"], 2);
        assert_eq!(report["groups"][0]["words"], 1);
        assert_eq!(report["groups"][1]["pattern"], "apple");
    }
}
