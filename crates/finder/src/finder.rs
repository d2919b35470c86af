// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This library infers a single regex matching a set of sentences while keeping their shared structure.
//!
//! The process is:
//!
//! 1. Split each sentence into prefix, words, delimiters and suffix, see [regex_finder_tokenizer].
//! 2. Group the sentences by structure: same prefix, suffix, delimiters and word count.
//! 3. For each group, turn the words found at each position into a sub-regex, see [classifier].
//! 4. Join every group regex with `|`.
//!
//! ```rust
//! # use regex_finder::infer_pattern;
//! assert_eq!(
//!     infer_pattern(["apple", "banana", "$100", "$200", "10 apples", "15 apples"]),
//!     r"^(?:(?:apple|banana)|\$(?:100|200)|(?:10|15) apples)$"
//! );
//! ```

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub use regex_finder_tokenizer::{Record, TypeKey, EMPTY_GROUP};

pub mod classifier;
pub mod config;
mod errors;
pub mod verify;

pub use config::{Config, Limits};
pub use errors::Error;
pub use verify::verify;

/// The regex inferred for one group of sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPattern {
    /// The group structure, see [TypeKey].
    pub key: String,
    /// The number of sentences in the group.
    pub records: usize,
    /// The number of words of each sentence.
    pub words: usize,
    /// The group regex, ready to be joined with the other groups.
    pub pattern: String,
}

/// The regex finder.
#[derive(Debug, Clone, Default)]
pub struct Finder {
    config: Config,
}

impl Finder {
    /// Create a finder using the given config.
    pub fn new(config: Config) -> Finder {
        Finder { config }
    }

    /// The finder config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Infer one regex per group of sentences, in first-seen order.
    #[tracing::instrument(level = "debug", name = "Finder::infer_groups", skip_all)]
    pub fn infer_groups<I, S>(&self, sentences: I) -> Vec<GroupPattern>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = sentences
            .into_iter()
            .map(|sentence| Record::split(sentence.as_ref()))
            .collect::<Vec<Record>>();
        let records = self.limit(records);
        group_records(&records)
            .into_iter()
            .map(|group| self.group_pattern(&group))
            .collect()
    }

    /// Infer the regex matching every sentence.
    pub fn infer_pattern<I, S>(&self, sentences: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        union(&self.infer_groups(sentences))
    }

    /// Merge the records until the configured limits are met.
    fn limit(&self, records: Vec<Record>) -> Vec<Record> {
        let limits = match self.config.limits {
            Some(limits) => limits,
            None => return records,
        };
        let mut words = records.iter().map(Record::words_num).max().unwrap_or(0);
        let mut records = records;
        while words > 1 && (count_groups(&records) > limits.max_groups || words > limits.max_words)
        {
            words -= 1;
            records = records.iter().map(|record| record.merge(words)).collect();
            tracing::debug!(words, groups = count_groups(&records), "merged records");
        }
        records
    }

    fn group_pattern(&self, group: &[&Record]) -> GroupPattern {
        // The group is never empty and all its records share the same structure.
        let first = group[0];
        let words = (0..first.words_num())
            .map(|pos| {
                classifier::classify(
                    group.iter().map(|record| record.words()[pos].as_str()),
                    &self.config,
                )
            })
            .collect::<Vec<String>>();
        let pattern = first.with_words(words).regex();
        let pattern = if has_top_level_alternation(&pattern) {
            format!("(?:{pattern})")
        } else {
            pattern
        };
        let key = first.type_key().to_string();
        tracing::debug!(key = %key, records = group.len(), pattern = %pattern, "group");
        GroupPattern {
            key,
            records: group.len(),
            words: first.words_num(),
            pattern,
        }
    }
}

/// Group the records by [TypeKey], keeping the first-seen order.
fn group_records(records: &[Record]) -> Vec<Vec<&Record>> {
    let mut positions: FxHashMap<TypeKey, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<&Record>> = Vec::new();
    for record in records {
        let pos = *positions.entry(record.type_key()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[pos].push(record);
    }
    groups
}

fn count_groups(records: &[Record]) -> usize {
    records
        .iter()
        .map(Record::type_key)
        .collect::<FxHashSet<TypeKey>>()
        .len()
}

/// Check if a regex contains a `|` outside of any group.
fn has_top_level_alternation(pattern: &str) -> bool {
    let mut depth = 0usize;
    let mut in_class = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '[' => in_class = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Join the group patterns into the final, anchored, regex.
pub fn union(groups: &[GroupPattern]) -> String {
    if groups.is_empty() {
        format!("^{EMPTY_GROUP}$")
    } else {
        format!("^(?:{})$", groups.iter().map(|group| &group.pattern).join("|"))
    }
}

/// Infer the regex matching every sentence with the default [Config].
pub fn infer_pattern<I, S>(sentences: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Finder::default().infer_pattern(sentences)
}

#[test]
fn test_top_level_alternation() {
    assert!(has_top_level_alternation("a|b"));
    assert!(has_top_level_alternation(r"\$(?:1|2)|x"));
    assert!(!has_top_level_alternation("(?:a|b)"));
    assert!(!has_top_level_alternation(r"a\|b"));
    assert!(!has_top_level_alternation("[|]"));
    assert!(!has_top_level_alternation(r"[\]|]x"));
    assert!(!has_top_level_alternation("(?s:.){0,3}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn check_coverage(finder: &Finder, sentences: &[&str]) -> String {
        let pattern = finder.infer_pattern(sentences);
        let re = Regex::new(&pattern).unwrap();
        for sentence in sentences {
            assert!(re.is_match(sentence), "{} does not match {}", sentence, pattern);
        }
        pattern
    }

    #[test]
    fn test_infer_pattern() {
        let sentences = [
            "https://github.com/madokast/TableInsighter4",
            "https://github.com/aaa/bbb",
            "https://github.com/aaa/go",
        ];
        assert_eq!(
            check_coverage(&Finder::default(), &sentences),
            r"^(?:https://github\.com/(?:madokast|aaa)/(?:TableInsighter4|bbb|go))$"
        );
    }

    #[test]
    fn test_grouping() {
        let finder = Finder::default();
        let groups = finder.infer_groups(["10 apples", "$100", "15 apples", "$200", "apple"]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key, "PSD ");
        assert_eq!(groups[0].records, 2);
        assert_eq!(groups[0].words, 2);
        assert_eq!(groups[1].key, "P$SD");
        assert_eq!(groups[2].key, "PSD");
        assert_eq!(groups[2].pattern, "apple");

        // Same structure, different words
        assert_eq!(finder.infer_groups(["a-1", "bb-22"]).len(), 1);
        // Different delimiters, prefix or suffix
        assert_eq!(finder.infer_groups(["a-1", "a_1", "-a-1", "a-1-"]).len(), 4);
    }

    #[test]
    fn test_group_alternation() {
        let sentences = ["x", "y"].iter().chain(["-a", "-b"].iter()).copied();
        let groups = Finder::default().infer_groups(sentences);
        assert_eq!(groups[0].pattern, "(?:x|y)");
        assert_eq!(groups[1].pattern, r"\-(?:a|b)");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(infer_pattern(Vec::<String>::new()), "^(?:)$");
        let pattern = check_coverage(&Finder::default(), &["", "!!"]);
        assert_eq!(pattern, r"^(?:(?:)|!!)$");
    }

    #[test]
    fn test_word_count_grouping() {
        let finder = Finder::default();
        assert_eq!(check_coverage(&finder, &["9", ""]), "^(?:9|(?:))$");
        assert_eq!(check_coverage(&finder, &["", "9"]), "^(?:(?:)|9)$");
        assert_eq!(check_coverage(&finder, &["!!", "!!a"]), "^(?:!!|!!a)$");
        assert_eq!(check_coverage(&finder, &["!!a", "!!"]), "^(?:!!a|!!)$");

        let groups = finder.infer_groups(["!!", "!!a", "!!b"]);
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].records, groups[0].words), (1, 0));
        assert_eq!((groups[1].records, groups[1].words), (2, 1));
    }

    #[test]
    fn test_shape_generalization() {
        let sentences = (1..=30)
            .map(|i| format!("job-{} took {} ms", i, i * 37))
            .collect::<Vec<String>>();
        let sentences = sentences.iter().map(String::as_str).collect::<Vec<&str>>();
        let pattern = check_coverage(&Finder::default(), &sentences);
        assert_eq!(pattern, r"^(?:job\-[1-9][0-9]? took [1-9][0-9]{1,3} ms)$");
    }

    #[test]
    fn test_idempotence() {
        let sentences = ["b 1", "a 2", "$3", "c 4", "$5"];
        assert_eq!(infer_pattern(sentences), infer_pattern(sentences));
    }

    #[test]
    fn test_non_ascii() {
        let sentences = ["2022年12月8日 11点48分", "2023年1月18日 9点05分", "日本"];
        check_coverage(&Finder::default(), &sentences);
    }

    #[test]
    fn test_limits() {
        let sentences = [
            "2022/12/08 11:39",
            "2022-12-08 11:39",
            "2022.12.08 11h39",
            "12/08",
        ];
        let unlimited = Finder::default().infer_groups(sentences);
        assert_eq!(unlimited.len(), 4);

        let finder = Finder::new(Config {
            limits: Some(Limits {
                max_groups: 2,
                max_words: 6,
            }),
            ..Config::default()
        });
        let groups = finder.infer_groups(sentences);
        assert!(groups.len() <= 2, "{:?}", groups);
        check_coverage(&finder, &sentences);

        let finder = Finder::new(Config {
            limits: Some(Limits {
                max_groups: 100,
                max_words: 2,
            }),
            ..Config::default()
        });
        let groups = finder.infer_groups(sentences);
        assert!(groups.iter().all(|group| group.words <= 2), "{:?}", groups);
        check_coverage(&finder, &sentences);
    }

    #[test]
    fn test_limits_stop_at_one_word() {
        let finder = Finder::new(Config {
            limits: Some(Limits {
                max_groups: 1,
                max_words: 1,
            }),
            ..Config::default()
        });
        // The prefixes differ, merging can't bring them together.
        let sentences = ["-a b", "+a b", "a b"];
        let groups = finder.infer_groups(sentences);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|group| group.words == 1));
        check_coverage(&finder, &sentences);
    }
}
