// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! This library provides the sentence splitter of the regex-finder project.
//!
//! A sentence is cut into a [Record]: the leading and trailing runs of non alphanumeric
//! characters become the prefix and the suffix, and what remains alternates between
//! words (`[0-9A-Za-z]+`) and delimiters. It looks like this:
//!
//! ```rust
//! # use regex_finder_tokenizer::Record;
//! let record = Record::split("  _ _-- apple-- b123 _-_ 0123 __ --");
//! assert_eq!(record.prefix(), "  _ _-- ");
//! assert_eq!(record.words(), ["apple", "b123", "0123"]);
//! assert_eq!(record.delimiters(), ["-- ", " _-_ "]);
//! assert_eq!(record.suffix(), " __ --");
//! ```
//!
//! Records sharing the same [TypeKey] are later rendered as a single regex where each word
//! slot is replaced by a generated sub-pattern:
//!
//! ```rust
//! # use regex_finder_tokenizer::Record;
//! let record = Record::split("$100").with_words(vec!["[1-9][0-9]{2}".to_string()]);
//! assert_eq!(record.regex(), r"\$[1-9][0-9]{2}");
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

pub mod merge;

pub use merge::DelimiterPriority;

/// The regex rendered for a record without any content.
pub const EMPTY_GROUP: &str = "(?:)";

/// A sentence split into prefix, words, delimiters and suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    prefix: String,
    suffix: String,
    words: Vec<String>,
    delimiters: Vec<String>,
}

/// The structural type of a record: two records with the same key are grouped together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey<'a> {
    /// The record prefix.
    pub prefix: &'a str,
    /// The record suffix.
    pub suffix: &'a str,
    /// The record delimiters.
    pub delimiters: &'a [String],
    /// The number of words, a record without words and a single word record have the same delimiters.
    pub words: usize,
}

impl std::fmt::Display for TypeKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}S{}D{}", self.prefix, self.suffix, self.delimiters.join("D"))
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "prefix:'{}', words:{:?}, delimiters:{:?}, suffix:'{}'",
            self.prefix, self.words, self.delimiters, self.suffix
        )
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

impl Record {
    /// Build a record from its parts.
    ///
    /// # Panics
    ///
    /// When the delimiters do not sit strictly between the words.
    pub fn new(
        prefix: String,
        suffix: String,
        words: Vec<String>,
        delimiters: Vec<String>,
    ) -> Record {
        assert_eq!(
            delimiters.len(),
            words.len().saturating_sub(1),
            "delimiters {:?} do not separate words {:?}",
            delimiters,
            words
        );
        Record {
            prefix,
            suffix,
            words,
            delimiters,
        }
    }

    /// Split a sentence. This never fails and the result always reproduces the sentence.
    pub fn split(sentence: &str) -> Record {
        lazy_static! {
            static ref WORD: Regex = Regex::new("[0-9A-Za-z]+").unwrap();
        }
        let mut prefix = sentence;
        let mut words = Vec::new();
        let mut delimiters = Vec::new();
        let mut word_end = 0;
        for word in WORD.find_iter(sentence) {
            let gap = &sentence[word_end..word.start()];
            if words.is_empty() {
                prefix = gap;
            } else {
                // Two maximal word runs are always separated by something.
                assert!(!gap.is_empty(), "consecutive words in {:?}", sentence);
                delimiters.push(gap.to_string());
            }
            words.push(word.as_str().to_string());
            word_end = word.end();
        }
        let suffix = if words.is_empty() {
            ""
        } else {
            &sentence[word_end..]
        };
        debug_assert!(!prefix.ends_with(is_word_char) && !suffix.starts_with(is_word_char));

        let record = Record::new(prefix.to_string(), suffix.to_string(), words, delimiters);
        assert_eq!(record.sentence(), sentence, "lossy split");
        record
    }

    /// Rebuild the original sentence.
    pub fn sentence(&self) -> String {
        let mut result = String::with_capacity(self.text_len());
        result.push_str(&self.prefix);
        self.interleave(&mut result, |d| d.into());
        result.push_str(&self.suffix);
        result
    }

    /// Render the record as a regex. Prefix, delimiters and suffix are escaped, but the
    /// words are used verbatim as they are expected to already be sub-patterns.
    pub fn regex(&self) -> String {
        let mut result = String::with_capacity(self.text_len() * 2);
        result.push_str(&regex::escape(&self.prefix));
        self.interleave(&mut result, |d| regex::escape(d).into());
        result.push_str(&regex::escape(&self.suffix));
        if result.is_empty() {
            EMPTY_GROUP.to_string()
        } else {
            result
        }
    }

    fn interleave<'a, F>(&'a self, result: &mut String, delimiter: F)
    where
        F: Fn(&'a str) -> std::borrow::Cow<'a, str>,
    {
        for (pos, word) in self.words.iter().enumerate() {
            result.push_str(word);
            if let Some(d) = self.delimiters.get(pos) {
                result.push_str(&delimiter(d.as_str()));
            }
        }
    }

    fn text_len(&self) -> usize {
        self.prefix.len()
            + self.suffix.len()
            + self.words.iter().map(String::len).sum::<usize>()
            + self.delimiters.iter().map(String::len).sum::<usize>()
    }

    /// Replace the words, keeping the structure.
    ///
    /// # Panics
    ///
    /// When the number of words changes.
    pub fn with_words(&self, words: Vec<String>) -> Record {
        assert_eq!(words.len(), self.words.len(), "words count mismatch");
        Record::new(
            self.prefix.clone(),
            self.suffix.clone(),
            words,
            self.delimiters.clone(),
        )
    }

    /// The structural type of the record.
    pub fn type_key(&self) -> TypeKey<'_> {
        TypeKey {
            prefix: &self.prefix,
            suffix: &self.suffix,
            delimiters: &self.delimiters,
            words: self.words.len(),
        }
    }

    /// The leading non alphanumeric characters.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The trailing non alphanumeric characters.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The words, in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The delimiters, `delimiters()[i]` sits between `words()[i]` and `words()[i + 1]`.
    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    /// The number of words.
    pub fn words_num(&self) -> usize {
        self.words.len()
    }
}

/// Split a sentence, see [Record::split].
pub fn tokenize(sentence: &str) -> Record {
    Record::split(sentence)
}

/// Helper macro to write short tests. `same_type!("a", "b")` checks that both sentences have the same [TypeKey].
#[macro_export]
macro_rules! same_type {
    ($a:expr,$b:expr) => {
        assert_eq!(
            $crate::Record::split($a).type_key(),
            $crate::Record::split($b).type_key()
        )
    };
}

#[test]
fn test_split_dates() {
    let record = Record::split("2022/12/08 11:39");
    assert_eq!(record.prefix(), "");
    assert_eq!(record.words(), ["2022", "12", "08", "11", "39"]);
    assert_eq!(record.delimiters(), ["/", "/", " ", ":"]);
    assert_eq!(record.suffix(), "");
    same_type!("2022/12/08 11:39", "1999/01/31 00:00");
}

#[test]
fn test_split_non_ascii() {
    let record = Record::split("2022年12月8日 11点48分");
    assert_eq!(record.words(), ["2022", "12", "8", "11", "48"]);
    assert_eq!(record.delimiters(), ["年", "月", "日 ", "点"]);
    assert_eq!(record.suffix(), "分");
}

#[test]
fn test_split_only_delimiters() {
    let record = Record::split("!@#$%");
    assert_eq!(record.prefix(), "!@#$%");
    assert!(record.words().is_empty());
    assert!(record.delimiters().is_empty());
    assert_eq!(record.suffix(), "");
}

#[test]
fn test_type_key() {
    assert_eq!(
        Record::split("https://github.com/aaa/bbb").type_key().to_string(),
        "PSD://D.D/D/"
    );
    assert_eq!(Record::split("79%").type_key().to_string(), "PS%D");
    same_type!("10 apples", "15 apples");
    same_type!("apple", "banana");
    assert_ne!(
        Record::split("$100").type_key(),
        Record::split("100$").type_key()
    );
    assert_ne!(Record::split("9").type_key(), Record::split("").type_key());
    assert_ne!(
        Record::split("!!").type_key(),
        Record::split("!!a").type_key()
    );
}
