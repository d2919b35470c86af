// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module contains the logic to turn a set of words into a regex.
//!
//! Small or skewed vocabularies are enumerated, e.g. `(?:INFO|WARNING|ERROR)`. The other words
//! are generalized by their [Shape], e.g. `[1-9][0-9]{1,3}` for numbers between 10 and 9999.

use fxhash::FxHashMap;
use itertools::Itertools;
use std::collections::BTreeMap;

use crate::config::Config;
use regex_finder_tokenizer::EMPTY_GROUP;

/// The character composition of a word. Variants are listed in matching order: a word
/// belongs to the first shape it satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    /// A number without leading zero, e.g. `123`
    Count,
    /// Any digits, e.g. `0123`
    Digits,
    /// e.g. `apple`
    Lower,
    /// e.g. `Apple`
    Capitalized,
    /// e.g. `APPLE`
    Upper,
    /// Mixed case letters, e.g. `rockRDS`
    Letters,
    /// Mixed case letters and digits, e.g. `rock2022RDS`
    Alphanumeric,
    /// Anything else, e.g. non ascii text or merged words
    Other,
}

fn all_chars(word: &str, f: fn(char) -> bool) -> bool {
    !word.is_empty() && word.chars().all(f)
}

impl Shape {
    /// Every shape, in matching order.
    pub const ALL: [Shape; 8] = [
        Shape::Count,
        Shape::Digits,
        Shape::Lower,
        Shape::Capitalized,
        Shape::Upper,
        Shape::Letters,
        Shape::Alphanumeric,
        Shape::Other,
    ];

    /// The first shape matching the word.
    pub fn of(word: &str) -> Shape {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.matches(word))
            .unwrap_or(Shape::Other)
    }

    fn matches(self, word: &str) -> bool {
        match self {
            Shape::Count => {
                word.starts_with(|c: char| matches!(c, '1'..='9'))
                    && all_chars(word, |c| c.is_ascii_digit())
            }
            Shape::Digits => all_chars(word, |c| c.is_ascii_digit()),
            Shape::Lower => all_chars(word, |c| c.is_ascii_lowercase()),
            Shape::Capitalized => {
                word.starts_with(|c: char| c.is_ascii_uppercase())
                    && word.chars().skip(1).all(|c| c.is_ascii_lowercase())
            }
            Shape::Upper => all_chars(word, |c| c.is_ascii_uppercase()),
            Shape::Letters => all_chars(word, |c| c.is_ascii_alphabetic()),
            Shape::Alphanumeric => all_chars(word, |c| c.is_ascii_alphanumeric()),
            // also the empty word
            Shape::Other => true,
        }
    }

    /// The fixed first character, only for shapes that constrain it.
    fn head(self) -> &'static str {
        match self {
            Shape::Count => "[1-9]",
            Shape::Capitalized => "[A-Z]",
            _ => "",
        }
    }

    /// The repeated character class.
    fn class(self) -> &'static str {
        match self {
            Shape::Count | Shape::Digits => "[0-9]",
            Shape::Lower | Shape::Capitalized => "[a-z]",
            Shape::Upper => "[A-Z]",
            Shape::Letters => "[a-zA-Z]",
            Shape::Alphanumeric => "[0-9a-zA-Z]",
            Shape::Other => "(?s:.)",
        }
    }

    /// The number of characters matched by the head.
    fn budget(self) -> usize {
        if self.head().is_empty() {
            0
        } else {
            1
        }
    }

    /// Render the shape for words between `min` and `max` characters.
    pub fn regex(self, min: usize, max: usize) -> String {
        let (min, max) = (
            min.saturating_sub(self.budget()),
            max.saturating_sub(self.budget()),
        );
        let repeat = match (min, max) {
            (0, 0) => None,
            (0, 1) => Some("?".to_string()),
            (1, 1) => Some("".to_string()),
            (min, max) if min == max => Some(format!("{{{min}}}")),
            (min, max) => Some(format!("{{{min},{max}}}")),
        };
        let mut result = self.head().to_string();
        if let Some(repeat) = repeat {
            result.push_str(self.class());
            result.push_str(&repeat);
        }
        if result.is_empty() {
            EMPTY_GROUP.to_string()
        } else {
            result
        }
    }
}

/// How many words matched a shape, and their length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// The number of words.
    pub count: usize,
    /// The shortest word length, in chars.
    pub min: usize,
    /// The longest word length, in chars.
    pub max: usize,
}

/// The classification profile of a set of words.
#[derive(Debug, Default)]
pub struct Profile<'a> {
    /// The distinct words, in first-seen order.
    distinct: Vec<&'a str>,
    occurrences: FxHashMap<&'a str, usize>,
    buckets: BTreeMap<Shape, Bucket>,
    words: Vec<&'a str>,
}

impl<'a> FromIterator<&'a str> for Profile<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut profile = Profile::default();
        iter.into_iter().for_each(|word| profile.put(word));
        profile
    }
}

impl<'a> Profile<'a> {
    pub fn put(&mut self, word: &'a str) {
        self.words.push(word);
        let count = self.occurrences.entry(word).or_insert(0);
        if *count == 0 {
            self.distinct.push(word);
        }
        *count += 1;

        let len = word.chars().count();
        self.buckets
            .entry(Shape::of(word))
            .and_modify(|bucket| {
                bucket.count += 1;
                bucket.min = bucket.min.min(len);
                bucket.max = bucket.max.max(len);
            })
            .or_insert(Bucket {
                count: 1,
                min: len,
                max: len,
            });
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn occurrences(&self, word: &str) -> usize {
        self.occurrences.get(word).copied().unwrap_or(0)
    }

    pub fn bucket(&self, shape: Shape) -> Option<&Bucket> {
        self.buckets.get(&shape)
    }

    /// Render the words, enumerating them when the vocabulary is small or skewed.
    pub fn regex(&self, config: &Config) -> String {
        if self.distinct.len() <= config.enum_count {
            return enumerate(&self.distinct);
        }

        let total = self.total() as f64;
        let frequent: Vec<&str> = self
            .distinct
            .iter()
            .copied()
            .filter(|word| self.occurrences(word) as f64 / total > config.enum_ratio)
            .collect();
        if frequent.is_empty() {
            return self.shape_regex();
        }

        let remain: Profile = self
            .words
            .iter()
            .copied()
            .filter(|word| !frequent.contains(word))
            .collect();
        tracing::debug!(
            frequent = frequent.len(),
            remain = remain.total(),
            "partial enumeration"
        );
        if remain.total() == 0 {
            enumerate(&frequent)
        } else {
            format!("(?:{}|{})", enumerate(&frequent), remain.shape_regex())
        }
    }

    /// Render the words by shape only.
    pub fn shape_regex(&self) -> String {
        let shapes = self
            .buckets
            .iter()
            .map(|(shape, bucket)| shape.regex(bucket.min, bucket.max))
            .collect::<Vec<String>>();
        match shapes.len() {
            0 => EMPTY_GROUP.to_string(),
            1 => shapes.join(""),
            _ => format!("(?:{})", shapes.join("|")),
        }
    }
}

/// Render literal words as an alternation.
fn enumerate(words: &[&str]) -> String {
    let mut literals = words.iter().map(|word| {
        let literal = regex::escape(word);
        if literal.contains('|') {
            format!("(?:{literal})")
        } else {
            literal
        }
    });
    match words {
        [] => EMPTY_GROUP.to_string(),
        [_] => literals.collect(),
        _ => format!("(?:{})", literals.join("|")),
    }
}

/// Classify a set of words occupying the same position, see [Profile::regex].
pub fn classify<'a, I>(words: I, config: &Config) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    words.into_iter().collect::<Profile>().regex(config)
}

#[test]
fn test_shape_priority() {
    for (word, shape) in [
        ("123", Shape::Count),
        ("0123", Shape::Digits),
        ("0", Shape::Digits),
        ("apple", Shape::Lower),
        ("Apple", Shape::Capitalized),
        ("A", Shape::Capitalized),
        ("APPLE", Shape::Upper),
        ("rockRDS", Shape::Letters),
        ("rock2022RDS", Shape::Alphanumeric),
        ("日本", Shape::Other),
        ("12:30", Shape::Other),
        ("", Shape::Other),
    ] {
        assert_eq!(Shape::of(word), shape, "{}", word);
    }
}

#[test]
fn test_shape_regex() {
    assert_eq!(Shape::Count.regex(1, 1), "[1-9]");
    assert_eq!(Shape::Count.regex(1, 2), "[1-9][0-9]?");
    assert_eq!(Shape::Count.regex(3, 3), "[1-9][0-9]{2}");
    assert_eq!(Shape::Count.regex(2, 5), "[1-9][0-9]{1,4}");
    assert_eq!(Shape::Digits.regex(1, 1), "[0-9]");
    assert_eq!(Shape::Digits.regex(4, 4), "[0-9]{4}");
    assert_eq!(Shape::Capitalized.regex(1, 8), "[A-Z][a-z]{0,7}");
    assert_eq!(Shape::Lower.regex(2, 6), "[a-z]{2,6}");
    assert_eq!(Shape::Other.regex(0, 0), EMPTY_GROUP);
    assert_eq!(Shape::Other.regex(0, 3), "(?s:.){0,3}");
}
