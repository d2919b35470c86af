// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module contains the logic to reduce the number of words of a [Record].
//!
//! Two words are merged by absorbing the delimiter between them: `new_word = words[i] + delimiters[i] + words[i+1]`.
//! The delimiter to absorb is picked by [DelimiterPriority], the highest first.

use crate::Record;

/// The merge priority of a delimiter. Variants are declared from the lowest to the highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DelimiterPriority {
    /// `()<>{}`
    Bracket,
    /// `'"` and backtick
    Quote,
    /// `,!?;:`
    Clause,
    /// `.`
    Period,
    /// Any other single character, e.g. `-`, `/` or a space
    Other,
    /// `_`
    Underscore,
    /// Multi characters delimiter like `--` or ` - `
    Long,
}

impl DelimiterPriority {
    /// Compute the priority of a delimiter. Trailing whitespaces are ignored.
    pub fn of(delimiter: &str) -> DelimiterPriority {
        let mut chars = delimiter.trim_end().chars();
        match (chars.next(), chars.next()) {
            // only whitespace, considered as a single space
            (None, _) => DelimiterPriority::Other,
            (Some(_), Some(_)) => DelimiterPriority::Long,
            (Some(c), None) => match c {
                '_' => DelimiterPriority::Underscore,
                '.' => DelimiterPriority::Period,
                ',' | '!' | '?' | ';' | ':' => DelimiterPriority::Clause,
                '\'' | '"' | '`' => DelimiterPriority::Quote,
                '(' | ')' | '<' | '>' | '{' | '}' => DelimiterPriority::Bracket,
                _ => DelimiterPriority::Other,
            },
        }
    }
}

/// The position of the delimiter to absorb next: the highest priority, the leftmost on ties.
fn next_merge(delimiters: &[String]) -> Option<usize> {
    // max_by_key keeps the last maximum, iterate backward to get the leftmost one.
    (0..delimiters.len())
        .rev()
        .max_by_key(|pos| DelimiterPriority::of(&delimiters[*pos]))
}

impl Record {
    /// Merge words until the record holds at most `target` words.
    ///
    /// The current record is returned unchanged when it is already small enough.
    ///
    /// # Panics
    ///
    /// When `target` is 0, a record with words can't be reduced to nothing.
    pub fn merge(&self, target: usize) -> Record {
        assert!(target > 0, "merge target must be positive");
        let mut words = self.words().to_vec();
        let mut delimiters = self.delimiters().to_vec();
        while words.len() > target {
            let pos = match next_merge(&delimiters) {
                Some(pos) => pos,
                None => break,
            };
            let delimiter = delimiters.remove(pos);
            let next = words.remove(pos + 1);
            words[pos].push_str(&delimiter);
            words[pos].push_str(&next);
        }
        Record::new(
            self.prefix().to_string(),
            self.suffix().to_string(),
            words,
            delimiters,
        )
    }
}

#[test]
fn test_priority() {
    use DelimiterPriority::*;
    for (delimiter, priority) in [
        ("--", Long),
        (" - ", Long),
        ("- ", Other),
        ("_", Underscore),
        ("_ ", Underscore),
        (" ", Other),
        ("  ", Other),
        ("/", Other),
        (".", Period),
        (", ", Clause),
        (":", Clause),
        ("'", Quote),
        ("\"", Quote),
        ("(", Bracket),
        ("}", Bracket),
        ("年", Other),
    ] {
        assert_eq!(DelimiterPriority::of(delimiter), priority, "{:?}", delimiter);
    }
    assert!(Long > Underscore && Underscore > Other && Other > Period);
    assert!(Period > Clause && Clause > Quote && Quote > Bracket);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_noop() {
        let record = Record::split("2022/12/08 11:39");
        assert_eq!(record.merge(5), record);
        assert_eq!(record.merge(42), record);
        let empty = Record::split("!!");
        assert_eq!(empty.merge(1), empty);
    }

    #[test]
    fn test_merge_priority() {
        // The long ` - ` goes first, then the single characters from the left.
        let record = Record::split("voluntary non-profit - private");
        let merged = record.merge(3);
        assert_eq!(merged.words(), ["voluntary", "non", "profit - private"]);
        assert_eq!(merged.delimiters(), [" ", "-"]);
        let merged = record.merge(2);
        assert_eq!(merged.words(), ["voluntary non", "profit - private"]);
        assert_eq!(merged.delimiters(), ["-"]);
        let merged = record.merge(1);
        assert_eq!(merged.words(), ["voluntary non-profit - private"]);
        assert!(merged.delimiters().is_empty());
    }

    #[test]
    fn test_merge_leftmost() {
        let record = Record::split("a.b.c.d");
        let merged = record.merge(3);
        assert_eq!(merged.words(), ["a.b", "c", "d"]);
        assert_eq!(merged.delimiters(), [".", "."]);
    }

    #[test]
    fn test_merge_dates() {
        let record = Record::split("[2022/12/08 11:39:00]");
        let merged = record.merge(2);
        assert_eq!(merged.prefix(), "[");
        assert_eq!(merged.suffix(), "]");
        assert_eq!(merged.words(), ["2022/12/08 11:39", "00"]);
    }

    #[test]
    fn test_merge_keeps_sentence() {
        for sentence in [
            "  _ _-- apple-- b123 _-_ 0123 __ --",
            "https://github.com/madokast/TableInsighter4",
            "key=\"value\", (other): 'x'; y_z",
        ] {
            let record = Record::split(sentence);
            for target in 1..=record.words_num() {
                let merged = record.merge(target);
                assert_eq!(merged.words_num(), target);
                assert_eq!(merged.sentence(), sentence);
                assert_eq!(record.sentence(), sentence);
            }
        }
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_merge_zero() {
        Record::split("a b").merge(0);
    }
}
