// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module checks that a pattern matches every sentence it was inferred from.

use regex::Regex;

use crate::Error;

/// Compile the pattern and full match every sentence, reporting the first one that is not matched.
#[tracing::instrument(level = "debug", skip(sentences))]
pub fn verify<I, S>(pattern: &str, sentences: I) -> Result<(), Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let re = Regex::new(&format!("^(?:{pattern})$"))?;
    match sentences
        .into_iter()
        .find(|sentence| !re.is_match(sentence.as_ref()))
    {
        Some(sentence) => Err(Error::Mismatch {
            line: sentence.as_ref().to_string(),
            pattern: pattern.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        assert!(verify(r"^\$[0-9]+$", ["$1", "$42"]).is_ok());
        assert!(verify(r"a|b", ["a", "b"]).is_ok());
        match verify(r"\$[0-9]+", ["$1", "$42x", "$x"]) {
            Err(Error::Mismatch { line, pattern }) => {
                assert_eq!(line, "$42x");
                assert_eq!(pattern, r"\$[0-9]+");
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn test_verify_bad_regex() {
        assert!(matches!(verify("(", ["a"]), Err(Error::BadRegex(_))));
    }
}
