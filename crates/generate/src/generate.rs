// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! Sample lines generator
//!
//! The main function is [gen_lines], it produces an endless, reproducible mix of
//! log lines, urls, prices, counters and random words:
//!
//! ```rust
//! # use regex_finder_generate::{gen_lines};
//! let lines: Vec<String> = gen_lines().take(3).collect();
//! assert_eq!(lines, gen_lines().take(3).collect::<Vec<_>>());
//! ```

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const SEED: u64 = 42;

const LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARNING", "ERROR"];
const SERVICES: [&str; 5] = ["nova", "neutron", "keystone", "glance", "zuul"];
const HOSTS: [&str; 3] = ["github", "gitlab", "opendev"];
const NOUNS: [&str; 4] = ["apple", "banana", "request", "node"];

fn fixed_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(SEED)
}

fn pick<'a>(rng: &mut impl Rng, choices: &[&'a str]) -> &'a str {
    choices[rng.random_range(0..choices.len())]
}

fn gen_word(rng: &mut impl Rng) -> String {
    let word_size = rng.random_range(2..18);
    rng.sample_iter(&rand::distr::Alphanumeric)
        .take(word_size)
        .map(char::from)
        .collect()
}

fn gen_log(rng: &mut impl Rng) -> String {
    format!(
        "2022-{:02}-{:02} {:02}:{:02}:{:02}.{:03} {} {}[{}]: {} {}",
        rng.random_range(1..13),
        rng.random_range(1..29),
        rng.random_range(0..24),
        rng.random_range(0..60),
        rng.random_range(0..60),
        rng.random_range(0..1000),
        pick(rng, &LEVELS),
        pick(rng, &SERVICES),
        rng.random_range(1..65536),
        gen_word(rng),
        rng.random_range(0..10000),
    )
}

fn gen_url(rng: &mut impl Rng) -> String {
    format!(
        "https://{}.com/{}/{}",
        pick(rng, &HOSTS),
        gen_word(rng).to_lowercase(),
        gen_word(rng),
    )
}

fn gen_line(rng: &mut impl Rng) -> String {
    match rng.random_range(0..5) {
        0 => gen_log(rng),
        1 => gen_url(rng),
        2 => format!("${}", rng.random_range(1..1000)),
        3 => format!("{} {}s", rng.random_range(2..100), pick(rng, &NOUNS)),
        _ => {
            let mut result = String::with_capacity(256);
            for _ in 0..rng.random_range(2..10) {
                result.push_str(&gen_word(rng));
                result.push(' ');
            }
            result.pop();
            result
        }
    }
}

struct RandomLine {
    rng: ChaCha8Rng,
}

impl Iterator for RandomLine {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        Some(gen_line(&mut self.rng))
    }
}

/// An endless iterator of sample lines, always the same for a given build.
pub fn gen_lines() -> impl Iterator<Item = String> {
    RandomLine { rng: fixed_rng() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_lines_is_reproducible() {
        let first = gen_lines().take(50).collect::<Vec<String>>();
        let second = gen_lines().take(50).collect::<Vec<String>>();
        assert_eq!(first, second);
    }

    #[test]
    fn test_gen_line_kinds() {
        let mut rng = fixed_rng();
        let log = gen_log(&mut rng);
        assert!(log.starts_with("2022-"), "{}", log);
        assert!(LEVELS.iter().any(|level| log.contains(level)), "{}", log);
        let url = gen_url(&mut rng);
        assert!(url.starts_with("https://"), "{}", url);
        assert_eq!(url.matches('/').count(), 4, "{}", url);
    }

    #[test]
    fn test_gen_word() {
        let mut rng = fixed_rng();
        for _ in 0..100 {
            let word = gen_word(&mut rng);
            assert!((2..18).contains(&word.len()));
            assert!(word.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
