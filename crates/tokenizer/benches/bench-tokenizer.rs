// Copyright (C) 2026 Red Hat
// SPDX-License-Identifier: Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use regex_finder_generate::gen_lines;
use regex_finder_tokenizer::Record;

pub fn tokenizer_split(c: &mut Criterion) {
    let lines = gen_lines().take(202).collect::<Vec<String>>();
    c.bench_function("tokenizer::split", |b| {
        b.iter(|| {
            lines
                .iter()
                .map(|line| Record::split(black_box(line)))
                .count()
        })
    });
}

pub fn tokenizer_merge(c: &mut Criterion) {
    let records = gen_lines()
        .take(202)
        .map(|line| Record::split(&line))
        .collect::<Vec<Record>>();
    c.bench_function("tokenizer::merge", |b| {
        b.iter(|| records.iter().map(|record| record.merge(black_box(2))).count())
    });
}

criterion_group!(benches, tokenizer_split, tokenizer_merge);
criterion_main!(benches);
