use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use shallow_xml::{concatenate, expand_empty_tags, tokenize, Lexer, Token, TokenKinds};
use std::fmt::Write;
use std::hint::black_box;

fn document(verses: usize) -> String {
    let mut doc = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE book>\n<book>\n");

    for n in 0..verses {
        let _ = writeln!(
            doc,
            "  <v n='{n}'>In the <a href=\"#x{n}\">beginning</a> &amp; <br/>more<!-- {n} --></v>"
        );

        if n % 50 == 0 {
            doc.push_str("  <![CDATA[<raw & data/>]]>\n  <broken \n");
        }
    }

    doc.push_str("</book>\n");
    doc
}

fn lexing(c: &mut Criterion) {
    let input = document(2_000);
    let mut group = c.benchmark_group("lexing");

    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("lexer", |b| b.iter(|| Lexer::new(black_box(&input)).count()));

    group.bench_function("tokenize", |b| b.iter(|| tokenize(black_box(&input)).count()));

    group.finish();
}

fn rewriting(c: &mut Criterion) {
    let input = document(2_000);
    let mut group = c.benchmark_group("rewriting");

    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("round_trip", |b| {
        b.iter(|| concatenate(tokenize(black_box(&input)), None))
    });

    group.bench_function("text_only", |b| {
        b.iter(|| concatenate(tokenize(black_box(&input)), Some(TokenKinds::TEXT)))
    });

    group.bench_function("set_attribute", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&input)).map(|mut token| {
                if let Token::StartTag(tag) = &mut token {
                    tag.set_attribute("class", "x");
                }

                token
            });

            concatenate(tokens, None)
        })
    });

    group.bench_function("expand_empty_tags", |b| {
        b.iter(|| concatenate(expand_empty_tags(tokenize(black_box(&input)), &[]), None))
    });

    group.finish();
}

criterion_group!(benches, lexing, rewriting);
criterion_main!(benches);
