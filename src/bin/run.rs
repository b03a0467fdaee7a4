//! Trains IBM Model 1 on a parallel corpus read from stdin and prints the
//! alignment of every sentence pair.
//!
//! Each input line holds the target sentence and the source sentence separated
//! by a tab, both tokenized with whitespace. Alignments are printed one line
//! per pair as Moses `i-j` links, source position first.
//!
//! # Usage
//! ```bash
//! run [--iterations 10] [--lexicon] [--verbose] < corpus.tsv
//! ```

use std::io::{BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use ibm1align::{Error, Model, SentencePair};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of EM iterations
    #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
    iterations: i64,

    /// Print the most probable translation of every target word instead of
    /// the alignments
    #[arg(long)]
    lexicon: bool,

    /// Enable debug logging of every EM iteration
    #[arg(short, long)]
    verbose: bool,
}

/// Splits a `target<TAB>source` line. A missing tab leaves the source empty.
fn parse_pair(line: &str) -> SentencePair {
    let (target, source) = line.split_once('\t').unwrap_or((line, ""));
    SentencePair::new(target.split_whitespace(), source.split_whitespace())
}

fn num_iterations(iterations: i64) -> Result<usize, Error> {
    usize::try_from(iterations).map_err(|_| {
        Error::InvalidArgument(format!(
            "the number of iterations must not be negative, got {iterations}"
        ))
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let num_iter = num_iterations(args.iterations)?;

    let mut corpus = vec![];
    for (i, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {} of the corpus", i + 1))?;
        corpus.push(parse_pair(&line));
    }

    let mut model = Model::new();
    let table = model.train(&corpus, num_iter)?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    if args.lexicon {
        for target in table.vocabulary().target_words() {
            if let Some((source, prob)) = table.best_translation(target) {
                writeln!(out, "{target}\t{}\t{prob}", source.unwrap_or("NULL"))?;
            }
        }
    } else {
        for aligned in model.align_corpus(&corpus)? {
            writeln!(out, "{aligned}")?;
        }
    }
    out.flush()?;

    Ok(())
}
