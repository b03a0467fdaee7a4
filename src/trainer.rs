use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::map::HashMap2;
use crate::sentence::SentencePair;
use crate::table::TranslationTable;
use crate::vocab::{InternedPair, Vocabulary, WordId};

/// Expected alignment counts collected by one E-step.
#[derive(Clone, Debug, Default)]
pub struct Counts {
    pairs: HashMap2<WordId, WordId, f64>,
    totals: HashMap<WordId, f64>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, target: WordId, source: WordId, count: f64) {
        *self.pairs.get_or_insert(target, source, 0.0) += count;
        *self.totals.entry(source).or_insert(0.0) += count;
    }

    /// Adds the counts of another shard of the same iteration.
    pub fn merge(&mut self, other: Counts) {
        other
            .pairs
            .for_each(|(&target, &source, &count)| self.add(target, source, count));
    }

    pub fn count(&self, target: WordId, source: WordId) -> f64 {
        self.pairs.get(&target, &source).copied().unwrap_or(0.0)
    }

    pub fn total(&self, source: WordId) -> f64 {
        self.totals.get(&source).copied().unwrap_or(0.0)
    }

    /// Number of (target, source) pairs that received evidence.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn collect(dataset: &[InternedPair], table: &TranslationTable, row: &mut Vec<f64>) -> Self {
        let mut counts = Self::new();
        for pair in dataset {
            for &target in &pair.target {
                row.clear();
                row.extend(
                    pair.source
                        .iter()
                        .map(|&source| table.probability_by_id(target, source)),
                );
                let total: f64 = row.iter().sum();
                if total == 0.0 {
                    trace!(target_id = target, "no probability mass left, skipping");
                    continue;
                }
                for (&prob, &source) in row.iter().zip(&pair.source) {
                    counts.add(target, source, prob / total);
                }
            }
        }
        counts
    }
}

/// Trains IBM Model 1 translation probabilities by EM.
///
/// The caller steps the training with [`Trainer::update`], or with
/// [`Trainer::expectation`] and [`Trainer::maximization`] when the E-step is
/// split into shards.
pub struct Trainer {
    dataset: Vec<InternedPair>,
    table: TranslationTable,
    row: Vec<f64>,
}

impl Trainer {
    /// Builds the vocabulary and the uniform table of iteration 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the corpus is empty or has no target
    /// word.
    pub fn new(corpus: &[SentencePair]) -> Result<Self> {
        let vocab = Vocabulary::from_corpus(corpus)?;
        let dataset = corpus
            .iter()
            .map(|pair| {
                vocab.intern_pair(pair).ok_or_else(|| {
                    Error::Configuration("a corpus word is missing from the vocabulary".into())
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            dataset,
            table: TranslationTable::new(vocab)?,
            row: vec![],
        })
    }

    pub fn num_pairs(&self) -> usize {
        self.dataset.len()
    }

    /// E-step over the whole corpus.
    pub fn expectation(&mut self) -> Counts {
        self.expectation_over(0..self.dataset.len())
    }

    /// E-step over the sentence pairs in `range`. Out-of-bounds ranges yield
    /// empty counts.
    pub fn expectation_over(&mut self, range: Range<usize>) -> Counts {
        let shard = self.dataset.get(range).unwrap_or(&[]);
        Counts::collect(shard, &self.table, &mut self.row)
    }

    /// M-step: renormalizes `counts` into a new table and commits it.
    ///
    /// Returns the sum of squared differences between the previous and the new
    /// probabilities of every rewritten pair.
    pub fn maximization(&mut self, counts: Counts) -> f64 {
        let mut probs = HashMap2::new();
        let mut diff_total = 0.0;
        counts.pairs.for_each(|(&target, &source, &count)| {
            let total = counts.total(source);
            let prob = if total > 0.0 {
                (count / total).min(1.0)
            } else {
                0.0
            };
            let diff = prob - self.table.probability_by_id(target, source);
            diff_total += diff * diff;
            probs.insert(target, source, prob);
        });
        self.table.commit(probs);
        diff_total
    }

    /// Runs one EM iteration.
    pub fn update(&mut self) -> f64 {
        let counts = self.expectation();
        let diff = self.maximization(counts);
        debug!(iteration = self.table.iterations(), diff, "EM iteration finished");
        diff
    }

    pub fn iterations(&self) -> usize {
        self.table.iterations()
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn finalize(self) -> TranslationTable {
        self.table
    }
}

/// Trains a translation table for `num_iter` EM iterations. With
/// `num_iter == 0` the uniform table is returned untouched.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the corpus is empty or has no target
/// word.
pub fn train(corpus: &[SentencePair], num_iter: usize) -> Result<TranslationTable> {
    let mut trainer = Trainer::new(corpus)?;
    let mut diff = 0.0;
    for _ in 0..num_iter {
        diff = trainer.update();
    }
    let table = trainer.finalize();
    info!(
        pairs = corpus.len(),
        target_words = table.vocabulary().num_target_words(),
        source_words = table.vocabulary().num_source_words(),
        iterations = num_iter,
        diff,
        "training finished"
    );
    Ok(table)
}
