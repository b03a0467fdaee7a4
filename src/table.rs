use alloc::format;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::map::HashMap2;
use crate::vocab::{Vocabulary, WordId};

/// Translation probabilities `t(e | f)` of target words `e` given source
/// words `f`.
///
/// Only pairs written explicitly are stored. Before the first M-step every
/// other pair reads as the uniform value `1 / |target vocabulary|`; after it,
/// an in-vocabulary pair that was not written reads as 0. Reads never insert
/// entries.
#[derive(Clone, Debug)]
pub struct TranslationTable {
    vocab: Vocabulary,
    default: f64,
    probs: HashMap2<WordId, WordId, f64>,
    iterations: usize,
}

impl TranslationTable {
    /// Creates the uniform table of iteration 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the target vocabulary is empty.
    pub fn new(vocab: Vocabulary) -> Result<Self> {
        if vocab.num_target_words() == 0 {
            return Err(Error::Configuration(
                "the target vocabulary is empty".into(),
            ));
        }
        Ok(Self {
            default: 1.0 / vocab.num_target_words() as f64,
            vocab,
            probs: HashMap2::new(),
            iterations: 0,
        })
    }

    /// Probability of `target` given `source`, where `None` is the null token.
    pub fn probability(&self, target: &str, source: Option<&str>) -> f64 {
        self.probability_of(self.vocab.target_id(target), self.vocab.source_id(source))
    }

    pub fn probability_by_id(&self, target: WordId, source: WordId) -> f64 {
        if let Some(&prob) = self.probs.get(&target, &source) {
            return prob;
        }
        if self.iterations == 0 || !self.vocab.contains_ids(target, source) {
            self.default
        } else {
            0.0
        }
    }

    /// Lookup where either word may be unknown to the vocabulary.
    pub(crate) fn probability_of(&self, target: Option<WordId>, source: Option<WordId>) -> f64 {
        match (target, source) {
            (Some(target), Some(source)) => self.probability_by_id(target, source),
            _ => self.default,
        }
    }

    /// Overwrites one entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if an id is outside the vocabulary
    /// or `value` is not in `[0, 1]`.
    pub fn set(&mut self, target: WordId, source: WordId, value: f64) -> Result<()> {
        if !self.vocab.contains_ids(target, source) {
            return Err(Error::InvalidArgument(format!(
                "unknown word pair ({target}, {source})"
            )));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::InvalidArgument(format!(
                "probability {value} is outside [0, 1]"
            )));
        }
        self.probs.insert(target, source, value);
        Ok(())
    }

    /// Replaces every stored entry with the result of an M-step.
    pub(crate) fn commit(&mut self, probs: HashMap2<WordId, WordId, f64>) {
        self.probs = probs;
        self.iterations += 1;
    }

    pub fn default_probability(&self) -> f64 {
        self.default
    }

    /// Number of M-steps applied to this table.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Number of explicitly stored pairs.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Stored source candidates of `target`, most probable first. Ties are
    /// ordered by source id, so the null token comes first among equals.
    pub fn translations(&self, target: &str) -> Vec<(Option<&str>, f64)> {
        let Some(row) = self
            .vocab
            .target_id(target)
            .and_then(|id| self.probs.row(&id))
        else {
            return vec![];
        };
        let mut candidates: Vec<_> = row.iter().map(|(&source, &prob)| (source, prob)).collect();
        candidates.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        candidates
            .into_iter()
            .filter_map(|(source, prob)| Some((self.vocab.source_word(source)?, prob)))
            .collect()
    }

    pub fn best_translation(&self, target: &str) -> Option<(Option<&str>, f64)> {
        self.translations(target).into_iter().next()
    }

    /// Visits every stored entry as `(target, source, probability)`.
    pub fn for_each<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a str, Option<&'a str>, f64),
    {
        self.probs.for_each(|(&target, &source, &prob)| {
            if let (Some(target), Some(source)) =
                (self.vocab.target_word(target), self.vocab.source_word(source))
            {
                f(target, source, prob);
            }
        });
    }
}
