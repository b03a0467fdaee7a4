use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::sentence::SentencePair;
use crate::table::TranslationTable;
use crate::trainer;
use crate::vocab::NULL_WORD;

/// A sentence pair with its word alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedPair {
    pair: SentencePair,
    links: Vec<(usize, usize)>,
}

impl AlignedPair {
    pub fn pair(&self) -> &SentencePair {
        &self.pair
    }

    /// `(target_index, source_index)` links in target order. Target words
    /// aligned to null have no link.
    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    pub fn source_of(&self, target_index: usize) -> Option<usize> {
        self.links
            .iter()
            .find(|&&(j, _)| j == target_index)
            .map(|&(_, i)| i)
    }

    pub fn into_links(self) -> Vec<(usize, usize)> {
        self.links
    }
}

/// Writes the links in Moses format, `i-j` with the source position first,
/// separated by spaces.
impl fmt::Display for AlignedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, (j, i)) in self.links.iter().enumerate() {
            if k != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{i}-{j}")?;
        }
        Ok(())
    }
}

/// Aligns every target word to its most probable source word.
///
/// The null token is examined first and a candidate replaces the current best
/// only if it is strictly more probable, so null wins ties and, among source
/// words, the lowest position wins.
///
/// # Errors
///
/// Returns [`Error::ModelNotTrained`] if `table` is `None`.
pub fn align(pair: &SentencePair, table: Option<&TranslationTable>) -> Result<AlignedPair> {
    let table = table.ok_or(Error::ModelNotTrained)?;
    let vocab = table.vocabulary();
    let source_ids: Vec<_> = pair
        .source_words()
        .iter()
        .map(|word| vocab.source_id(Some(word)))
        .collect();

    let mut links = vec![];
    for (j, word) in pair.target_words().iter().enumerate() {
        let target = vocab.target_id(word);
        let mut best = (table.probability_of(target, Some(NULL_WORD)), None);
        for (i, &source) in source_ids.iter().enumerate() {
            let prob = table.probability_of(target, source);
            if prob > best.0 {
                best = (prob, Some(i));
            }
        }
        if let Some(i) = best.1 {
            links.push((j, i));
        }
    }

    Ok(AlignedPair {
        pair: pair.clone(),
        links,
    })
}

/// Trains a translation table and aligns sentence pairs with it.
#[derive(Clone, Debug, Default)]
pub struct Model {
    table: Option<TranslationTable>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: TranslationTable) -> Self {
        Self { table: Some(table) }
    }

    /// Replaces the model's table by one trained on `corpus`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty corpus or target
    /// vocabulary; the previous table is kept in that case.
    pub fn train(&mut self, corpus: &[SentencePair], num_iter: usize) -> Result<&TranslationTable> {
        let table = trainer::train(corpus, num_iter)?;
        Ok(self.table.insert(table))
    }

    pub fn table(&self) -> Option<&TranslationTable> {
        self.table.as_ref()
    }

    pub fn into_table(self) -> Option<TranslationTable> {
        self.table
    }

    /// # Errors
    ///
    /// Returns [`Error::ModelNotTrained`] before the model has a table.
    pub fn align(&self, pair: &SentencePair) -> Result<AlignedPair> {
        align(pair, self.table.as_ref())
    }

    /// # Errors
    ///
    /// Returns [`Error::ModelNotTrained`] before the model has a table.
    pub fn align_corpus(&self, pairs: &[SentencePair]) -> Result<Vec<AlignedPair>> {
        pairs.iter().map(|pair| self.align(pair)).collect()
    }
}
