use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::sentence::SentencePair;

pub type WordId = u32;

/// Source-side id of the synthetic token standing for "aligned to nothing".
pub const NULL_WORD: WordId = 0;

/// Distinct target and source words of a corpus, interned to dense ids in
/// first-seen order. Source id 0 is always the null token.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    target_ids: HashMap<String, WordId>,
    target_words: Vec<String>,
    source_ids: HashMap<String, WordId>,
    source_words: Vec<Option<String>>,
}

/// A sentence pair translated to ids, with the null token prepended to the
/// source side.
#[derive(Clone, Debug)]
pub(crate) struct InternedPair {
    pub target: Vec<WordId>,
    pub source: Vec<WordId>,
}

/// Assigns the next id to `word`. Returns `false` if it already has one.
fn intern(ids: &mut HashMap<String, WordId>, next_id: usize, word: &str) -> Result<bool> {
    if ids.contains_key(word) {
        return Ok(false);
    }
    let id = WordId::try_from(next_id)
        .map_err(|_| Error::Configuration("vocabulary exceeds the id space".into()))?;
    ids.insert(word.to_owned(), id);
    Ok(true)
}

impl Vocabulary {
    /// Collects the vocabularies of both languages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the corpus is empty or contains
    /// no target word, since the uniform initial probability is undefined.
    pub fn from_corpus(corpus: &[SentencePair]) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::Configuration("the corpus is empty".into()));
        }
        let mut vocab = Self {
            target_ids: HashMap::new(),
            target_words: vec![],
            source_ids: HashMap::new(),
            source_words: vec![None],
        };
        for pair in corpus {
            for word in pair.target_words() {
                if intern(&mut vocab.target_ids, vocab.target_words.len(), word)? {
                    vocab.target_words.push(word.clone());
                }
            }
            for word in pair.source_words() {
                if intern(&mut vocab.source_ids, vocab.source_words.len(), word)? {
                    vocab.source_words.push(Some(word.clone()));
                }
            }
        }
        if vocab.target_words.is_empty() {
            return Err(Error::Configuration(
                "the corpus contains no target word".into(),
            ));
        }
        Ok(vocab)
    }

    pub fn target_id(&self, word: &str) -> Option<WordId> {
        self.target_ids.get(word).copied()
    }

    /// `None` asks for the null token.
    pub fn source_id(&self, word: Option<&str>) -> Option<WordId> {
        match word {
            Some(word) => self.source_ids.get(word).copied(),
            None => Some(NULL_WORD),
        }
    }

    pub fn target_word(&self, id: WordId) -> Option<&str> {
        self.target_words.get(id as usize).map(String::as_str)
    }

    /// The outer `None` means an unknown id, the inner one the null token.
    pub fn source_word(&self, id: WordId) -> Option<Option<&str>> {
        self.source_words.get(id as usize).map(Option::as_deref)
    }

    pub fn num_target_words(&self) -> usize {
        self.target_words.len()
    }

    /// Includes the null token.
    pub fn num_source_words(&self) -> usize {
        self.source_words.len()
    }

    pub fn target_words(&self) -> impl Iterator<Item = &str> {
        self.target_words.iter().map(String::as_str)
    }

    pub fn source_words(&self) -> impl Iterator<Item = Option<&str>> {
        self.source_words.iter().map(Option::as_deref)
    }

    pub(crate) fn contains_ids(&self, target: WordId, source: WordId) -> bool {
        (target as usize) < self.target_words.len() && (source as usize) < self.source_words.len()
    }

    pub(crate) fn intern_pair(&self, pair: &SentencePair) -> Option<InternedPair> {
        let target = pair
            .target_words()
            .iter()
            .map(|word| self.target_id(word))
            .collect::<Option<Vec<_>>>()?;
        let mut source = Vec::with_capacity(pair.source_words().len() + 1);
        source.push(NULL_WORD);
        for word in pair.source_words() {
            source.push(self.source_id(Some(word))?);
        }
        Some(InternedPair { target, source })
    }
}
