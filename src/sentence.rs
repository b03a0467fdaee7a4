use alloc::string::String;
use alloc::vec::Vec;

/// One example of the parallel corpus: a target-language sentence and its
/// source-language counterpart, both already tokenized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SentencePair {
    target_words: Vec<String>,
    source_words: Vec<String>,
}

impl SentencePair {
    pub fn new<T, S>(target_words: T, source_words: S) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            target_words: target_words.into_iter().map(Into::into).collect(),
            source_words: source_words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    pub fn source_words(&self) -> &[String] {
        &self.source_words
    }
}
