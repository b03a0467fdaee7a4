//! Word alignment with IBM Model 1.
//!
//! Translation probabilities `t(e | f)` between target words `e` and source
//! words `f` are learned from a parallel corpus with the EM algorithm, then
//! every target word of a sentence pair is aligned to its most probable source
//! word, or to nothing when the synthetic null token wins.
//!
//! Reference:
//! Peter F. Brown, Stephen A. Della Pietra, Vincent J. Della Pietra and
//! Robert L. Mercer. The Mathematics of Statistical Machine Translation:
//! Parameter Estimation. Computational Linguistics 19(2), 1993.
//!
//! ```
//! use ibm1align::{Model, SentencePair};
//!
//! let corpus = vec![
//!     SentencePair::new(["the", "dog"], ["le", "chien"]),
//!     SentencePair::new(["the", "cat"], ["le", "chat"]),
//!     SentencePair::new(["dog"], ["chien"]),
//! ];
//! let mut model = Model::new();
//! model.train(&corpus, 20).unwrap();
//!
//! let aligned = model.align(&corpus[0]).unwrap();
//! assert_eq!(&[(0, 0), (1, 1)], aligned.links());
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate alloc;

mod aligner;
mod error;
mod map;
mod sentence;
mod table;
mod trainer;
mod vocab;

pub use aligner::{align, AlignedPair, Model};
pub use error::{Error, Result};
pub use sentence::SentencePair;
pub use table::TranslationTable;
pub use trainer::{train, Counts, Trainer};
pub use vocab::{Vocabulary, WordId, NULL_WORD};
