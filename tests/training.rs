// End-to-end training and alignment on small hand-checked corpora.

use std::collections::HashMap;

use ibm1align::{align, train, Error, Model, SentencePair, Trainer};

fn dog_cat_corpus() -> Vec<SentencePair> {
    vec![
        SentencePair::new(["the", "dog"], ["le", "chien"]),
        SentencePair::new(["the", "cat"], ["le", "chat"]),
    ]
}

fn assert_close(expected: f64, actual: f64, tolerance: f64) {
    assert!(
        (expected - actual).abs() < tolerance,
        "expected {expected} within {tolerance}, got {actual}"
    );
}

#[test]
fn zero_iterations_keep_the_uniform_table() {
    let table = train(&dog_cat_corpus(), 0).unwrap();

    for target in ["the", "dog", "cat"] {
        for source in [None, Some("le"), Some("chien"), Some("chat")] {
            assert_eq!(1.0 / 3.0, table.probability(target, source));
        }
    }
    assert!(table.is_empty());
}

#[test]
fn probabilities_converge_on_unambiguous_words() {
    let table = train(&dog_cat_corpus(), 20).unwrap();

    assert_close(1.0, table.probability("dog", Some("chien")), 1e-3);
    assert_close(1.0, table.probability("cat", Some("chat")), 1e-3);
    assert_close(0.0, table.probability("the", Some("chat")), 1e-3);
    assert_close(0.0, table.probability("the", Some("chien")), 1e-3);
    assert_eq!(0.0, table.probability("dog", Some("chat")));
    assert_eq!(0.0, table.probability("cat", Some("chien")));
}

#[test]
fn probabilities_converge_on_the_shared_word() {
    // "the" / "le" only separate from the other words at a rate of about 1/n.
    let table = train(&dog_cat_corpus(), 1000).unwrap();

    assert_close(1.0, table.probability("the", Some("le")), 1e-3);
    assert_close(0.0, table.probability("dog", Some("le")), 1e-3);
    assert_close(0.0, table.probability("cat", Some("le")), 1e-3);
}

#[test]
fn probabilities_sum_to_one_per_source_word() {
    let corpus = vec![
        SentencePair::new(["the", "dog", "runs"], ["le", "chien", "court"]),
        SentencePair::new(["the", "cat"], ["le", "chat"]),
        SentencePair::new(["a", "cat", "runs"], ["un", "chat", "court"]),
        SentencePair::new(["the", "the"], ["le"]),
    ];
    for num_iter in [1, 3, 10] {
        let table = train(&corpus, num_iter).unwrap();
        let mut sums: HashMap<Option<String>, f64> = HashMap::new();
        table.for_each(|_, source, prob| {
            assert!((0.0..=1.0).contains(&prob));
            *sums.entry(source.map(String::from)).or_default() += prob;
        });

        assert_eq!(table.vocabulary().num_source_words(), sums.len());
        for sum in sums.into_values() {
            assert_close(1.0, sum, 1e-6);
        }
    }
}

#[test]
fn unseen_pairs_read_zero_and_unknown_words_read_the_default() {
    let table = train(&dog_cat_corpus(), 3).unwrap();
    let stored = table.len();

    assert_eq!(0.0, table.probability("dog", Some("chat")));
    assert_eq!(1.0 / 3.0, table.probability("bird", Some("le")));
    assert_eq!(1.0 / 3.0, table.probability("dog", Some("oiseau")));
    assert_eq!(stored, table.len());
}

#[test]
fn updates_shrink_while_converging() {
    let mut trainer = Trainer::new(&dog_cat_corpus()).unwrap();
    let diffs: Vec<f64> = (0..10).map(|_| trainer.update()).collect();

    assert_eq!(10, trainer.iterations());
    assert!(diffs[0] > 0.0);
    assert!(diffs[9] < diffs[0]);
    assert!(diffs[9] < 1e-2);
}

#[test]
fn tied_null_keeps_the_shared_word_unaligned() {
    // "le" occurs in exactly the sentences null does, so t(the, le) equals
    // t(the, null) at every iteration and null wins the tie.
    let table = train(&dog_cat_corpus(), 20).unwrap();
    assert_eq!(
        table.probability("the", None),
        table.probability("the", Some("le"))
    );

    let aligned = align(&dog_cat_corpus()[0], Some(&table)).unwrap();
    assert_eq!(&[(1, 1)], aligned.links());
}

#[test]
fn alignment_follows_the_trained_table() {
    let mut corpus = dog_cat_corpus();
    corpus.push(SentencePair::new(["dog"], ["chien"]));

    let mut model = Model::new();
    model.train(&corpus, 20).unwrap();

    let aligned = model.align(&corpus[0]).unwrap();
    assert_eq!(&[(0, 0), (1, 1)], aligned.links());
    assert_eq!(&corpus[0], aligned.pair());

    let aligned = model.align(&corpus[1]).unwrap();
    assert_eq!("0-0 1-1", aligned.to_string());

    let aligned = model
        .align(&SentencePair::new(["dog", "the", "dog"], ["chien", "le"]))
        .unwrap();
    assert_eq!(&[(0, 0), (1, 1), (2, 0)], aligned.links());
}

#[test]
fn lexicon_lists_the_best_translations() {
    let mut corpus = dog_cat_corpus();
    corpus.push(SentencePair::new(["dog"], ["chien"]));
    let table = train(&corpus, 20).unwrap();

    assert_eq!(Some("chien"), table.best_translation("dog").and_then(|(f, _)| f));
    assert_eq!(Some("chat"), table.best_translation("cat").and_then(|(f, _)| f));
    assert_eq!(Some("le"), table.best_translation("the").and_then(|(f, _)| f));
    assert_eq!(None, table.best_translation("bird"));
}

#[test]
fn empty_target_sentence_aligns_to_nothing() {
    let table = train(&dog_cat_corpus(), 5).unwrap();
    let aligned = align(
        &SentencePair::new(Vec::<String>::new(), ["le", "chien"]),
        Some(&table),
    )
    .unwrap();
    assert!(aligned.links().is_empty());
}

#[test]
fn aligning_before_training_fails() {
    let model = Model::new();
    assert_eq!(
        Err(Error::ModelNotTrained),
        model.align(&dog_cat_corpus()[0])
    );
    assert!(matches!(
        align(&dog_cat_corpus()[0], None),
        Err(Error::ModelNotTrained)
    ));
}

#[test]
fn empty_corpora_are_rejected() {
    assert!(matches!(train(&[], 5), Err(Error::Configuration(_))));
    assert!(matches!(
        train(&[SentencePair::new(Vec::<String>::new(), ["le"])], 5),
        Err(Error::Configuration(_))
    ));
    assert!(Trainer::new(&[]).is_err());
}
