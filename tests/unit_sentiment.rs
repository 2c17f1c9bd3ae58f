// Unit tests for sentiment labelling.
//
// Covers the polarity-to-label mapping through the public classify API,
// the built-in lexicon on short tweets, and loading extra lexicon files.

use std::io::Write;

use murmur::sentiment::classifier::{classify, classify_batch};
use murmur::sentiment::label::{Sentiment, SentimentCounts};
use murmur::sentiment::lexicon::LexiconAnalyzer;
use murmur::sentiment::traits::{ConstantAnalyzer, PolarityAnalyzer};

// ============================================================
// Label mapping
// ============================================================

#[test]
fn label_follows_sign_of_polarity() {
    let cases = [
        (1.0, Sentiment::Positive),
        (0.8, Sentiment::Positive),
        (1e-9, Sentiment::Positive),
        (0.0, Sentiment::Neutral),
        (-0.0, Sentiment::Neutral),
        (-1e-9, Sentiment::Negative),
        (-0.5, Sentiment::Negative),
        (-1.0, Sentiment::Negative),
    ];
    for (polarity, expected) in cases {
        let analyzer = ConstantAnalyzer(polarity);
        assert_eq!(
            classify(&analyzer, "anything"),
            expected,
            "polarity {polarity}"
        );
    }
}

#[test]
fn nan_polarity_is_neutral() {
    assert_eq!(
        classify(&ConstantAnalyzer(f64::NAN), "anything"),
        Sentiment::Neutral
    );
}

#[test]
fn batch_keeps_input_order() {
    /// Scores by word count parity so each input gets a known label.
    struct LengthAnalyzer;
    impl PolarityAnalyzer for LengthAnalyzer {
        fn polarity(&self, text: &str) -> f64 {
            match text.split_whitespace().count() {
                0 => 0.0,
                n if n % 2 == 1 => 0.5,
                _ => -0.5,
            }
        }
    }

    let labels = classify_batch(&LengthAnalyzer, &["one", "one two", "", "a b c"]);
    assert_eq!(
        labels,
        vec![
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Positive
        ]
    );
}

#[test]
fn labels_parse_from_cli_names() {
    assert_eq!("positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
    assert_eq!("NEG".parse::<Sentiment>().unwrap(), Sentiment::Negative);
    assert!("happy".parse::<Sentiment>().is_err());
}

// ============================================================
// Built-in lexicon
// ============================================================

#[test]
fn empty_text_is_neutral() {
    let analyzer = LexiconAnalyzer::default();
    assert_eq!(classify(&analyzer, ""), Sentiment::Neutral);
}

#[test]
fn lexicon_labels_cleaned_tweets() {
    let analyzer = LexiconAnalyzer::default();
    assert_eq!(classify(&analyzer, "i love x"), Sentiment::Positive);
    assert_eq!(classify(&analyzer, "meh"), Sentiment::Neutral);
    assert_eq!(classify(&analyzer, "x is terrible"), Sentiment::Negative);
}

#[test]
fn lexicon_polarity_stays_in_range() {
    let analyzer = LexiconAnalyzer::default();
    for text in [
        "extremely extremely excellent amazing wonderful",
        "very very terrible awful horrible",
        "not not not good",
        "good bad good bad good",
    ] {
        let p = analyzer.polarity(text);
        assert!((-1.0..=1.0).contains(&p), "{text:?} scored {p}");
    }
}

#[test]
fn counts_over_classified_batch() {
    let analyzer = LexiconAnalyzer::default();
    let labels = classify_batch(&analyzer, &["good", "great", "bad", "the"]);
    let counts = SentimentCounts::from_labels(labels);
    assert_eq!(counts.positive, 2);
    assert_eq!(counts.negative, 1);
    assert_eq!(counts.neutral, 1);
    assert_eq!(counts.total(), 4);
}

// ============================================================
// Extra lexicon files
// ============================================================

#[test]
fn extra_lexicon_file_changes_labels() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# crypto slang").unwrap();
    writeln!(file, "hodl\t0.6").unwrap();
    writeln!(file, "rugpull\t-0.9").unwrap();

    let mut analyzer = LexiconAnalyzer::default();
    assert_eq!(classify(&analyzer, "hodl"), Sentiment::Neutral);

    let added = analyzer.extend_from_file(file.path()).unwrap();
    assert_eq!(added, 2);
    assert_eq!(classify(&analyzer, "hodl"), Sentiment::Positive);
    assert_eq!(classify(&analyzer, "total rugpull"), Sentiment::Negative);
}

#[test]
fn missing_lexicon_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut analyzer = LexiconAnalyzer::default();
    let before = analyzer.len();
    assert!(analyzer
        .extend_from_file(&dir.path().join("nope.tsv"))
        .is_err());
    assert_eq!(analyzer.len(), before);
}
