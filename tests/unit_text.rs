// Unit tests for text normalization and word-cloud preparation.
//
// Tests isolated pure functions: normalize's cleaning rules and idempotence,
// and prepare_for_cloud's topic-aware stopword filtering.

use murmur::text::cloud::{prepare_for_cloud, stopwords_for, topic_tokens, word_frequencies};
use murmur::text::normalize::normalize;

// ============================================================
// normalize — cleaning rules
// ============================================================

#[test]
fn mention_is_removed() {
    let out = normalize("hello @alice world");
    assert!(!out.contains('@'));
    assert_eq!(out, "hello world");
}

#[test]
fn repost_marker_and_mention_removed() {
    assert_eq!(normalize("RT @bot: meh"), "meh");
}

#[test]
fn dollar_tickers_keep_the_symbol_name() {
    assert_eq!(normalize("I love $X!!"), "i love x");
}

#[test]
fn urls_are_removed() {
    assert_eq!(normalize("$X is terrible http://x.co"), "x is terrible");
    assert_eq!(normalize("https://t.co/AbC123"), "");
}

#[test]
fn hashtags_become_words() {
    assert_eq!(normalize("#Rust is #great"), "rust is great");
}

#[test]
fn output_alphabet_is_restricted() {
    let out = normalize("Ünïcödé, emoji 🚀, and CAPS; 100% sure!");
    assert!(out
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
    assert!(!out.contains("  "));
    assert_eq!(out.trim(), out);
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        "hello @alice world",
        "RT @bot: meh",
        "I love $X!! http://x.co/path?q=1",
        "RT RT rt Rt rT",
        "   spaced\t\tout\n\nlines   ",
        "@@@ ### $$$",
        "mixed www.example.com/page and text",
        "",
    ];
    for s in samples {
        let once = normalize(s);
        let twice = normalize(&once);
        assert_eq!(twice, once, "normalize not idempotent for {s:?}");
    }
}

// ============================================================
// prepare_for_cloud — topic filtering
// ============================================================

#[test]
fn topic_word_never_survives() {
    let out = prepare_for_cloud("bitcoin to the moon bitcoin forever", "Bitcoin");
    assert!(!out.split_whitespace().any(|w| w == "bitcoin"));
    assert!(out.contains("moon"));
}

#[test]
fn multi_word_topic_filters_every_word() {
    let out = prepare_for_cloud("elon musk buys twitter musk again", "Elon Musk!");
    assert!(!out.split_whitespace().any(|w| w == "elon" || w == "musk"));
    assert!(out.contains("twitter"));
}

#[test]
fn cloud_output_preserves_order() {
    let out = prepare_for_cloud("zebra apple mango", "fruit");
    assert_eq!(out, "zebra apple mango");
}

#[test]
fn topic_tokens_are_lowercase_alphanumeric() {
    assert_eq!(topic_tokens("$TSLA & Co."), vec!["tsla", "co"]);
}

#[test]
fn stopword_set_contains_common_words() {
    let set = stopwords_for("anything");
    for w in ["the", "and", "is", "anything"] {
        assert!(set.contains(w), "missing stopword {w}");
    }
}

#[test]
fn frequencies_from_prepared_text() {
    let prepared = prepare_for_cloud("moon moon lambo the moon lambo rocket", "btc");
    let freqs = word_frequencies(&prepared, 2);
    assert_eq!(freqs[0], ("moon".to_string(), 3));
    assert_eq!(freqs[1], ("lambo".to_string(), 2));
}
