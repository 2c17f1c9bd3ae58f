// Word-cloud preparation — topic-aware stopword removal and word counts.
//
// The topic itself would otherwise dominate every cloud, so its words are
// added to the English stop-word list before filtering.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use stop_words::{get, LANGUAGE};

/// English stop words from the stop-words crate.
static ENGLISH_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    let words: Vec<String> = get(LANGUAGE::English);
    words.into_iter().map(|w| w.to_lowercase()).collect()
});

/// Lower-case the topic, turn non-alphanumerics into spaces and split.
pub fn topic_tokens(topic: &str) -> Vec<String> {
    topic
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// English stop words plus the topic's own tokens.
pub fn stopwords_for(topic: &str) -> HashSet<String> {
    let mut stopwords = ENGLISH_STOPWORDS.clone();
    stopwords.extend(topic_tokens(topic));
    stopwords
}

/// Remove stop words and topic words from `topic_text`, keeping order.
///
/// `topic_text` is normally the concatenated normalized text of the posts
/// (optionally only those with one sentiment label).
pub fn prepare_for_cloud(topic_text: &str, topic: &str) -> String {
    let stopwords = stopwords_for(topic);
    topic_text
        .split_whitespace()
        .filter(|token| !stopwords.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count words in prepared cloud text, most frequent first.
///
/// Ties are ordered alphabetically so the output is stable.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(w, c)| (w.to_string(), c))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(max_words);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_tokens_split_on_punctuation() {
        assert_eq!(topic_tokens("Bitcoin"), vec!["bitcoin"]);
        assert_eq!(topic_tokens("#Rust-Lang 2024!"), vec!["rust", "lang", "2024"]);
        assert!(topic_tokens("  ").is_empty());
    }

    #[test]
    fn stopwords_include_topic_and_english() {
        let set = stopwords_for("Elon Musk");
        assert!(set.contains("elon"));
        assert!(set.contains("musk"));
        assert!(set.contains("the"));
    }

    #[test]
    fn removes_topic_words() {
        let out = prepare_for_cloud("bitcoin price rising bitcoin moon", "Bitcoin");
        assert_eq!(out, "price rising moon");
    }

    #[test]
    fn removes_english_stopwords_and_keeps_order() {
        let out = prepare_for_cloud("the wallet is crashing and the fees are brutal", "x");
        assert_eq!(out, "wallet crashing fees brutal");
    }

    #[test]
    fn empty_text_gives_empty_output() {
        assert_eq!(prepare_for_cloud("", "anything"), "");
    }

    #[test]
    fn frequencies_are_ranked_with_stable_ties() {
        let freqs = word_frequencies("b a c a b a", 10);
        assert_eq!(
            freqs,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn frequencies_respect_max_words() {
        let freqs = word_frequencies("x y z x", 2);
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs[0], ("x".to_string(), 2));
        assert_eq!(freqs[1], ("y".to_string(), 1));
    }
}
