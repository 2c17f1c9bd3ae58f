use super::label::Sentiment;
use super::traits::PolarityAnalyzer;

/// Label one text by the sign of its polarity.
pub fn classify(analyzer: &dyn PolarityAnalyzer, text: &str) -> Sentiment {
    Sentiment::from_polarity(analyzer.polarity(text))
}

/// Label each text independently. Same length and order as the input.
pub fn classify_batch<S: AsRef<str>>(analyzer: &dyn PolarityAnalyzer, texts: &[S]) -> Vec<Sentiment> {
    texts
        .iter()
        .map(|text| classify(analyzer, text.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::traits::ConstantAnalyzer;

    #[test]
    fn constant_analyzer_labels() {
        assert_eq!(classify(&ConstantAnalyzer(0.3), "x"), Sentiment::Positive);
        assert_eq!(classify(&ConstantAnalyzer(0.0), "x"), Sentiment::Neutral);
        assert_eq!(classify(&ConstantAnalyzer(-0.3), "x"), Sentiment::Negative);
    }

    #[test]
    fn batch_preserves_length() {
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let labels = classify_batch(&ConstantAnalyzer(-1.0), &texts);
        assert_eq!(labels, vec![Sentiment::Negative; 3]);

        let empty: [&str; 0] = [];
        assert!(classify_batch(&ConstantAnalyzer(1.0), &empty).is_empty());
    }
}
