// Polarity analyzer trait — the swap-ready abstraction.

/// Scores text for sentiment polarity.
pub trait PolarityAnalyzer: Send + Sync {
    /// Polarity in [-1.0, 1.0]; 0.0 for text with no sentiment signal,
    /// including the empty string.
    fn polarity(&self, text: &str) -> f64;
}

/// Fixed-polarity analyzer. Handy when wiring the pipeline without a lexicon.
pub struct ConstantAnalyzer(pub f64);

impl PolarityAnalyzer for ConstantAnalyzer {
    fn polarity(&self, _text: &str) -> f64 {
        self.0
    }
}
