// Sentiment classification — trait-based polarity scoring.
//
// PolarityAnalyzer is the seam: LexiconAnalyzer is the built-in scorer, and
// tests plug in deterministic stubs. Labels are derived from the sign of the
// polarity alone.

pub mod classifier;
pub mod label;
pub mod lexicon;
pub mod traits;
