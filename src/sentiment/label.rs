use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All labels, in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Strict sign thresholding: any positive score is Positive, exactly zero
    /// is Neutral, any negative score is Negative. NaN is treated as Neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => Ok(Sentiment::Positive),
            "neutral" | "neu" => Ok(Sentiment::Neutral),
            "negative" | "neg" => Ok(Sentiment::Negative),
            other => Err(format!(
                "unknown sentiment '{other}' (expected positive, neutral or negative)"
            )),
        }
    }
}

/// Tally of labels across a set of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Sentiment>,
    {
        let mut counts = Self::default();
        for label in labels {
            counts.add(label);
        }
        counts
    }

    pub fn add(&mut self, label: Sentiment) {
        match label {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, label: Sentiment) -> usize {
        match label {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Share of each label in percent, in `Sentiment::ALL` order.
    /// All zeros when there are no posts.
    pub fn percentages(&self) -> [(Sentiment, f64); 3] {
        let total = self.total();
        Sentiment::ALL.map(|label| {
            let pct = if total == 0 {
                0.0
            } else {
                self.get(label) as f64 * 100.0 / total as f64
            };
            (label, pct)
        })
    }
}
