// Lexicon-based polarity scoring.
//
// Each word found in the lexicon contributes its polarity, scaled by a
// preceding intensifier and flipped (at half strength) when a negator
// appears in the preceding few words. The text's polarity is the mean of
// those contributions, clamped to [-1, 1]. Text without lexicon words
// scores exactly 0.0.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::debug;

use super::traits::PolarityAnalyzer;

/// How many words back a negator still applies.
const NEGATION_WINDOW: usize = 3;

/// Negated words keep half their strength with the opposite sign.
const NEGATION_FACTOR: f64 = -0.5;

static BASE_LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // Positive
        ("good", 0.7),
        ("great", 0.8),
        ("excellent", 1.0),
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("wonderful", 1.0),
        ("fantastic", 0.4),
        ("brilliant", 0.9),
        ("outstanding", 0.5),
        ("perfect", 1.0),
        ("best", 1.0),
        ("better", 0.5),
        ("nice", 0.6),
        ("love", 0.5),
        ("loved", 0.7),
        ("loving", 0.6),
        ("lovely", 0.5),
        ("like", 0.2),
        ("liked", 0.3),
        ("enjoy", 0.4),
        ("enjoyed", 0.5),
        ("happy", 0.8),
        ("glad", 0.5),
        ("excited", 0.4),
        ("exciting", 0.3),
        ("beautiful", 0.85),
        ("cool", 0.35),
        ("fun", 0.3),
        ("win", 0.8),
        ("winning", 0.5),
        ("success", 0.3),
        ("successful", 0.75),
        ("strong", 0.43),
        ("bullish", 0.5),
        ("gain", 0.3),
        ("gains", 0.3),
        ("profit", 0.3),
        ("safe", 0.5),
        ("easy", 0.43),
        ("fast", 0.2),
        ("free", 0.4),
        ("fair", 0.7),
        ("helpful", 0.5),
        ("impressive", 1.0),
        ("incredible", 0.9),
        ("recommend", 0.4),
        ("thanks", 0.2),
        ("thank", 0.2),
        ("congrats", 0.6),
        ("congratulations", 0.6),
        ("proud", 0.8),
        ("hope", 0.2),
        ("hopeful", 0.4),
        ("positive", 0.23),
        ("favorite", 0.5),
        ("favourite", 0.5),
        ("welcome", 0.8),
        ("super", 0.33),
        ("fine", 0.42),
        ("interesting", 0.5),
        ("smart", 0.21),
        ("wow", 0.1),
        // Negative
        ("bad", -0.7),
        ("worse", -0.4),
        ("worst", -1.0),
        ("terrible", -1.0),
        ("horrible", -1.0),
        ("awful", -1.0),
        ("poor", -0.4),
        ("hate", -0.8),
        ("hated", -0.9),
        ("hates", -0.8),
        ("sad", -0.5),
        ("angry", -0.5),
        ("upset", -0.4),
        ("annoying", -0.8),
        ("boring", -1.0),
        ("disappointed", -0.75),
        ("disappointing", -0.6),
        ("fail", -0.5),
        ("failed", -0.5),
        ("failure", -0.3),
        ("wrong", -0.5),
        ("broken", -0.4),
        ("crash", -0.4),
        ("crashing", -0.4),
        ("scam", -0.6),
        ("fraud", -0.6),
        ("fake", -0.5),
        ("stupid", -0.8),
        ("dumb", -0.4),
        ("ugly", -0.7),
        ("disaster", -0.8),
        ("problem", -0.3),
        ("problems", -0.3),
        ("risk", -0.2),
        ("loss", -0.3),
        ("losses", -0.3),
        ("lose", -0.3),
        ("lost", -0.2),
        ("bearish", -0.5),
        ("dead", -0.2),
        ("dangerous", -0.6),
        ("slow", -0.3),
        ("expensive", -0.5),
        ("sick", -0.71),
        ("pain", -0.5),
        ("painful", -0.7),
        ("worried", -0.5),
        ("fear", -0.4),
        ("scary", -0.5),
        ("negative", -0.3),
        ("useless", -0.5),
        ("waste", -0.2),
        ("ridiculous", -0.33),
        ("disgusting", -1.0),
        ("pathetic", -1.0),
    ]
    .into_iter()
    .collect()
});

/// Multipliers applied to the next lexicon word.
static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("really", 1.3),
        ("so", 1.2),
        ("too", 1.2),
        ("extremely", 1.5),
        ("incredibly", 1.5),
        ("absolutely", 1.4),
        ("totally", 1.3),
        ("truly", 1.2),
        ("highly", 1.3),
        ("most", 1.3),
        ("pretty", 1.1),
        ("quite", 1.1),
        ("slightly", 0.6),
        ("somewhat", 0.7),
        ("barely", 0.5),
    ]
    .into_iter()
    .collect()
});

/// Words that flip the polarity of a following lexicon word. Contractions
/// appear split ("don t") after normalization, so the stems are listed too.
static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "nothing", "nobody", "none", "neither", "nor", "cannot", "cant",
        "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "wont", "wouldnt",
        "shouldnt", "couldnt", "aint", "don", "doesn", "didn", "isn", "wasn", "aren", "weren",
        "wouldn", "shouldn", "couldn", "ain", "hardly",
    ]
    .into_iter()
    .collect()
});

/// Built-in English polarity lexicon, optionally extended from a file.
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    entries: HashMap<String, f64>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self {
            entries: BASE_LEXICON
                .iter()
                .map(|(w, p)| (w.to_string(), *p))
                .collect(),
        }
    }
}

impl LexiconAnalyzer {
    /// Number of scored words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add or replace a word's polarity (clamped to [-1, 1]).
    pub fn insert(&mut self, word: &str, polarity: f64) {
        self.entries
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
    }

    /// Merge entries from a `word<TAB>polarity` file. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let added = self
            .extend_from_tsv(&content)
            .with_context(|| format!("Invalid lexicon file {}", path.display()))?;
        debug!(added = added, path = %path.display(), "Loaded lexicon entries");
        Ok(added)
    }

    /// Merge entries from TSV content. Fails on the first malformed line and
    /// leaves the lexicon unchanged in that case.
    pub fn extend_from_tsv(&mut self, content: &str) -> Result<usize> {
        let mut parsed = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, score) = line
                .split_once('\t')
                .with_context(|| format!("line {}: expected word<TAB>polarity", i + 1))?;
            let polarity: f64 = score
                .trim()
                .parse()
                .with_context(|| format!("line {}: polarity is not a number", i + 1))?;
            if !(-1.0..=1.0).contains(&polarity) {
                anyhow::bail!("line {}: polarity {polarity} outside [-1, 1]", i + 1);
            }
            parsed.push((word.trim().to_string(), polarity));
        }

        let added = parsed.len();
        for (word, polarity) in parsed {
            self.insert(&word, polarity);
        }
        Ok(added)
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let words: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        let mut contributions: Vec<f64> = Vec::new();

        for (i, word) in words.iter().enumerate() {
            let Some(&base) = self.entries.get(word.as_str()) else {
                continue;
            };

            let intensity = i
                .checked_sub(1)
                .and_then(|prev| INTENSIFIERS.get(words[prev].as_str()))
                .copied()
                .unwrap_or(1.0);

            let negated = words[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|w| NEGATORS.contains(w.as_str()));

            let mut score = base * intensity;
            if negated {
                score *= NEGATION_FACTOR;
            }
            contributions.push(score);
        }

        if contributions.is_empty() {
            return 0.0;
        }

        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
