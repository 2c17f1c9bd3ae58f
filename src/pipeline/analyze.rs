// Topic analysis pipeline.
//
// 1. Collect posts for the topic into a local buffer
// 2. Normalize each post's text
// 3. Classify each normalized text independently
// 4. Aggregate label counts and word-cloud text for display
//
// The post buffer is moved from stage to stage; nothing is shared.

use serde::Serialize;
use tracing::info;

use crate::sentiment::classifier::classify;
use crate::sentiment::label::{Sentiment, SentimentCounts};
use crate::sentiment::traits::PolarityAnalyzer;
use crate::text::cloud::prepare_for_cloud;
use crate::text::normalize::normalize;
use crate::twitter::error::CollectError;
use crate::twitter::search::{collect, Post, SearchSource};

/// A post with its derived fields. The original post is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedPost {
    #[serde(flatten)]
    pub post: Post,
    pub normalized_text: String,
    pub sentiment: Sentiment,
}

/// Label counts split by whether the author is verified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerifiedBreakdown {
    pub verified: SentimentCounts,
    pub unverified: SentimentCounts,
}

/// Everything the display layer needs for one topic.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub topic: String,
    pub posts: Vec<AnalyzedPost>,
}

impl Analysis {
    pub fn new(topic: &str, posts: Vec<AnalyzedPost>) -> Self {
        Self {
            topic: topic.trim().to_string(),
            posts,
        }
    }

    pub fn counts(&self) -> SentimentCounts {
        SentimentCounts::from_labels(self.posts.iter().map(|p| p.sentiment))
    }

    pub fn counts_by_verified(&self) -> VerifiedBreakdown {
        let mut breakdown = VerifiedBreakdown::default();
        for p in &self.posts {
            if p.post.author_verified {
                breakdown.verified.add(p.sentiment);
            } else {
                breakdown.unverified.add(p.sentiment);
            }
        }
        breakdown
    }

    /// Posts with the given label, or all posts for `None`.
    pub fn with_label(&self, label: Option<Sentiment>) -> impl Iterator<Item = &AnalyzedPost> {
        self.posts
            .iter()
            .filter(move |p| label.map_or(true, |l| p.sentiment == l))
    }

    /// Word-cloud-ready text for all posts or only those with `label`.
    pub fn cloud_text(&self, label: Option<Sentiment>) -> String {
        let joined = self
            .with_label(label)
            .map(|p| p.normalized_text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        prepare_for_cloud(&joined, &self.topic)
    }
}

/// Normalize and classify each post, keeping fetch order.
pub fn analyze_posts(analyzer: &dyn PolarityAnalyzer, posts: Vec<Post>) -> Vec<AnalyzedPost> {
    posts
        .into_iter()
        .map(|post| {
            let normalized_text = normalize(&post.text);
            let sentiment = classify(analyzer, &normalized_text);
            AnalyzedPost {
                post,
                normalized_text,
                sentiment,
            }
        })
        .collect()
}

/// Collect up to `max_count` posts for `topic` and analyze them.
pub async fn run(
    source: &dyn SearchSource,
    analyzer: &dyn PolarityAnalyzer,
    topic: &str,
    max_count: usize,
) -> Result<Analysis, CollectError> {
    let posts = collect(source, topic, max_count).await?;
    let analysis = Analysis::new(topic, analyze_posts(analyzer, posts));

    let counts = analysis.counts();
    info!(
        topic = %analysis.topic,
        total = counts.total(),
        positive = counts.positive,
        neutral = counts.neutral,
        negative = counts.negative,
        "Sentiment analysis complete"
    );

    Ok(analysis)
}
