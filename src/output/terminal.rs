// Colored terminal output for sentiment summaries and word clouds.
//
// This module handles all terminal-specific formatting: colors, tables,
// bar charts. The main.rs commands delegate here.

use colored::Colorize;

use crate::pipeline::analyze::{Analysis, AnalyzedPost};
use crate::sentiment::label::{Sentiment, SentimentCounts};

/// Width of the percentage bars, in characters.
const BAR_WIDTH: usize = 40;

/// Display the headline counts for a topic.
pub fn display_summary(analysis: &Analysis) {
    let counts = analysis.counts();

    println!(
        "\n{}",
        format!(
            "=== Sentiment for '{}' ({} tweets) ===",
            analysis.topic,
            counts.total()
        )
        .bold()
    );
    println!();

    if counts.total() == 0 {
        println!("  No tweets found for this topic.");
        return;
    }

    for label in Sentiment::ALL {
        println!(
            "  {:<10} {:>5}",
            colorize_sentiment(label),
            counts.get(label)
        );
    }
}

/// Display each label's share as a horizontal bar.
pub fn display_breakdown(counts: &SentimentCounts) {
    if counts.total() == 0 {
        return;
    }

    println!("\n{}", "=== Sentiment Breakdown ===".bold());
    println!();

    for (label, pct) in counts.percentages() {
        println!(
            "  {:<10} {} {:>6.2}%",
            colorize_sentiment(label),
            bar(label, pct),
            pct
        );
    }
}

/// Display counts for verified and unverified authors side by side.
pub fn display_verified_breakdown(analysis: &Analysis) {
    let breakdown = analysis.counts_by_verified();
    if analysis.posts.is_empty() {
        return;
    }

    println!("\n{}", "=== Verified vs Unverified Authors ===".bold());
    println!();
    println!(
        "  {:<10} {:>9} {:>11}",
        "".dimmed(),
        "Verified".dimmed(),
        "Unverified".dimmed()
    );
    println!("  {}", "-".repeat(32).dimmed());

    for label in Sentiment::ALL {
        println!(
            "  {:<10} {:>9} {:>11}",
            colorize_sentiment(label),
            breakdown.verified.get(label),
            breakdown.unverified.get(label),
        );
    }
}

/// Display the first `limit` extracted tweets.
pub fn display_posts(posts: &[AnalyzedPost], limit: usize) {
    if posts.is_empty() || limit == 0 {
        return;
    }

    let shown = posts.len().min(limit);
    println!(
        "\n{}",
        format!("=== Extracted Tweets ({} of {}) ===", shown, posts.len()).bold()
    );
    println!();

    for (i, analyzed) in posts.iter().take(limit).enumerate() {
        let post = &analyzed.post;
        let verified = if post.author_verified { " ✓" } else { "" };
        let location = post
            .author_location
            .as_deref()
            .map(|l| format!(" ({})", super::truncate_chars(l, 24)))
            .unwrap_or_default();

        println!(
            "  {:>3}. {:<10} {}{}{}  {}",
            i + 1,
            colorize_sentiment(analyzed.sentiment),
            post.author_name.bold(),
            verified.cyan(),
            location.dimmed(),
            post.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        );
        println!(
            "       {}",
            super::truncate_chars(&super::single_line(&post.text), 120)
        );
        println!(
            "       {}",
            format!("likes {}  reposts {}", post.like_count, post.repost_count).dimmed()
        );
    }
}

/// Display word frequencies as a text "cloud": most frequent words first,
/// each with a bar scaled to the top word.
pub fn display_word_cloud(title: &str, frequencies: &[(String, usize)]) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!();

    let Some((_, top)) = frequencies.first() else {
        println!("  Not enough words left after removing stopwords.");
        return;
    };

    let word_width = frequencies
        .iter()
        .map(|(w, _)| w.chars().count())
        .max()
        .unwrap_or(0);

    for (word, count) in frequencies {
        let len = (count * BAR_WIDTH / top).max(1);
        println!(
            "  {:<width$} {} {}",
            word,
            "█".repeat(len).cyan(),
            count.to_string().dimmed(),
            width = word_width
        );
    }
}

/// Display one text's classification.
pub fn display_classification(raw: &str, normalized: &str, polarity: f64, label: Sentiment) {
    println!("  Text:       {}", super::truncate_chars(&super::single_line(raw), 120));
    println!("  Normalized: {}", normalized.dimmed());
    println!("  Polarity:   {:+.3}", polarity);
    println!("  Sentiment:  {}", colorize_sentiment(label));
}

fn bar(label: Sentiment, pct: f64) -> colored::ColoredString {
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let text = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH.saturating_sub(filled))
    );
    match label {
        Sentiment::Positive => text.green(),
        Sentiment::Neutral => text.normal(),
        Sentiment::Negative => text.red(),
    }
}

/// Colorize a sentiment label.
fn colorize_sentiment(label: Sentiment) -> colored::ColoredString {
    match label {
        Sentiment::Positive => label.as_str().green(),
        Sentiment::Neutral => label.as_str().normal(),
        Sentiment::Negative => label.as_str().red(),
    }
}
