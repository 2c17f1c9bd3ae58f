// File export of analyzed tweets (CSV or JSON, picked by extension).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::pipeline::analyze::{Analysis, AnalyzedPost};
use crate::sentiment::label::Sentiment;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => anyhow::bail!(
                "Unsupported export file {} (use a .csv or .json extension)",
                path.display()
            ),
        }
    }
}

/// One CSV row. CSV can't represent nested structs, so the post is flattened
/// by hand here.
#[derive(Serialize)]
struct CsvRow<'a> {
    created_at: String,
    author_name: &'a str,
    author_verified: bool,
    text: &'a str,
    like_count: i64,
    repost_count: i64,
    author_location: &'a str,
    normalized_text: &'a str,
    sentiment: Sentiment,
}

impl<'a> From<&'a AnalyzedPost> for CsvRow<'a> {
    fn from(p: &'a AnalyzedPost) -> Self {
        Self {
            created_at: p.post.created_at.to_rfc3339(),
            author_name: &p.post.author_name,
            author_verified: p.post.author_verified,
            text: &p.post.text,
            like_count: p.post.like_count,
            repost_count: p.post.repost_count,
            author_location: p.post.author_location.as_deref().unwrap_or(""),
            normalized_text: &p.normalized_text,
            sentiment: p.sentiment,
        }
    }
}

/// Write the analysis to `path`. Returns the format that was used.
pub fn export(analysis: &Analysis, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            for post in &analysis.posts {
                writer
                    .serialize(CsvRow::from(post))
                    .context("Failed to write CSV row")?;
            }
            writer.flush().context("Failed to flush CSV export")?;
        }
        ExportFormat::Json => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), analysis)
                .context("Failed to write JSON export")?;
        }
    }

    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("out/tweets.csv")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("tweets.JSON")).unwrap(),
            ExportFormat::Json
        );
        assert!(ExportFormat::from_path(&PathBuf::from("tweets.xlsx")).is_err());
        assert!(ExportFormat::from_path(&PathBuf::from("tweets")).is_err());
    }
}
