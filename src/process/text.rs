//! Text file summarization.
//!
//! Line, word, and character counts plus the most frequent words of a plain
//! text file.

use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary statistics of a text file.
#[derive(Debug)]
pub struct TextStats {
    pub lines: usize,
    pub words: usize,
    pub chars: usize,

    /// Most frequent words, highest count first; ties broken alphabetically.
    pub top_words: Vec<(String, usize)>,
}

fn normalize(word: &str) -> Option<String> {
    let cleaned: String = word
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'')
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_lowercase())
    }
}

/// Compute statistics for a text file, keeping the `top` most frequent words.
pub fn analyze(input: &Path, top: usize) -> Result<TextStats> {
    let contents = fs::read_to_string(input)?;

    let lines = contents.lines().count();
    let chars = contents.chars().count();

    let mut frequencies: HashMap<String, usize> = HashMap::new();
    let mut words = 0usize;
    for raw in contents.split_whitespace() {
        words += 1;
        if let Some(word) = normalize(raw) {
            *frequencies.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = frequencies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top);

    Ok(TextStats {
        lines,
        words,
        chars,
        top_words: ranked,
    })
}

/// Write the statistics as a plain-text report.
pub fn write_report(input: &Path, stats: &TextStats, output: &Path) -> Result<PathBuf> {
    let mut report = String::new();
    report.push_str("Text Summary\n");
    report.push_str(&format!("{}\n", "-".repeat(40)));
    report.push_str(&format!("Input file: {}\n", input.display()));
    report.push_str(&format!("Lines: {}\n", stats.lines));
    report.push_str(&format!("Words: {}\n", stats.words));
    report.push_str(&format!("Characters: {}\n\n", stats.chars));
    report.push_str("Most frequent words:\n");
    for (word, count) in &stats.top_words {
        report.push_str(&format!("  {word}: {count}\n"));
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, report)?;
    Ok(output.to_path_buf())
}

/// Read, analyze, and report in one pass.
pub fn run(input: &Path, output: &Path, top: usize) -> Result<()> {
    let stats = analyze(input, top)?;
    write_report(input, &stats, output)?;
    info!(
        "Processed text file: {}, results saved to: {}",
        input.display(),
        output.display()
    );
    Ok(())
}
