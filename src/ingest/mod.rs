// Corpus ingestion — turns a directory of transcript files into documents.
//
// Audio decoding and speech-to-text happen upstream; this tool consumes the
// transcript text those stages produce. Each usable line of each file becomes
// one document for the topic model, so that one long recording contributes
// many short documents rather than a single giant one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// The loaded corpus: one string per document, in deterministic order.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub documents: Vec<String>,
    pub files_read: usize,
}

/// Load every transcript file directly under `input` and split it into
/// line-level documents.
///
/// Files are visited in sorted path order so repeat runs over the same
/// directory produce the same corpus. Subdirectories are skipped with a
/// warning — nested layouts should be flattened before ingestion.
pub fn load_corpus(input: &Path) -> Result<Corpus> {
    if !input.is_dir() {
        anyhow::bail!(
            "Input path is not a directory: {}\n\
             Point --input at a directory of transcript text files.",
            input.display()
        );
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(input)
        .with_context(|| format!("Failed to read input directory {}", input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();

    let mut documents = Vec::new();
    let mut files_read = 0;

    for path in paths {
        if path.is_dir() {
            warn!(path = %path.display(), "Skipping subdirectory");
            continue;
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?;

        let before = documents.len();
        for line in text.lines() {
            if usable_line(line) {
                documents.push(line.trim().to_string());
            }
        }
        info!(
            path = %path.display(),
            documents = documents.len() - before,
            "Ingested transcript"
        );
        files_read += 1;
    }

    if documents.is_empty() {
        anyhow::bail!(
            "No usable documents found in {} ({} files read).\n\
             Transcript files must contain at least one line of text.",
            input.display(),
            files_read
        );
    }

    Ok(Corpus {
        documents,
        files_read,
    })
}

/// A line is usable if it carries any alphanumeric content after trimming.
/// Blank lines, timestamps-only separators, and punctuation noise are dropped.
fn usable_line(line: &str) -> bool {
    line.trim().chars().any(|c| c.is_alphanumeric())
}
