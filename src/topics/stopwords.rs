// Stopword assembly — built-in language lists plus an optional user file.
//
// The built-in lists come from the stop-words crate. A user-supplied file
// (one word per line) is appended on top, which is how domain noise like
// station jingles and filler words gets filtered out of transcripts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stop_words::{get, LANGUAGE};

/// Resolve a language name to its built-in stopword list.
///
/// Accepts full names and two-letter codes. Unknown languages are an error
/// listing what's supported rather than silently running without stopwords.
pub fn for_language(language: &str) -> Result<Vec<String>> {
    let lang = match language.to_lowercase().as_str() {
        "french" | "fr" => LANGUAGE::French,
        "english" | "en" => LANGUAGE::English,
        "german" | "de" => LANGUAGE::German,
        "spanish" | "es" => LANGUAGE::Spanish,
        "italian" | "it" => LANGUAGE::Italian,
        "arabic" | "ar" => LANGUAGE::Arabic,
        other => anyhow::bail!(
            "Unsupported stopword language: {other}\n\
             Supported: french, english, german, spanish, italian, arabic"
        ),
    };
    Ok(get(lang))
}

/// Load extra stopwords from a user file, one word per line.
/// Blank lines and surrounding whitespace are ignored.
pub fn load_custom(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stopword file {}", path.display()))?;
    Ok(text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Build the full stopword list: language defaults plus the optional file.
pub fn assemble(language: &str, custom_file: Option<&Path>) -> Result<Vec<String>> {
    let mut words = for_language(language)?;
    if let Some(path) = custom_file {
        let custom = load_custom(path)?;
        tracing::info!(
            count = custom.len(),
            path = %path.display(),
            "Loaded custom stopwords"
        );
        words.extend(custom);
    }
    Ok(words)
}
