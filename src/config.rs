use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// CLI flags override everything here. The .env file is loaded
/// automatically at startup via dotenvy.
pub struct Config {
    /// Path to the SQLite knowledge graph database
    pub db_path: String,
    /// Stopword language for the topic model (default: french — the
    /// corpora this tool was built for are French radio transcripts)
    pub language: String,
    /// Optional extra stopword file, one word per line
    pub stopwords_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default — the tool should run out of the box
    /// with just `audio-topic-model topic --input ... --output ... --name ...`.
    pub fn load() -> Result<Self> {
        Ok(Self {
            db_path: env::var("ATM_DB_PATH").unwrap_or_else(|_| "./audio-topic-model.db".to_string()),
            language: env::var("ATM_LANGUAGE").unwrap_or_else(|_| "french".to_string()),
            stopwords_file: env::var("ATM_STOPWORDS_FILE").ok().map(PathBuf::from),
        })
    }

    /// Check that the configured stopword file exists, if one is set.
    /// Call this before model fitting so the failure happens up front.
    pub fn require_stopwords_file(&self) -> Result<()> {
        if let Some(ref path) = self.stopwords_file {
            if !path.exists() {
                anyhow::bail!(
                    "Stopword file not found: {}\n\
                     Fix ATM_STOPWORDS_FILE (or --stopwords) or remove it to use\n\
                     the built-in {} list only.",
                    path.display(),
                    self.language
                );
            }
        }
        Ok(())
    }
}
