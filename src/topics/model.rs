// Topic model result types — what a fitted model produces.
//
// A fit yields a ranked list of topics (each a weighted keyword set) plus one
// assignment per input document. Documents that match no topic carry the
// outlier id -1, mirroring the convention of the upstream modeling ecosystem
// this tool's results get compared against.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Topic id given to documents that match no fitted topic.
pub const OUTLIER_TOPIC_ID: i64 = -1;

/// A single keyword inside a topic, with its strength relative to the
/// topic's other keywords (strengths within a topic sum to 1.0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedKeyword {
    pub word: String,
    pub strength: f64,
}

/// One discovered topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Rank of this topic in the fit (0 = heaviest)
    pub id: i64,
    /// Stable digest of the keyword list — the natural key in the graph
    pub key: String,
    /// Human-readable label built from the top keywords
    pub label: String,
    /// Keywords in descending strength order
    pub keywords: Vec<WeightedKeyword>,
    /// Normalized share of the corpus (topic weights sum to 1.0)
    pub weight: f64,
}

/// A document's topic assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTopic {
    pub document: String,
    /// Fitted topic id, or OUTLIER_TOPIC_ID when nothing matched
    pub topic_id: i64,
    /// Confidence in [0, 1]; 0.0 for outliers
    pub confidence: f64,
}

/// The complete output of one model fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicModelResult {
    /// Topics ranked by weight descending
    pub topics: Vec<Topic>,
    /// One entry per input document, in corpus order
    pub assignments: Vec<DocumentTopic>,
    pub document_count: u32,
}

impl TopicModelResult {
    /// Look up a fitted topic by id. Returns None for the outlier id.
    pub fn topic(&self, id: i64) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// How many documents ended up in the outlier bucket.
    pub fn outlier_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.topic_id == OUTLIER_TOPIC_ID)
            .count()
    }
}

/// Derive the stable key for a topic from its keyword list.
///
/// The key is the SHA-256 digest of the keywords joined with '_', so the same
/// keyword set always maps to the same graph node across runs.
pub fn topic_key(keywords: &[WeightedKeyword]) -> String {
    let joined = keywords
        .iter()
        .map(|kw| kw.word.as_str())
        .collect::<Vec<_>>()
        .join("_");
    let digest = Sha256::digest(joined.as_bytes());
    hex::encode(digest)
}

/// Build a human-readable label from a topic's top keywords.
pub fn topic_label(keywords: &[WeightedKeyword]) -> String {
    keywords
        .iter()
        .take(3)
        .map(|kw| kw.word.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}
