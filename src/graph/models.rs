// Data models — Rust structs that map to graph database rows.
//
// These are the types that flow back out of the graph store. They're
// separate from the queries so other modules can use them without
// depending on rusqlite directly.

use serde::{Deserialize, Serialize};

/// A topic node as stored in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTopic {
    /// Digest of the keyword list — the node's natural key
    pub key: String,
    pub label: String,
    /// Comma-joined keyword list, denormalized onto the node for display
    pub keywords: String,
    pub weight: Option<f64>,
    pub updated_at: String,
}

/// One recorded modeling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: i64,
    pub name: String,
    pub document_count: u32,
    pub topic_count: u32,
    pub outlier_count: u32,
    pub output_path: Option<String>,
    pub created_at: String,
}

/// Node and edge counts across the whole graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphCounts {
    pub topics: i64,
    pub documents: i64,
    pub keywords: i64,
    pub belongs_to: i64,
    pub represents: i64,
}
