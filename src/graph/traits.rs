// Graph store trait — backend-agnostic async interface for all graph writes
// and reads.
//
// All methods are async so a sync backend (rusqlite via Mutex) and any
// future native-async backend fit behind a single interface. The trait
// mirrors the queries.rs function signatures, so callers hold an
// `Arc<dyn GraphStore>` and never touch rusqlite directly.

use anyhow::Result;
use async_trait::async_trait;

use crate::topics::model::TopicModelResult;

use super::models::{GraphCounts, RunRecord, StoredTopic};

#[async_trait]
pub trait GraphStore: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Writes ---

    /// Merge a complete fit into the graph (topics, keywords, documents,
    /// and all edges) atomically.
    async fn save_model(&self, result: &TopicModelResult) -> Result<()>;

    /// Record one `topic` invocation and return its row id.
    async fn record_run(
        &self,
        name: &str,
        result: &TopicModelResult,
        output_path: Option<&str>,
    ) -> Result<i64>;

    // --- Reads ---

    /// All topic nodes, heaviest first.
    async fn get_topics(&self) -> Result<Vec<StoredTopic>>;

    /// A topic's REPRESENTS edges, strongest first.
    async fn topic_keywords(&self, topic_key: &str) -> Result<Vec<(String, f64)>>;

    /// How many documents belong to a topic.
    async fn topic_document_count(&self, topic_key: &str) -> Result<i64>;

    /// Node and edge counts across the whole graph.
    async fn counts(&self) -> Result<GraphCounts>;

    /// Most recent runs, newest first.
    async fn recent_runs(&self, limit: u32) -> Result<Vec<RunRecord>>;

    /// The most recent stored result for a run name, if any.
    async fn run_result(&self, name: &str) -> Result<Option<TopicModelResult>>;
}
