// SqliteGraphStore — rusqlite backend implementing the GraphStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.
//
// The free functions in queries.rs stay sync so tests can run them against
// a Connection directly.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::topics::model::TopicModelResult;

use super::models::{GraphCounts, RunRecord, StoredTopic};
use super::traits::GraphStore;

pub struct SqliteGraphStore {
    conn: Mutex<Connection>,
}

impl SqliteGraphStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl GraphStore for SqliteGraphStore {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn save_model(&self, result: &TopicModelResult) -> Result<()> {
        let mut conn = self.conn.lock().await;
        // One transaction for the whole fit — a half-written graph is worse
        // than no write at all.
        let tx = conn.transaction()?;
        super::queries::save_model(&tx, result)?;
        tx.commit()?;
        Ok(())
    }

    async fn record_run(
        &self,
        name: &str,
        result: &TopicModelResult,
        output_path: Option<&str>,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::record_run(&conn, name, result, output_path)
    }

    async fn get_topics(&self) -> Result<Vec<StoredTopic>> {
        let conn = self.conn.lock().await;
        super::queries::get_topics(&conn)
    }

    async fn topic_keywords(&self, topic_key: &str) -> Result<Vec<(String, f64)>> {
        let conn = self.conn.lock().await;
        super::queries::topic_keywords(&conn, topic_key)
    }

    async fn topic_document_count(&self, topic_key: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::topic_document_count(&conn, topic_key)
    }

    async fn counts(&self) -> Result<GraphCounts> {
        let conn = self.conn.lock().await;
        super::queries::counts(&conn)
    }

    async fn recent_runs(&self, limit: u32) -> Result<Vec<RunRecord>> {
        let conn = self.conn.lock().await;
        super::queries::recent_runs(&conn, limit)
    }

    async fn run_result(&self, name: &str) -> Result<Option<TopicModelResult>> {
        let conn = self.conn.lock().await;
        super::queries::run_result(&conn, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::schema::create_tables;
    use crate::topics::model::{DocumentTopic, Topic, TopicModelResult, WeightedKeyword};

    fn test_store() -> SqliteGraphStore {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteGraphStore::new(conn)
    }

    fn sample_result() -> TopicModelResult {
        let keywords = vec![WeightedKeyword {
            word: "meteo".to_string(),
            strength: 1.0,
        }];
        let topic = Topic {
            id: 0,
            key: crate::topics::model::topic_key(&keywords),
            label: "meteo".to_string(),
            keywords,
            weight: 1.0,
        };
        TopicModelResult {
            assignments: vec![DocumentTopic {
                document: "la meteo annonce de la pluie".to_string(),
                topic_id: 0,
                confidence: 1.0,
            }],
            topics: vec![topic],
            document_count: 1,
        }
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let store = test_store();
        assert_eq!(store.table_count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_trait_save_and_read_back() {
        let store = test_store();
        let result = sample_result();
        store.save_model(&result).await.unwrap();

        let topics = store.get_topics().await.unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].label, "meteo");

        let kws = store.topic_keywords(&topics[0].key).await.unwrap();
        assert_eq!(kws, vec![("meteo".to_string(), 1.0)]);

        assert_eq!(
            store.topic_document_count(&topics[0].key).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_trait_run_bookkeeping() {
        let store = test_store();
        let result = sample_result();
        store
            .record_run("nuit-1", &result, Some("out/nuit-1.csv"))
            .await
            .unwrap();
        store.record_run("nuit-2", &result, None).await.unwrap();

        let runs = store.recent_runs(10).await.unwrap();
        assert_eq!(runs.len(), 2);
        // Newest first
        assert_eq!(runs[0].name, "nuit-2");
        assert_eq!(runs[1].name, "nuit-1");
    }

    #[tokio::test]
    async fn test_trait_counts_empty() {
        let store = test_store();
        let counts = store.counts().await.unwrap();
        assert_eq!(counts.topics, 0);
        assert_eq!(counts.documents, 0);
    }
}
