// Graph queries — MERGE-semantics writes and ranked reads.
//
// Every database interaction goes through this module. Writes follow the
// graph's merge rules: nodes upsert on their natural key (topic digest,
// document content, keyword word) and edges upsert on their endpoint pair,
// so re-running a fit over the same corpus converges instead of duplicating.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::topics::model::{Topic, TopicModelResult, OUTLIER_TOPIC_ID};

use super::models::{GraphCounts, RunRecord, StoredTopic};

// --- Nodes ---

/// Merge a topic node: insert on first sight, refresh label/keywords/weight after.
pub fn merge_topic(conn: &Connection, topic: &Topic) -> Result<()> {
    let keywords_joined = topic
        .keywords
        .iter()
        .map(|kw| kw.word.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    conn.execute(
        "INSERT INTO topics (key, label, keywords, weight, updated_at)
         VALUES (?1, ?2, ?3, ?4, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET
            label = ?2,
            keywords = ?3,
            weight = ?4,
            updated_at = datetime('now')",
        params![topic.key, topic.label, keywords_joined, topic.weight],
    )?;
    Ok(())
}

/// Merge a document node on its content, returning its id.
pub fn merge_document(conn: &Connection, content: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO documents (content) VALUES (?1)
         ON CONFLICT(content) DO NOTHING",
        params![content],
    )?;
    let id: i64 = conn.query_row(
        "SELECT id FROM documents WHERE content = ?1",
        params![content],
        |row| row.get(0),
    )?;
    Ok(id)
}

// --- Edges ---

/// Merge a Document -BELONGS_TO-> Topic edge.
pub fn link_document(
    conn: &Connection,
    document_id: i64,
    topic_key: &str,
    confidence: f64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO belongs_to (document_id, topic_key, confidence)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(document_id, topic_key) DO UPDATE SET confidence = ?3",
        params![document_id, topic_key, confidence],
    )?;
    Ok(())
}

/// Merge a keyword node and its Keyword -REPRESENTS{strength}-> Topic edge.
pub fn merge_keyword_edge(
    conn: &Connection,
    word: &str,
    topic_key: &str,
    strength: f64,
) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO keywords (word) VALUES (?1)",
        params![word],
    )?;
    conn.execute(
        "INSERT INTO represents (word, topic_key, strength)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(word, topic_key) DO UPDATE SET strength = ?3",
        params![word, topic_key, strength],
    )?;
    Ok(())
}

// --- Whole-model writes ---

/// Write a complete fit into the graph: topic nodes with their keyword
/// edges, then document nodes with their BELONGS_TO edges. Outlier
/// documents get a node but no topic edge — their count is recorded on
/// the run row instead.
pub fn save_model(conn: &Connection, result: &TopicModelResult) -> Result<()> {
    for topic in &result.topics {
        merge_topic(conn, topic)?;
        for kw in &topic.keywords {
            merge_keyword_edge(conn, &kw.word, &topic.key, kw.strength)?;
        }
    }

    for assignment in &result.assignments {
        let doc_id = merge_document(conn, &assignment.document)?;
        if assignment.topic_id != OUTLIER_TOPIC_ID {
            if let Some(topic) = result.topic(assignment.topic_id) {
                link_document(conn, doc_id, &topic.key, assignment.confidence)?;
            }
        }
    }

    Ok(())
}

// --- Runs ---

/// Record one `topic` invocation and return its row id.
///
/// The full result is serialized alongside the summary columns so a run's
/// topics can be redisplayed later without refitting.
pub fn record_run(
    conn: &Connection,
    name: &str,
    result: &TopicModelResult,
    output_path: Option<&str>,
) -> Result<i64> {
    let result_json = serde_json::to_string(result)?;
    let created_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO runs (name, document_count, topic_count, outlier_count,
                           output_path, result_json, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            name,
            result.document_count,
            result.topics.len() as u32,
            result.outlier_count() as u32,
            output_path,
            result_json,
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Load the most recent stored result for a run name, if any.
pub fn run_result(conn: &Connection, name: &str) -> Result<Option<TopicModelResult>> {
    let json: Option<Option<String>> = conn
        .query_row(
            "SELECT result_json FROM runs WHERE name = ?1 ORDER BY id DESC LIMIT 1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;

    match json.flatten() {
        Some(json) => {
            let result: TopicModelResult = serde_json::from_str(&json)?;
            Ok(Some(result))
        }
        None => Ok(None),
    }
}

/// Most recent runs, newest first.
pub fn recent_runs(conn: &Connection, limit: u32) -> Result<Vec<RunRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, document_count, topic_count, outlier_count, output_path, created_at
         FROM runs
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(RunRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            document_count: row.get(2)?,
            topic_count: row.get(3)?,
            outlier_count: row.get(4)?,
            output_path: row.get(5)?,
            created_at: row.get(6)?,
        })
    })?;

    let mut runs = Vec::new();
    for row in rows {
        runs.push(row?);
    }
    Ok(runs)
}

// --- Reads ---

/// All topic nodes, heaviest first.
pub fn get_topics(conn: &Connection) -> Result<Vec<StoredTopic>> {
    let mut stmt = conn.prepare(
        "SELECT key, label, keywords, weight, updated_at
         FROM topics
         ORDER BY weight DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(StoredTopic {
            key: row.get(0)?,
            label: row.get(1)?,
            keywords: row.get(2)?,
            weight: row.get(3)?,
            updated_at: row.get(4)?,
        })
    })?;

    let mut topics = Vec::new();
    for row in rows {
        topics.push(row?);
    }
    Ok(topics)
}

/// The REPRESENTS edges of one topic, strongest first.
pub fn topic_keywords(conn: &Connection, topic_key: &str) -> Result<Vec<(String, f64)>> {
    let mut stmt = conn.prepare(
        "SELECT word, strength FROM represents
         WHERE topic_key = ?1
         ORDER BY strength DESC",
    )?;
    let rows = stmt.query_map(params![topic_key], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut keywords = Vec::new();
    for row in rows {
        keywords.push(row?);
    }
    Ok(keywords)
}

/// How many documents belong to a topic.
pub fn topic_document_count(conn: &Connection, topic_key: &str) -> Result<i64> {
    let count: Option<i64> = conn
        .query_row(
            "SELECT COUNT(*) FROM belongs_to WHERE topic_key = ?1",
            params![topic_key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(count.unwrap_or(0))
}

/// Node and edge counts across the whole graph.
pub fn counts(conn: &Connection) -> Result<GraphCounts> {
    let single = |sql: &str| -> Result<i64> {
        let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n)
    };
    Ok(GraphCounts {
        topics: single("SELECT COUNT(*) FROM topics")?,
        documents: single("SELECT COUNT(*) FROM documents")?,
        keywords: single("SELECT COUNT(*) FROM keywords")?,
        belongs_to: single("SELECT COUNT(*) FROM belongs_to")?,
        represents: single("SELECT COUNT(*) FROM represents")?,
    })
}
