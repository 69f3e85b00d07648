// Database schema — table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version` table
// tracks which migrations have run, and each migration is a function that
// executes SQL statements.
//
// The graph is stored relationally: one table per node label (topics,
// documents, keywords) and one per relationship (belongs_to, represents),
// all keyed on the nodes' natural keys so repeat runs merge instead of
// duplicating.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Topic nodes, keyed on the digest of their keyword list so the
        -- same keyword set always merges into the same node
        CREATE TABLE IF NOT EXISTS topics (
            key TEXT PRIMARY KEY,
            label TEXT NOT NULL,
            keywords TEXT NOT NULL,            -- comma-joined, for display
            weight REAL,                       -- corpus share at last fit
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Document nodes, merged on content
        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL UNIQUE
        );

        -- Keyword nodes
        CREATE TABLE IF NOT EXISTS keywords (
            word TEXT PRIMARY KEY
        );

        -- Document -BELONGS_TO-> Topic
        CREATE TABLE IF NOT EXISTS belongs_to (
            document_id INTEGER NOT NULL REFERENCES documents(id),
            topic_key TEXT NOT NULL REFERENCES topics(key),
            confidence REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (document_id, topic_key)
        );

        -- Keyword -REPRESENTS{strength}-> Topic
        CREATE TABLE IF NOT EXISTS represents (
            word TEXT NOT NULL REFERENCES keywords(word),
            topic_key TEXT NOT NULL REFERENCES topics(key),
            strength REAL NOT NULL,
            PRIMARY KEY (word, topic_key)
        );

        -- One row per `topic` invocation. The full fit is kept as JSON so
        -- the result structure can evolve without migrations.
        CREATE TABLE IF NOT EXISTS runs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            document_count INTEGER NOT NULL,
            topic_count INTEGER NOT NULL,
            output_path TEXT,
            result_json TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for walking a topic's documents
        CREATE INDEX IF NOT EXISTS idx_belongs_to_topic
            ON belongs_to(topic_key);

        -- Index for walking a topic's keywords
        CREATE INDEX IF NOT EXISTS idx_represents_topic
            ON represents(topic_key);

        -- Index for finding runs by name
        CREATE INDEX IF NOT EXISTS idx_runs_name
            ON runs(name);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: add outlier_count to runs. Tracks how many documents
    // fell into the -1 bucket so `status` can surface corpora the model
    // handled poorly.
    run_migration(conn, 2, |c| {
        c.execute_batch("ALTER TABLE runs ADD COLUMN outlier_count INTEGER NOT NULL DEFAULT 0;")
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
/// The migration function receives the connection and should execute its SQL.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
