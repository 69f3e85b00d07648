// System status display — shows DB stats, graph size, last run.

use anyhow::Result;
use std::sync::Arc;

use crate::graph::GraphStore;
use crate::report::terminal;

/// Display system status to the terminal.
///
/// The caller (main.rs) handles the not-yet-initialized case before opening
/// the store, so by the time we get here the database file exists.
pub async fn show(store: &Arc<dyn GraphStore>, db_display_path: &str) -> Result<()> {
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let counts = store.counts().await?;
    println!(
        "Graph: {} topics, {} documents, {} keywords",
        counts.topics, counts.documents, counts.keywords
    );
    println!(
        "Edges: {} BELONGS_TO, {} REPRESENTS",
        counts.belongs_to, counts.represents
    );

    let runs = store.recent_runs(5).await?;
    if runs.is_empty() {
        println!("Runs: none recorded yet");
        println!("  Run `audio-topic-model topic --input ... --output ... --name ...`");
    } else {
        terminal::display_runs(&runs);
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_show_reports_empty_graph() {
        let dir = std::env::temp_dir().join(format!("atm-status-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let db_path = dir.join("graph.db");
        let store = crate::graph::initialize(db_path.to_str().unwrap()).unwrap();

        show(&store, db_path.to_str().unwrap()).await.unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
