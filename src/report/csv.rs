// CSV output — the per-document results file written after each fit.
//
// One row per document: the text, its topic id, the topic's stable key and
// label, and the assignment confidence. Outlier rows carry the id -1, an
// empty key, and the label "outliers". Fields are quoted RFC-4180 style.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::topics::model::{TopicModelResult, OUTLIER_TOPIC_ID};

const HEADER: &str = "document,topic,topic_key,label,confidence";

/// Write the document-info CSV to `<output_dir>/<name>.csv` and return
/// the path written.
pub fn write_document_info(
    result: &TopicModelResult,
    output_dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let path = output_dir.join(format!("{name}.csv"));
    fs::write(&path, to_csv(result))
        .with_context(|| format!("Failed to write results CSV {}", path.display()))?;

    Ok(path)
}

/// Render the whole result as CSV text.
pub fn to_csv(result: &TopicModelResult) -> String {
    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');

    for assignment in &result.assignments {
        let (key, label) = if assignment.topic_id == OUTLIER_TOPIC_ID {
            ("", "outliers")
        } else {
            match result.topic(assignment.topic_id) {
                Some(topic) => (topic.key.as_str(), topic.label.as_str()),
                None => ("", "outliers"),
            }
        };

        output.push_str(&format!(
            "{},{},{},{},{:.4}\n",
            escape_field(&assignment.document),
            assignment.topic_id,
            key,
            escape_field(label),
            assignment.confidence,
        ));
    }

    output
}

/// Escape a CSV field (handle commas, quotes, newlines).
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
