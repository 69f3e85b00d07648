// Colored terminal output for fitted models and stored graph contents.
//
// This module handles all terminal-specific formatting: colors, bars,
// tables. The main.rs command bodies delegate here.

use colored::Colorize;

use crate::graph::models::{RunRecord, StoredTopic};
use crate::topics::model::TopicModelResult;

/// Display a fitted model as a ranked topic list with weight bars.
///
/// This is what the operator sees right after a `topic` run — it should be
/// scannable enough to judge whether the discovered topics make sense
/// before trusting the CSV or the graph.
pub fn display_result(result: &TopicModelResult) {
    println!(
        "\n{}",
        format!(
            "=== Topics ({} documents modeled) ===",
            result.document_count
        )
        .bold()
    );
    println!();

    let bar_width: usize = 20;

    for topic in &result.topics {
        let filled = (topic.weight * bar_width as f64).round() as usize;
        let empty = bar_width.saturating_sub(filled);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

        let colored_bar = if topic.weight >= 0.25 {
            bar.bright_green()
        } else if topic.weight >= 0.10 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:>3}. {:<40} {} {:.2}",
            topic.id,
            topic.label.bold(),
            colored_bar,
            topic.weight
        );

        let keywords_str = topic
            .keywords
            .iter()
            .map(|kw| kw.word.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("       Keywords: {}", keywords_str.dimmed());
        println!();
    }

    let outliers = result.outlier_count();
    if outliers > 0 {
        println!(
            "  {}",
            format!("{outliers} document(s) matched no topic (id -1)").dimmed()
        );
    }
}

/// Display the topic nodes stored in the graph.
pub fn display_stored_topics(topics: &[StoredTopic]) {
    if topics.is_empty() {
        println!("No topics stored yet. Run `audio-topic-model topic ...` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Knowledge Graph Topics ({}) ===", topics.len()).bold()
    );
    println!();

    for (i, topic) in topics.iter().enumerate() {
        println!(
            "  {:>3}. {:<40} weight {:>5.2}  (updated {})",
            i + 1,
            topic.label.bold(),
            topic.weight.unwrap_or(0.0),
            topic.updated_at.dimmed(),
        );
        println!("       Keywords: {}", topic.keywords.dimmed());
        println!("       Key: {}", topic.key.dimmed());
        println!();
    }
}

/// Display recent runs, newest first.
pub fn display_runs(runs: &[RunRecord]) {
    if runs.is_empty() {
        println!("Runs: none recorded yet");
        return;
    }

    println!("Recent runs:");
    for run in runs {
        let output = run.output_path.as_deref().unwrap_or("-");
        println!(
            "  {} — {} docs, {} topics, {} outliers → {} ({})",
            run.name.bold(),
            run.document_count,
            run.topic_count,
            run.outlier_count,
            output,
            run.created_at.dimmed(),
        );
    }
}
