// Graph store integration tests — trait round-trips on in-memory SQLite.

use std::sync::Arc;

use rusqlite::Connection;

use audio_topic_model::graph::schema::create_tables;
use audio_topic_model::graph::sqlite::SqliteGraphStore;
use audio_topic_model::graph::GraphStore;
use audio_topic_model::topics::model::{
    topic_key, DocumentTopic, Topic, TopicModelResult, WeightedKeyword, OUTLIER_TOPIC_ID,
};

fn store() -> Arc<dyn GraphStore> {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    Arc::new(SqliteGraphStore::new(conn))
}

fn two_topic_result() -> TopicModelResult {
    let kws_a = vec![
        WeightedKeyword {
            word: "greve".to_string(),
            strength: 0.7,
        },
        WeightedKeyword {
            word: "syndicat".to_string(),
            strength: 0.3,
        },
    ];
    let kws_b = vec![WeightedKeyword {
        word: "festival".to_string(),
        strength: 1.0,
    }];
    let topic_a = Topic {
        id: 0,
        key: topic_key(&kws_a),
        label: "greve / syndicat".to_string(),
        keywords: kws_a,
        weight: 0.65,
    };
    let topic_b = Topic {
        id: 1,
        key: topic_key(&kws_b),
        label: "festival".to_string(),
        keywords: kws_b,
        weight: 0.35,
    };
    TopicModelResult {
        assignments: vec![
            DocumentTopic {
                document: "la greve continue selon le syndicat".to_string(),
                topic_id: 0,
                confidence: 0.95,
            },
            DocumentTopic {
                document: "le festival ouvre ses portes demain".to_string(),
                topic_id: 1,
                confidence: 0.88,
            },
            DocumentTopic {
                document: "rien de tout cela".to_string(),
                topic_id: OUTLIER_TOPIC_ID,
                confidence: 0.0,
            },
        ],
        topics: vec![topic_a, topic_b],
        document_count: 3,
    }
}

#[tokio::test]
async fn save_model_populates_all_node_and_edge_tables() {
    let store = store();
    store.save_model(&two_topic_result()).await.unwrap();

    let counts = store.counts().await.unwrap();
    assert_eq!(counts.topics, 2);
    assert_eq!(counts.documents, 3);
    assert_eq!(counts.keywords, 3);
    // The outlier document has no BELONGS_TO edge
    assert_eq!(counts.belongs_to, 2);
    assert_eq!(counts.represents, 3);
}

#[tokio::test]
async fn save_model_twice_converges() {
    let store = store();
    let result = two_topic_result();
    store.save_model(&result).await.unwrap();
    let first = store.counts().await.unwrap();
    store.save_model(&result).await.unwrap();
    let second = store.counts().await.unwrap();

    assert_eq!(first.topics, second.topics);
    assert_eq!(first.documents, second.documents);
    assert_eq!(first.keywords, second.keywords);
    assert_eq!(first.belongs_to, second.belongs_to);
    assert_eq!(first.represents, second.represents);
}

#[tokio::test]
async fn get_topics_ranked_by_weight() {
    let store = store();
    store.save_model(&two_topic_result()).await.unwrap();

    let topics = store.get_topics().await.unwrap();
    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0].label, "greve / syndicat");
    assert_eq!(topics[1].label, "festival");
}

#[tokio::test]
async fn topic_keywords_carry_strengths() {
    let store = store();
    let result = two_topic_result();
    store.save_model(&result).await.unwrap();

    let kws = store.topic_keywords(&result.topics[0].key).await.unwrap();
    assert_eq!(kws.len(), 2);
    assert_eq!(kws[0].0, "greve");
    assert!((kws[0].1 - 0.7).abs() < f64::EPSILON);
    assert_eq!(kws[1].0, "syndicat");
}

#[tokio::test]
async fn topic_document_counts() {
    let store = store();
    let result = two_topic_result();
    store.save_model(&result).await.unwrap();

    assert_eq!(
        store
            .topic_document_count(&result.topics[0].key)
            .await
            .unwrap(),
        1
    );
    assert_eq!(store.topic_document_count("missing-key").await.unwrap(), 0);
}

#[tokio::test]
async fn run_records_outlier_counts() {
    let store = store();
    let result = two_topic_result();
    store
        .record_run("mars-2024", &result, Some("out/mars-2024.csv"))
        .await
        .unwrap();

    let runs = store.recent_runs(1).await.unwrap();
    assert_eq!(runs[0].name, "mars-2024");
    assert_eq!(runs[0].document_count, 3);
    assert_eq!(runs[0].topic_count, 2);
    assert_eq!(runs[0].outlier_count, 1);
}

#[tokio::test]
async fn run_result_round_trips() {
    let store = store();
    let result = two_topic_result();
    store.record_run("avril-2024", &result, None).await.unwrap();

    let loaded = store.run_result("avril-2024").await.unwrap().unwrap();
    assert_eq!(loaded.document_count, 3);
    assert_eq!(loaded.topics.len(), 2);
    assert_eq!(loaded.topics[0].label, "greve / syndicat");
    assert_eq!(loaded.assignments.len(), 3);

    assert!(store.run_result("missing").await.unwrap().is_none());
}
