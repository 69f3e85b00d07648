// Unit tests for the topic model's pure functions.
//
// Tests isolated behavior: topic key determinism, fit invariants over a
// realistic corpus, stopword exclusion, and outlier assignment.

use audio_topic_model::topics::model::{
    topic_key, topic_label, WeightedKeyword, OUTLIER_TOPIC_ID,
};
use audio_topic_model::topics::tfidf::TfIdfTopicModel;
use audio_topic_model::topics::traits::TopicModel;
use stop_words::{get, LANGUAGE};

fn kw(word: &str, strength: f64) -> WeightedKeyword {
    WeightedKeyword {
        word: word.to_string(),
        strength,
    }
}

// ============================================================
// Topic keys and labels
// ============================================================

#[test]
fn key_ignores_strengths() {
    let a = vec![kw("radio", 0.9), kw("nuit", 0.1)];
    let b = vec![kw("radio", 0.2), kw("nuit", 0.8)];
    assert_eq!(topic_key(&a), topic_key(&b));
}

#[test]
fn key_is_sensitive_to_word_set_and_order() {
    let a = vec![kw("radio", 0.5), kw("nuit", 0.5)];
    let b = vec![kw("nuit", 0.5), kw("radio", 0.5)];
    assert_ne!(topic_key(&a), topic_key(&b));
}

#[test]
fn key_is_hex_sha256() {
    let key = topic_key(&[kw("seul", 1.0)]);
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn label_of_short_cluster_uses_all_words() {
    assert_eq!(topic_label(&[kw("radio", 0.6), kw("nuit", 0.4)]), "radio / nuit");
}

// ============================================================
// Fit invariants
// ============================================================

fn english_model() -> TfIdfTopicModel {
    TfIdfTopicModel {
        top_n_keywords: 25,
        max_topics: 6,
        stopwords: get(LANGUAGE::English),
    }
}

fn corpus() -> Vec<String> {
    vec![
        "the referee stopped the match after the goalkeeper was injured".to_string(),
        "the striker scored twice and the match ended in celebration".to_string(),
        "parliament debated the budget amendment late into the night".to_string(),
        "the budget vote split parliament along familiar lines".to_string(),
        "the goalkeeper saved a penalty in the final minute of the match".to_string(),
        "a heatwave pushed temperatures past records across the valley".to_string(),
        "records fell again as the heatwave entered its second week".to_string(),
        "the amendment passed after a marathon parliament session".to_string(),
    ]
}

#[test]
fn fit_respects_max_topics() {
    let result = english_model().fit(&corpus()).unwrap();
    assert!(!result.topics.is_empty());
    assert!(result.topics.len() <= 6);
}

#[test]
fn fit_assigns_every_document_exactly_once() {
    let docs = corpus();
    let result = english_model().fit(&docs).unwrap();
    assert_eq!(result.assignments.len(), docs.len());
    for (assignment, doc) in result.assignments.iter().zip(&docs) {
        assert_eq!(&assignment.document, doc);
    }
}

#[test]
fn fit_weights_and_strengths_are_normalized() {
    let result = english_model().fit(&corpus()).unwrap();

    let weight_sum: f64 = result.topics.iter().map(|t| t.weight).sum();
    assert!((weight_sum - 1.0).abs() < 0.01, "weights sum to {weight_sum}");

    for topic in &result.topics {
        let strength_sum: f64 = topic.keywords.iter().map(|k| k.strength).sum();
        assert!(
            (strength_sum - 1.0).abs() < 0.01,
            "strengths sum to {strength_sum} in {}",
            topic.label
        );
        // Ranked descending within the topic
        for pair in topic.keywords.windows(2) {
            assert!(pair[0].strength >= pair[1].strength);
        }
    }

    // Topics ranked descending by weight, ids in rank order
    for pair in result.topics.windows(2) {
        assert!(pair[0].weight >= pair[1].weight);
    }
    for (rank, topic) in result.topics.iter().enumerate() {
        assert_eq!(topic.id, rank as i64);
    }
}

#[test]
fn fit_orders_keywords_by_strength_when_cooccurrence_disagrees() {
    // Corpus tuned so the seed keyword's most co-occurring neighbors are
    // not its strongest ones: "bravo" scores high but shares only one
    // document with "alpha", while weaker words share three. Keyword
    // order must come from strength, not from join order.
    let docs = vec![
        "alpha charlie harbor meadow".to_string(),
        "alpha charlie harbor lantern".to_string(),
        "alpha charlie meadow lantern".to_string(),
        "alpha bravo".to_string(),
        "bravo quartz crystal".to_string(),
        "bravo quartz lantern".to_string(),
        "harbor meadow charlie lantern".to_string(),
    ];
    let model = TfIdfTopicModel {
        top_n_keywords: 10,
        max_topics: 3,
        stopwords: get(LANGUAGE::English),
    };
    let result = model.fit(&docs).unwrap();

    for topic in &result.topics {
        for pair in topic.keywords.windows(2) {
            assert!(
                pair[0].strength >= pair[1].strength,
                "keywords not in descending strength order in topic '{}': {:?}",
                topic.label,
                topic
                    .keywords
                    .iter()
                    .map(|k| (k.word.as_str(), k.strength))
                    .collect::<Vec<_>>()
            );
        }

        // The label is built from the same ranked list
        let expected_label = topic
            .keywords
            .iter()
            .take(3)
            .map(|k| k.word.as_str())
            .collect::<Vec<_>>()
            .join(" / ");
        assert_eq!(topic.label, expected_label);
    }
}

#[test]
fn fit_excludes_stopwords_from_keywords() {
    let result = english_model().fit(&corpus()).unwrap();
    for topic in &result.topics {
        for keyword in &topic.keywords {
            assert_ne!(keyword.word, "the");
            assert_ne!(keyword.word, "and");
        }
    }
}

#[test]
fn fit_confidences_are_bounded() {
    let result = english_model().fit(&corpus()).unwrap();
    for assignment in &result.assignments {
        assert!(assignment.confidence >= 0.0);
        assert!(assignment.confidence <= 1.0);
        if assignment.topic_id == OUTLIER_TOPIC_ID {
            assert!(assignment.confidence.abs() < f64::EPSILON);
        } else {
            assert!(result.topic(assignment.topic_id).is_some());
        }
    }
}

#[test]
fn fit_all_stopword_corpus_fails_cleanly() {
    let docs = vec!["the and of".to_string(), "and the of the".to_string()];
    let result = english_model().fit(&docs);
    assert!(result.is_err());
}
