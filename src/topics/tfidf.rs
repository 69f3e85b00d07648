// TF-IDF topic model implementation.
//
// Uses the `keyword_extraction` crate to rank keywords across the corpus,
// then clusters co-occurring keywords into topics and assigns each document
// to the topic whose keywords it matches best.
//
// Each transcript line is a separate document for IDF computation — words
// that appear everywhere in a recording get downweighted, while words that
// are distinctive to certain passages get boosted.

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use tracing::info;

use super::model::{
    topic_key, topic_label, DocumentTopic, Topic, TopicModelResult, WeightedKeyword,
    OUTLIER_TOPIC_ID,
};
use super::traits::TopicModel;

/// TF-IDF based topic model — the default backend.
///
/// Runs entirely locally: no model downloads, no API calls. Stopwords are
/// supplied by the caller (language list + optional user file) so the model
/// itself stays language-agnostic.
pub struct TfIdfTopicModel {
    /// How many top keywords to extract before clustering
    pub top_n_keywords: usize,
    /// How many topics to produce at most
    pub max_topics: usize,
    /// Words excluded from ranking entirely
    pub stopwords: Vec<String>,
}

impl TfIdfTopicModel {
    pub fn new(stopwords: Vec<String>) -> Self {
        Self {
            top_n_keywords: 60,
            max_topics: 10,
            stopwords,
        }
    }
}

impl TopicModel for TfIdfTopicModel {
    fn fit(&self, documents: &[String]) -> Result<TopicModelResult> {
        if documents.is_empty() {
            anyhow::bail!("No documents to model — the corpus is empty");
        }

        // Run TF-IDF with each document scored separately.
        // The library handles tokenization, stopword removal, and scoring.
        let params = TfIdfParams::UnprocessedDocuments(documents, &self.stopwords, None);
        let tfidf = TfIdf::new(params);

        let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(self.top_n_keywords);

        if ranked.is_empty() {
            anyhow::bail!(
                "TF-IDF produced no keywords from {} documents — the corpus may be \
                 too short or consist entirely of stopwords",
                documents.len()
            );
        }

        info!(
            keywords = ranked.len(),
            top_keyword = &ranked[0].0,
            top_score = ranked[0].1,
            "Ranked TF-IDF keywords"
        );

        let topics = build_topics(&ranked, documents, self.max_topics);
        let assignments = assign_documents(documents, &topics);

        Ok(TopicModelResult {
            topics,
            assignments,
            document_count: documents.len() as u32,
        })
    }
}

/// Group ranked keywords into topics based on co-occurrence.
///
/// Strategy: for each pair of keywords, count how many documents contain
/// both. Then greedily build topics by seeding from the highest-scored
/// unassigned keyword and pulling in its most co-occurring neighbors.
fn build_topics(ranked: &[(String, f32)], documents: &[String], max_topics: usize) -> Vec<Topic> {
    let keywords: Vec<&str> = ranked.iter().map(|(w, _)| w.as_str()).collect();

    // For each document, record which keywords appear in it
    let doc_keywords: Vec<Vec<usize>> = documents
        .iter()
        .map(|doc| {
            let lower = doc.to_lowercase();
            keywords
                .iter()
                .enumerate()
                .filter(|(_, kw)| lower.contains(*kw))
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    // Co-occurrence counts over keyword pairs
    let n = keywords.len();
    let mut cooccurrence = vec![vec![0u32; n]; n];
    for dk in &doc_keywords {
        for &i in dk {
            for &j in dk {
                if i != j {
                    cooccurrence[i][j] += 1;
                }
            }
        }
    }

    let mut assigned = vec![false; n];
    let mut topics: Vec<Topic> = Vec::new();
    let total_score: f32 = ranked.iter().map(|(_, s)| s).sum();

    for seed_idx in 0..n {
        if topics.len() >= max_topics {
            break;
        }
        if assigned[seed_idx] {
            continue;
        }

        assigned[seed_idx] = true;
        let mut member_indices = vec![seed_idx];

        // Pull in the top co-occurring unassigned keywords
        let mut candidates: Vec<(usize, u32)> = (0..n)
            .filter(|&i| !assigned[i] && cooccurrence[seed_idx][i] > 0)
            .map(|i| (i, cooccurrence[seed_idx][i]))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _count) in candidates.into_iter().take(5) {
            assigned[idx] = true;
            member_indices.push(idx);
        }

        // Raw cluster mass decides the topic weight; within the topic,
        // keyword strengths are normalized to sum to 1.0
        let raw_mass: f32 = member_indices.iter().map(|&i| ranked[i].1).sum();
        let mut kws: Vec<WeightedKeyword> = member_indices
            .iter()
            .map(|&i| WeightedKeyword {
                word: ranked[i].0.clone(),
                strength: if raw_mass > 0.0 {
                    (ranked[i].1 / raw_mass) as f64
                } else {
                    0.0
                },
            })
            .collect();

        // Members arrive in co-occurrence order, which is not strength
        // order — a late-pulled keyword can outweigh the second member.
        // The label and every display path take the list as ranked, so
        // rank it here.
        kws.sort_by(|a, b| {
            b.strength
                .partial_cmp(&a.strength)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let weight = if total_score > 0.0 {
            (raw_mass / total_score) as f64
        } else {
            0.0
        };

        topics.push(Topic {
            id: 0, // assigned after ranking below
            key: topic_key(&kws),
            label: topic_label(&kws),
            keywords: kws,
            weight,
        });
    }

    // Normalize topic weights so they sum to 1.0, rank by weight, then
    // hand out ids in rank order
    let weight_sum: f64 = topics.iter().map(|t| t.weight).sum();
    if weight_sum > 0.0 {
        for topic in &mut topics {
            topic.weight /= weight_sum;
        }
    }
    topics.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (rank, topic) in topics.iter_mut().enumerate() {
        topic.id = rank as i64;
    }

    topics
}

/// Assign every document to the topic whose keywords it matches best.
///
/// A document's score against a topic is the summed strength of the topic
/// keywords it contains. Documents matching no keyword in any topic land in
/// the outlier bucket with confidence 0.0.
fn assign_documents(documents: &[String], topics: &[Topic]) -> Vec<DocumentTopic> {
    documents
        .iter()
        .map(|doc| {
            let lower = doc.to_lowercase();

            let mut best_topic = OUTLIER_TOPIC_ID;
            let mut best_score = 0.0f64;
            let mut total = 0.0f64;

            for topic in topics {
                let score: f64 = topic
                    .keywords
                    .iter()
                    .filter(|kw| lower.contains(kw.word.as_str()))
                    .map(|kw| kw.strength * topic.weight)
                    .sum();
                total += score;
                if score > best_score {
                    best_score = score;
                    best_topic = topic.id;
                }
            }

            let confidence = if total > 0.0 { best_score / total } else { 0.0 };

            DocumentTopic {
                document: doc.clone(),
                topic_id: best_topic,
                confidence,
            }
        })
        .collect()
}
