// Topic model trait — swap-ready abstraction.
//
// The default implementation is TF-IDF plus co-occurrence clustering. An
// embeddings-based model (the original service used a multilingual sentence
// transformer) would slot in behind the same trait without touching the
// pipeline, the CSV writer, or the graph store.

use anyhow::Result;

use super::model::TopicModelResult;

/// Trait for fitting a topic model over a corpus of documents.
pub trait TopicModel {
    /// Fit the model and assign every document to a topic (or the outlier
    /// bucket). Assignments come back in corpus order.
    fn fit(&self, documents: &[String]) -> Result<TopicModelResult>;
}
