// Topic modeling — TF-IDF keyword ranking, co-occurrence clustering,
// and per-document topic assignment.

pub mod model;
pub mod stopwords;
pub mod tfidf;
pub mod traits;
