// audio-topic-model: Micro service for performing topic modeling on audio data
//
// This is the library root. Each module corresponds to a stage of the
// transcript-to-knowledge-graph pipeline.

pub mod config;
pub mod graph;
pub mod ingest;
pub mod report;
pub mod status;
pub mod topics;
