//! Core trait abstractions: the pipeline's external collaborators.

pub mod model;
pub mod sink;
pub mod source;

pub use model::{LabelScore, ModelBackend, SentimentScores};
pub use sink::RecordSink;
pub use source::ContentSource;
