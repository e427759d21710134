//! Model backend implementations.

pub mod inference;

pub use inference::InferenceBackend;
