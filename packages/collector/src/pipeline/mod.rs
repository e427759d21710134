//! Collection pipeline orchestration.

pub mod collect;

pub use collect::{collect, CollectResult};
