//! Sink implementations.

pub mod csv;
pub mod memory;

pub use self::csv::CsvSink;
pub use memory::MemorySink;
