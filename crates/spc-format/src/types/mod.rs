//! Configuration types for reading and writing.

mod options;

pub use options::{SpcReaderOptions, SpcWriterOptions};
