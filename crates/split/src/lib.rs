//! Recursive multi-strategy text chunking for retrieval ingestion.
//!
//! Splits raw documents (prose, markdown, tables, code) into bounded-size,
//! context-preserving chunks suitable for embedding and indexing.

pub mod splitter;

pub use chunkmill_core::{clean_text, SplitConfig, SplitError, SplitResult, CUSTOM_SPLIT_SIGN};
pub use splitter::split_text;
