//! Split output types shared by the chunking strategies.

use serde::{Deserialize, Serialize};

/// Hard segment boundary marker. Text on either side is chunked
/// independently; no chunk ever spans across it.
pub const CUSTOM_SPLIT_SIGN: &str = "-----CUSTOM_SPLIT_SIGN-----";

/// Ordered chunks plus the total character count across them. Overlap text
/// and repeated table headers are counted once per chunk they appear in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitResult {
    /// Chunks in source order.
    pub chunks: Vec<String>,
    /// Sum of per-chunk character counts.
    pub chars: usize,
}

impl SplitResult {
    pub fn from_chunks(chunks: Vec<String>) -> Self {
        let chars = chunks.iter().map(|c| c.chars().count()).sum();
        Self { chunks, chars }
    }

    /// Append another result, preserving chunk order.
    pub fn append(&mut self, mut other: SplitResult) {
        self.chars += other.chars;
        self.chunks.append(&mut other.chunks);
    }
}
