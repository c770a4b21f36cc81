//! Chunking engine: hard-boundary segmentation, markdown-table detection,
//! and dispatch to the table or common chunker.
//!
//! Each segment between `CUSTOM_SPLIT_SIGN` markers is chunked on its own;
//! no overlap or merging ever crosses the marker.

mod common;
mod ladder;
mod table;


use chunkmill_core::{SplitConfig, SplitError, SplitResult, CUSTOM_SPLIT_SIGN};
use tracing::debug;

/// Split `text` into chunks near `config.chunk_len` characters.
///
/// The one place errors surface: config validation and custom-separator
/// compilation happen here, before any chunking work.
pub fn split_text(text: &str, config: &SplitConfig) -> Result<SplitResult, SplitError> {
    config.validate()?;
    let ladder = ladder::build(config)?;

    let mut result = SplitResult::default();
    for segment in text.split(CUSTOM_SPLIT_SIGN) {
        let part = if table::is_markdown_table(segment) {
            table::split_table(segment, config.chunk_len)
        } else {
            common::split_common(segment, config, &ladder)
        };
        result.append(part);
    }

    debug!(
        chunks = result.chunks.len(),
        chars = result.chars,
        "split complete"
    );
    Ok(result)
}

/// Length in Unicode scalar values; chunk sizing is per-character, not per-byte.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
