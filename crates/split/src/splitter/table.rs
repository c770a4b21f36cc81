//! Markdown table chunker.
//!
//! Tables are never split mid-row and never overlap; instead the header and
//! a synthesized separator row are repeated on every chunk, which is the
//! continuity mechanism downstream retrieval relies on.

use std::sync::LazyLock;

use regex::Regex;

use chunkmill_core::SplitResult;

use super::char_len;

static SEPARATOR_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\|[\s:]*-+[\s:]*)+\|$").expect("separator row pattern compiles"));

/// Best-effort markdown table detector: first line is a piped header, second
/// line is a `| --- |` separator row, and every later non-empty line is
/// piped. Anything else routes to the common chunker.
pub(crate) fn is_markdown_table(text: &str) -> bool {
    if !text.contains('|') {
        return false;
    }
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return false;
    }
    let header = lines[0].trim();
    if !header.starts_with('|') || !header.ends_with('|') {
        return false;
    }
    if !SEPARATOR_ROW.is_match(lines[1].trim()) {
        return false;
    }
    lines[2..].iter().all(|line| {
        let line = line.trim();
        line.is_empty() || (line.starts_with('|') && line.ends_with('|'))
    })
}

/// Split a table into chunks of whole data rows, each prefixed with the
/// header and a separator row matching its column count. A malformed header
/// with no columns degrades to a single-column separator row.
pub(crate) fn split_table(text: &str, chunk_len: usize) -> SplitResult {
    let lines: Vec<&str> = text.split('\n').collect();
    let header = lines.first().copied().unwrap_or_default();
    // Leading and trailing pipes produce one empty field each.
    let columns = header.split('|').count().saturating_sub(2).max(1);
    let separator_row = format!("| {} |", vec!["---"; columns].join(" | "));

    let head = format!("{header}\n{separator_row}\n");
    let limit = chunk_len as f32 * 1.2;

    let mut chunks = Vec::new();
    let mut chunk = head.clone();
    for line in lines.iter().skip(2) {
        if (char_len(&chunk) + char_len(line)) as f32 > limit {
            chunks.push(std::mem::replace(&mut chunk, head.clone()));
        }
        chunk.push_str(line);
        chunk.push('\n');
    }
    chunks.push(chunk);

    SplitResult::from_chunks(chunks)
}
