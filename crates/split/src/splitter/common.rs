//! The recursive common chunker.
//!
//! Descends the separator ladder, accumulating parts into a carry buffer and
//! flushing chunks near `chunk_len`. Heading rungs strip their heading line
//! into an inherited title prefixed onto every descendant chunk. Once the
//! ladder is exhausted, a fixed-stride slice guarantees progress on content
//! with no separators at all.

use std::sync::LazyLock;

use regex::Regex;

use chunkmill_core::{SplitConfig, SplitResult};

use super::char_len;
use super::ladder::SeparatorStep;

/// Stand-in for newlines inside fenced code blocks while the ladder runs;
/// a private-use scalar so user content cannot collide with it.
const FENCE_NEWLINE: char = '\u{e000}';
const FENCE_NEWLINE_STR: &str = "\u{e000}";

/// Parts below this size never trigger an independent flush.
const MINI_CHUNK_LEN: usize = 30;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```|~~~.*?~~~").expect("fence pattern compiles"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\r?\n|\r){3,}").expect("newline pattern compiles"));

/// Hide fence-internal newlines from the ladder, then collapse runs of three
/// or more newlines down to a blank line.
fn normalize(text: &str) -> String {
    let text = FENCED_BLOCK.replace_all(text, |caps: &regex::Captures| {
        caps[0].replace('\n', FENCE_NEWLINE_STR)
    });
    EXCESS_NEWLINES.replace_all(&text, "\n\n").into_owned()
}

pub(crate) fn split_common(
    text: &str,
    config: &SplitConfig,
    ladder: &[SeparatorStep],
) -> SplitResult {
    let normalized = normalize(text);
    let splitter = CommonSplitter {
        chunk_len: config.chunk_len,
        overlap_len: config.overlap_len(),
        ladder,
    };
    let chunks = splitter.descend(&normalized, 0, String::new(), "");
    SplitResult::from_chunks(
        chunks
            .into_iter()
            .map(|chunk| chunk.replace(FENCE_NEWLINE, "\n"))
            .collect(),
    )
}

struct CommonSplitter<'a> {
    chunk_len: usize,
    overlap_len: usize,
    ladder: &'a [SeparatorStep],
}

impl CommonSplitter<'_> {
    /// Split `text` at rung `step`, carrying `carry` into the first part and
    /// prefixing `title` onto every emitted chunk. Every recursive call
    /// increments `step`, so depth is bounded by the ladder length.
    fn descend(&self, text: &str, step: usize, mut carry: String, title: &str) -> Vec<String> {
        if step >= self.ladder.len() {
            return self.hard_slice(text, title);
        }

        let rung = &self.ladder[step];
        let parts = rung.split_parts(text);

        // Once the separator is known to occur, allow chunks to grow past
        // chunk_len up to the rung's multiplier before splitting finer.
        let effective_max = if parts.len() > 1 {
            self.chunk_len as f32 * rung.max_len_multiplier
        } else {
            self.chunk_len as f32
        };
        let flush_min = 0.7 * self.chunk_len as f32;

        let mut chunks: Vec<String> = Vec::new();
        let mut i = 0;
        while i < parts.len() {
            let part = &parts[i];
            let part_title = format!("{title}{}", part.title);
            let candidate_len = char_len(&carry) + char_len(&part.body);

            if candidate_len as f32 > effective_max {
                // A large carry flushes as-is; the part is reprocessed
                // against the (strictly smaller) recomputed overlap.
                if char_len(&carry) as f32 > flush_min {
                    chunks.push(format!("{part_title}{carry}"));
                    carry = self.overlap_of(&carry, step);
                    continue;
                }

                // Small carry: fold it into the part and split finer.
                let mut candidate = std::mem::take(&mut carry);
                candidate.push_str(&part.body);
                let mut inner = self.descend(&candidate, step + 1, String::new(), &part_title);

                let fold_trailing = match inner.last() {
                    Some(last) => {
                        !rung.class.is_independent() && (char_len(last) as f32) < flush_min
                    }
                    None => false,
                };
                if fold_trailing {
                    carry = inner.pop().unwrap_or_default();
                    chunks.extend(inner);
                } else {
                    carry = inner
                        .last()
                        .map(|last| self.overlap_of(last, step))
                        .unwrap_or_default();
                    chunks.extend(inner);
                }
                i += 1;
                continue;
            }

            carry.push_str(&part.body);

            // Custom boundaries always cut; heading boundaries cut once past
            // a minimum size; anything reaching chunk_len cuts.
            if rung.class.is_custom()
                || (rung.class.is_independent() && candidate_len > MINI_CHUNK_LEN)
                || candidate_len >= self.chunk_len
            {
                chunks.push(format!("{part_title}{carry}"));
                carry = self.overlap_of(&carry, step);
            }
            i += 1;
        }

        if !carry.is_empty() {
            match chunks.last_mut() {
                // The carry is the overlap tail of the chunk just emitted.
                Some(last) if last.ends_with(&carry) => {}
                Some(last) => {
                    if (char_len(&carry) as f32) < 0.4 * self.chunk_len as f32 {
                        last.push_str(&carry);
                    } else {
                        chunks.push(format!("{title}{carry}"));
                    }
                }
                None => chunks.push(carry),
            }
        }
        chunks
    }

    /// Ladder exhausted: emit the text whole if it is small, otherwise slice
    /// windows of `chunk_len` at a fixed stride. This is the termination
    /// guarantee for separator-free content.
    fn hard_slice(&self, text: &str, title: &str) -> Vec<String> {
        if char_len(text) < self.chunk_len * 3 {
            return vec![format!("{title}{text}")];
        }

        let stride = self.chunk_len - self.overlap_len;
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_len).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            chunks.push(format!("{title}{window}"));
            start += stride;
        }
        chunks
    }

    /// Trailing substring of `text` to seed the next chunk with. Scans parts
    /// backward until the accumulated tail exceeds the overlap budget; a tail
    /// past `0.4 * chunk_len` is re-split one rung finer for a tighter,
    /// boundary-aligned overlap.
    ///
    /// The leading part is never consumed, so the result is a strict suffix
    /// of `text` (or empty). A flush that recomputes its carry here always
    /// shrinks it, which is what keeps the flush loop finite even when the
    /// overlap budget exceeds the flush threshold.
    fn overlap_of(&self, text: &str, step: usize) -> String {
        if step >= self.ladder.len() {
            return String::new();
        }
        let rung = &self.ladder[step];
        if rung.class.forbids_overlap() || self.overlap_len == 0 {
            return String::new();
        }

        let max_overlap = 0.4 * self.chunk_len as f32;
        let parts = rung.split_parts(text);

        let mut tail = String::new();
        for part in parts.iter().skip(1).rev() {
            let candidate = format!("{}{}", part.body, tail);
            let candidate_len = char_len(&candidate);
            if candidate_len > self.overlap_len {
                if candidate_len as f32 > max_overlap {
                    let finer = self.overlap_of(&candidate, step + 1);
                    return if finer.is_empty() { tail } else { finer };
                }
                return candidate;
            }
            tail = candidate;
        }
        tail
    }
}
