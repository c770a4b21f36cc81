//! The separator ladder: ordered boundary classes from most to least
//! specific. The common chunker walks it top-down, recursing one rung at a
//! time, so the rung index doubles as the recursion depth bound.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use chunkmill_core::{SplitConfig, SplitError};

/// One boundary class the common chunker can split at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeparatorClass {
    /// User-supplied literal separator (index into the custom list).
    Custom(usize),
    /// Markdown ATX heading of the given level (1-4).
    Header(u8),
    /// Newline immediately before a ``` or ~~~ fence.
    CodeFence,
    /// Newline not followed by a list/quote/table/digit marker.
    ParagraphBreak,
    /// Any newline.
    Newline,
    /// Full stop: `。`, or letter followed by `. `.
    Sentence,
    Exclamation,
    Question,
    Semicolon,
    Comma,
}

impl SeparatorClass {
    pub(crate) fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Chunks cut at this boundary flush on their own once past a minimum
    /// size, without accumulating with neighbours. The matched marker leads
    /// the following part instead of trailing the preceding one.
    pub(crate) fn is_independent(self) -> bool {
        matches!(self, Self::Custom(_) | Self::Header(_))
    }

    /// No overlap is carried across this boundary.
    pub(crate) fn forbids_overlap(self) -> bool {
        matches!(
            self,
            Self::Custom(_)
                | Self::Header(_)
                | Self::CodeFence
                | Self::ParagraphBreak
                | Self::Newline
        )
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Pattern(Regex),
    /// `\n` before a fence char; only the newline is the separator, so the
    /// fence char opens the following part.
    FenceNewline(Regex),
    /// `\n` not followed by optional whitespace and a `*-|>` or digit marker.
    /// Needs lookahead, which `regex` lacks, so it is scanned by hand.
    ParagraphBreak,
}

/// One rung of the ladder.
#[derive(Debug, Clone)]
pub(crate) struct SeparatorStep {
    pub class: SeparatorClass,
    /// Accumulation limit at this rung is `chunk_len * max_len_multiplier`
    /// once the separator is known to occur in the text.
    pub max_len_multiplier: f32,
    matcher: Matcher,
}

/// A piece of text between separators. `title` is non-empty only for heading
/// rungs, where the matched heading line is stripped from the body and
/// inherited by every descendant chunk.
#[derive(Debug, Clone)]
pub(crate) struct Part {
    pub title: String,
    pub body: String,
}

impl SeparatorStep {
    /// Split `text` at every separator match, dropping whitespace-only
    /// parts. Independent rungs keep the matched marker as a prefix of the
    /// following part; ordinary rungs keep it as a suffix of the preceding
    /// part so terminal punctuation stays attached to its sentence.
    pub(crate) fn split_parts(&self, text: &str) -> Vec<Part> {
        let bounds = self.boundaries(text);
        let prefix_attach = self.class.is_independent();

        let mut raw: Vec<&str> = Vec::with_capacity(bounds.len() + 1);
        let mut start = 0;
        for (sep_start, sep_end) in bounds {
            let cut = if prefix_attach { sep_start } else { sep_end };
            if cut > start {
                raw.push(&text[start..cut]);
            }
            start = cut;
        }
        if start < text.len() {
            raw.push(&text[start..]);
        }

        let mut parts = Vec::with_capacity(raw.len());
        for piece in raw {
            if piece.trim().is_empty() {
                continue;
            }
            let (title, body) = self.extract_title(piece);
            if body.trim().is_empty() {
                continue;
            }
            parts.push(Part { title, body });
        }
        parts
    }

    /// Byte ranges of every separator occurrence, ascending.
    fn boundaries(&self, text: &str) -> Vec<(usize, usize)> {
        match &self.matcher {
            Matcher::Pattern(re) => re.find_iter(text).map(|m| (m.start(), m.end())).collect(),
            Matcher::FenceNewline(re) => re
                .find_iter(text)
                .map(|m| (m.start(), m.start() + 1))
                .collect(),
            Matcher::ParagraphBreak => paragraph_breaks(text),
        }
    }

    /// Strip a leading heading line from a heading-rung part.
    fn extract_title(&self, piece: &str) -> (String, String) {
        if !matches!(self.class, SeparatorClass::Header(_)) {
            return (String::new(), piece.to_string());
        }
        let Matcher::Pattern(re) = &self.matcher else {
            return (String::new(), piece.to_string());
        };
        match re.find(piece) {
            Some(m) => {
                let title = m.as_str().to_string();
                let body = format!("{}{}", &piece[..m.start()], &piece[m.end()..]);
                (title, body)
            }
            None => (String::new(), piece.to_string()),
        }
    }
}

fn paragraph_breaks(text: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for (i, byte) in text.as_bytes().iter().enumerate() {
        if *byte != b'\n' {
            continue;
        }
        let next = text[i + 1..].chars().find(|c| !c.is_whitespace());
        let blocked = match next {
            Some(c) => matches!(c, '*' | '-' | '|' | '>') || c.is_ascii_digit(),
            None => false,
        };
        if !blocked {
            out.push((i, i + 1));
        }
    }
    out
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("built-in separator pattern compiles")
}

static BUILTIN: LazyLock<Vec<SeparatorStep>> = LazyLock::new(|| {
    let mut steps = Vec::with_capacity(12);
    for level in 1..=4u8 {
        let hashes = "#".repeat(level as usize);
        steps.push(SeparatorStep {
            class: SeparatorClass::Header(level),
            max_len_multiplier: 1.2,
            matcher: Matcher::Pattern(pattern(&format!(r"(?m)^{hashes}\s[^\n]+\n"))),
        });
    }
    steps.push(SeparatorStep {
        class: SeparatorClass::CodeFence,
        max_len_multiplier: 4.0,
        matcher: Matcher::FenceNewline(pattern(r"\n[`~]")),
    });
    steps.push(SeparatorStep {
        class: SeparatorClass::ParagraphBreak,
        max_len_multiplier: 2.0,
        matcher: Matcher::ParagraphBreak,
    });
    steps.push(SeparatorStep {
        class: SeparatorClass::Newline,
        max_len_multiplier: 1.2,
        matcher: Matcher::Pattern(pattern(r"\n")),
    });
    steps.push(SeparatorStep {
        class: SeparatorClass::Sentence,
        max_len_multiplier: 1.2,
        matcher: Matcher::Pattern(pattern(r"。|[a-zA-Z]\.\s")),
    });
    steps.push(SeparatorStep {
        class: SeparatorClass::Exclamation,
        max_len_multiplier: 1.2,
        matcher: Matcher::Pattern(pattern(r"！|!\s")),
    });
    steps.push(SeparatorStep {
        class: SeparatorClass::Question,
        max_len_multiplier: 1.4,
        matcher: Matcher::Pattern(pattern(r"？|\?\s")),
    });
    steps.push(SeparatorStep {
        class: SeparatorClass::Semicolon,
        max_len_multiplier: 1.6,
        matcher: Matcher::Pattern(pattern(r"；|;\s")),
    });
    steps.push(SeparatorStep {
        class: SeparatorClass::Comma,
        max_len_multiplier: 2.0,
        matcher: Matcher::Pattern(pattern(r"，|,\s")),
    });
    steps
});

/// Build the full ladder for one call: custom separators first (escaped to
/// literal patterns), then the built-in rungs.
pub(crate) fn build(config: &SplitConfig) -> Result<Vec<SeparatorStep>, SplitError> {
    let mut steps = Vec::with_capacity(config.custom_separators.len() + BUILTIN.len());
    for (index, sep) in config.custom_separators.iter().enumerate() {
        if sep.is_empty() {
            warn!(index, "skipping empty custom separator");
            continue;
        }
        let re = Regex::new(&regex::escape(sep)).map_err(|e| SplitError::Separator {
            separator: sep.clone(),
            reason: e.to_string(),
        })?;
        steps.push(SeparatorStep {
            class: SeparatorClass::Custom(index),
            max_len_multiplier: 1.4,
            matcher: Matcher::Pattern(re),
        });
    }
    steps.extend(BUILTIN.iter().cloned());
    Ok(steps)
}
