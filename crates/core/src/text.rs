//! Text cleanup applied upstream of the splitter.

use std::sync::LazyLock;

use regex::Regex;

static CJK_GAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\u{4e00}-\u{9fa5}])[\s&&[^\n]]+([\u{4e00}-\u{9fa5}])")
        .expect("cleanup pattern compiles")
});
static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("cleanup pattern compiles"));
static WIDE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s&&[^\n]]{2,}").expect("cleanup pattern compiles"));
static CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08]").expect("cleanup pattern compiles"));

/// Normalize extracted text before chunking: trim, drop whitespace wedged
/// between adjacent CJK ideographs, normalize CRLF/CR to LF, collapse blank
/// runs, and blank out C0 control bytes.
pub fn clean_text(text: &str) -> String {
    let text = text.trim();
    let text = CJK_GAP.replace_all(text, "${1}${2}").into_owned();
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = EXTRA_NEWLINES.replace_all(&text, "\n\n").into_owned();
    let text = WIDE_SPACE.replace_all(&text, " ").into_owned();
    CONTROL.replace_all(&text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_space_between_cjk() {
        assert_eq!(clean_text("中 文 字"), "中文 字");
        assert_eq!(clean_text("中\t文"), "中文");
        // Latin text keeps its single spaces.
        assert_eq!(clean_text("hello world"), "hello world");
    }

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(clean_text("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(clean_text("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_text("a    b"), "a b");
    }

    #[test]
    fn blanks_control_bytes() {
        assert_eq!(clean_text("a\u{0001}b"), "a b");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(clean_text("  padded  \n"), "padded");
    }
}
