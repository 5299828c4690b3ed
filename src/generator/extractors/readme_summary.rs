use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]").unwrap());

/// 摘要段落的最小长度（字符数，不含）
const MIN_SUMMARY_CHARS: usize = 40;

/// README摘要提取器
///
/// 按空行切分段落，跳过标题、图片、HTML、代码块以及徽章类段落，
/// 返回第一个足够长的描述性段落。只是启发式规则，不是markdown解析器。
#[derive(Debug, Clone, Default)]
pub struct ReadmeSummaryExtractor;

impl ReadmeSummaryExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 提取摘要段落
    pub fn extract_summary(&self, readme_text: Option<&str>) -> Option<String> {
        let markdown = readme_text?;

        PARAGRAPH_BREAK
            .split(markdown)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .filter(|p| !is_structural(p))
            .find(|p| p.chars().count() > MIN_SUMMARY_CHARS)
            .map(str::to_string)
    }
}

fn is_structural(paragraph: &str) -> bool {
    if paragraph.starts_with('#')
        || paragraph.starts_with("![")
        || paragraph.starts_with('<')
        || paragraph.starts_with("```")
    {
        return true;
    }

    let lower = paragraph.to_lowercase();
    lower.contains("badge") || lower.contains("shields.io")
}

/// 将段落压缩为最多 max_sentences 个句子，空白折叠为单个空格
///
/// 没有句末标点时返回折叠后的整段文本。
pub fn shorten_to_sentences(text: &str, max_sentences: usize) -> String {
    let cleaned = WHITESPACE_RUN.replace_all(text.trim(), " ");

    let sentences: Vec<&str> = SENTENCE
        .find_iter(&cleaned)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(max_sentences)
        .collect();

    if sentences.is_empty() {
        cleaned.into_owned()
    } else {
        sentences.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_heading_and_image() {
        let extractor = ReadmeSummaryExtractor::new();
        let markdown = "# Title\n\n![badge](url)\n\nThis is a sufficiently long descriptive paragraph about the project purpose and scope.";

        assert_eq!(
            extractor.extract_summary(Some(markdown)),
            Some(
                "This is a sufficiently long descriptive paragraph about the project purpose and scope."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_none_when_only_structure_and_short_lines() {
        let extractor = ReadmeSummaryExtractor::new();
        let markdown = "# Title\n\n![cover](a.png)\n\nShort caption.\n\n## Usage\n\n```bash\ncargo run\n```";

        assert_eq!(extractor.extract_summary(Some(markdown)), None);
    }

    #[test]
    fn test_none_for_absent_or_empty() {
        let extractor = ReadmeSummaryExtractor::new();
        assert_eq!(extractor.extract_summary(None), None);
        assert_eq!(extractor.extract_summary(Some("")), None);
        assert_eq!(extractor.extract_summary(Some("\n\n   \n")), None);
    }

    #[test]
    fn test_skips_html_and_badges() {
        let extractor = ReadmeSummaryExtractor::new();
        let markdown = "<p align=\"center\"><img src=\"logo.png\"></p>\n\n\
            [![Build](https://img.shields.io/github/actions/workflow/status/a/b/ci.yml)](link) plus more words\n\n\
            Some project BADGE collection that is long enough to pass the floor.\n\n\
            A tool for turning repository metadata into a small curated gallery.";

        assert_eq!(
            extractor.extract_summary(Some(markdown)),
            Some(
                "A tool for turning repository metadata into a small curated gallery.".to_string()
            )
        );
    }

    #[test]
    fn test_blank_lines_with_spaces_split_paragraphs() {
        let extractor = ReadmeSummaryExtractor::new();
        let markdown = "tiny\n   \n\t\n  Analysis of reservation data with clustering and several classifiers.  ";

        assert_eq!(
            extractor.extract_summary(Some(markdown)),
            Some("Analysis of reservation data with clustering and several classifiers.".to_string())
        );
    }

    #[test]
    fn test_length_floor_is_exclusive() {
        let extractor = ReadmeSummaryExtractor::new();
        let exactly_forty = "a".repeat(40);
        let forty_one = "b".repeat(41);
        let markdown = format!("{}\n\n{}", exactly_forty, forty_one);

        assert_eq!(extractor.extract_summary(Some(&markdown)), Some(forty_one));
    }

    #[test]
    fn test_shorten_to_three_sentences() {
        let text = "First one.  Second\n one!\tThird one? Fourth one.";
        assert_eq!(
            shorten_to_sentences(text, 3),
            "First one. Second one! Third one?"
        );
    }

    #[test]
    fn test_shorten_without_terminator_keeps_text() {
        assert_eq!(
            shorten_to_sentences("no   terminal\npunctuation here", 3),
            "no terminal punctuation here"
        );
    }
}
