use std::sync::OnceLock;
use syntect::{
    Error,
    easy::HighlightLines,
    highlighting::ThemeSet,
    html::{IncludeBackground, styled_line_to_highlighted_html},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

const THEME: &str = "InspiredGitHub";

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

pub struct CodeBlock {
    language: String,
}

impl CodeBlock {
    /// Returns the block and the opening HTML for it. The closing tags are
    /// emitted by the caller once the block's content has been highlighted.
    pub fn new(fence: &str) -> (Self, String) {
        // The fence may carry more than the language, e.g. ```rs title=main.rs
        let language = fence.split_whitespace().next().unwrap_or("").to_string();

        let opening_html = if language.is_empty() {
            "<pre><code>".to_string()
        } else {
            format!("<pre data-language=\"{language}\"><code data-language=\"{language}\">")
        };

        (Self { language }, opening_html)
    }

    pub fn highlight(&self, content: &str) -> Result<String, Error> {
        let ss = syntax_set();

        let syntax = ss
            .find_syntax_by_token(&self.language)
            .or_else(|| ss.find_syntax_by_extension(&self.language))
            .or_else(|| ss.find_syntax_by_first_line(content))
            .unwrap_or_else(|| ss.find_syntax_plain_text());

        let theme = &theme_set().themes[THEME];
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut highlighted = String::new();
        for line in LinesWithEndings::from(content) {
            let regions = highlighter.highlight_line(line, ss)?;
            let html = styled_line_to_highlighted_html(&regions, IncludeBackground::No)?;
            highlighted.push_str(&html);
        }

        Ok(highlighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_html_carries_language() {
        let (_, opening) = CodeBlock::new("rs");
        assert_eq!(
            opening,
            "<pre data-language=\"rs\"><code data-language=\"rs\">"
        );

        let (_, opening) = CodeBlock::new("");
        assert_eq!(opening, "<pre><code>");
    }

    #[test]
    fn test_highlight_unknown_language_falls_back_to_plain_text() {
        let (block, _) = CodeBlock::new("definitely-not-a-language");
        let html = block.highlight("plain words\n").unwrap();

        assert!(html.contains("plain words"));
    }
}
