//! Header region matching and first-match substitution.
//!
//! A header region is the literal `<header`, any run of characters other than
//! `>`, a `>`, then the shortest span (line breaks included) up to the next
//! literal `</header>`. This is textual matching only: nested `<header>`
//! elements, a `>` inside an attribute value, and look-alike tags such as
//! `<headers>` are not treated specially.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Source of the header-region pattern.
pub const HEADER_PATTERN: &str = r"(?s)<header[^>]*>.*?</header>";

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("invalid header pattern"));

/// Byte range of the first header region in `content`, if any.
pub fn find_header(content: &str) -> Option<Range<usize>> {
    HEADER_REGEX.find(content).map(|m| m.range())
}

/// Result of substituting the template into one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Page content after substitution; identical to the input when no
    /// region matched.
    pub content: String,
    /// Range of the replaced region in the *original* content.
    pub replaced: Option<Range<usize>>,
}

impl Substitution {
    pub fn header_replaced(&self) -> bool {
        self.replaced.is_some()
    }
}

/// Replace the first header region of `content` with `template`, verbatim.
///
/// Only the first region is replaced; later regions are left as they are.
/// The template is inserted as-is, with no `$` group expansion.
pub fn replace_first_header(content: &str, template: &str) -> Substitution {
    let Some(range) = find_header(content) else {
        return Substitution {
            content: content.to_string(),
            replaced: None,
        };
    };

    let mut out = String::with_capacity(content.len() - range.len() + template.len());
    out.push_str(&content[..range.start]);
    out.push_str(template);
    out.push_str(&content[range.end..]);
    Substitution {
        content: out,
        replaced: Some(range),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const TEMPLATE: &str = r#"<header class="site"><nav>NEW</nav></header>"#;

    #[test]
    fn replaces_header_with_attributes() {
        let page = r#"<html><header id="old"><nav>OLD</nav></header><body>X</body></html>"#;
        let sub = replace_first_header(page, TEMPLATE);
        assert_eq!(
            sub.content,
            r#"<html><header class="site"><nav>NEW</nav></header><body>X</body></html>"#
        );
        assert!(sub.header_replaced());
    }

    #[test]
    fn match_spans_line_breaks() {
        let page = "<body>\n  <header>\n    <h1>Old</h1>\n  </header>\n</body>\n";
        let sub = replace_first_header(page, TEMPLATE);
        assert_eq!(sub.content, format!("<body>\n  {TEMPLATE}\n</body>\n"));
    }

    #[test]
    fn only_first_of_two_headers_is_replaced() {
        let page = "<header>one</header><main/><header>two</header>";
        let sub = replace_first_header(page, "<header>T</header>");
        assert_eq!(sub.content, "<header>T</header><main/><header>two</header>");
        assert_eq!(sub.replaced, Some(0..20));
    }

    #[test]
    fn match_is_non_greedy() {
        let page = "<header>a</header>mid</header>";
        assert_eq!(find_header(page), Some(0..18));
    }

    #[test]
    fn no_header_returns_input_unchanged() {
        let page = "<html><body>no header here</body></html>";
        let sub = replace_first_header(page, TEMPLATE);
        assert_eq!(sub.content, page);
        assert!(!sub.header_replaced());
    }

    #[test]
    fn unterminated_header_does_not_match() {
        let page = "<header><nav>never closed</nav>";
        assert_eq!(find_header(page), None);
    }

    #[test]
    fn dollar_signs_in_template_are_literal() {
        let sub = replace_first_header("<header>x</header>", "<header>$0 ${1}</header>");
        assert_eq!(sub.content, "<header>$0 ${1}</header>");
    }

    #[test]
    fn template_inserted_without_whitespace_changes() {
        let template = "<header>\r\n\t  spaced  \n</header>\n\n";
        let sub = replace_first_header("A<header/>B</header>C", template);
        assert_eq!(sub.content, format!("A{template}C"));
    }

    #[rstest]
    #[case("<header>", true)]
    #[case("<header class=\"a\" data-x='1'>", true)]
    #[case("<header\n  id=\"multi\">", true)]
    #[case("<HEADER>", false)]
    #[case("<head>", false)]
    fn start_tag_forms(#[case] start: &str, #[case] matches: bool) {
        let page = format!("{start}body</header>");
        assert_eq!(find_header(&page).is_some(), matches, "start tag: {start:?}");
    }

    #[test]
    fn lookalike_tag_prefix_is_a_known_limitation() {
        // `<headers>` shares the `<header` prefix and is matched textually.
        assert!(find_header("<headers>x</header>").is_some());
    }
}
