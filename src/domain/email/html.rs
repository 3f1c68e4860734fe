//! HTML conversion module.
//!
//! This module contains the conversion of HTML bodies to plain text.

use regex::Regex;

/// Converts an HTML body to plain text.
///
/// Style and script blocks are dropped with their content, entities
/// are decoded, closing block tags become line breaks, every other
/// tag is stripped and whitespace is collapsed.
pub fn html_to_text(html: &str) -> String {
    let text = Regex::new(r"(?is)<style[^>]*>.*?</style>")
        .unwrap()
        .replace_all(html, "");
    let text = Regex::new(r"(?is)<script[^>]*>.*?</script>")
        .unwrap()
        .replace_all(&text, "");

    let text = html_escape::decode_html_entities(&text).into_owned();

    let text = Regex::new(r"(?i)</(div|p|br|h[1-6]|li)>")
        .unwrap()
        .replace_all(&text, "${0}\n");
    let text = Regex::new(r"(?i)<br\s*/?>").unwrap().replace_all(&text, "\n");

    let text = Regex::new(r"<[^>]*>").unwrap().replace_all(&text, "");

    let text = Regex::new(r"\n\s*\n").unwrap().replace_all(&text, "\n\n");
    let text = Regex::new(r"[ \t]+").unwrap().replace_all(&text, " ");

    text.trim().to_string()
}

#[cfg(test)]
mod test_html_to_text {
    use super::html_to_text;

    #[test]
    fn test_paragraphs_become_line_breaks() {
        let html = "<p>Hello,</p><p>I cannot log in.</p>";
        assert_eq!("Hello,\nI cannot log in.", html_to_text(html));
    }

    #[test]
    fn test_style_and_script_content_is_dropped() {
        let html = concat!(
            "<html><head>",
            "<STYLE type=\"text/css\">body { color: red; }</STYLE>",
            "<script>\nalert('hi');\n</script>",
            "</head><body><div>Visible text</div></body></html>",
        );
        let text = html_to_text(html);
        assert_eq!("Visible text", text);
        assert!(!text.contains("color"));
        assert!(!text.contains("alert"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<p>Caf&eacute; &amp; cr&egrave;me &#8211; d&eacute;j&agrave; vu</p>";
        assert_eq!("Café & crème – déjà vu", html_to_text(html));
    }

    #[test]
    fn test_br_variants_break_lines() {
        let html = "line one<br>line two<br/>line three<br />line four";
        assert_eq!(
            "line one\nline two\nline three\nline four",
            html_to_text(html)
        );
    }

    #[test]
    fn test_list_items_and_headings_keep_their_own_lines() {
        let html = "<h1>Issue</h1><ul><li>first</li><li>second</li></ul>";
        assert_eq!("Issue\nfirst\nsecond", html_to_text(html));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let html = "<div>too    many\t\tspaces</div>\n\n\n<div>next</div>";
        assert_eq!("too many spaces\n\nnext", html_to_text(html));
    }
}
