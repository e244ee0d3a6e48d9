// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markup parsing and text selection.
//!
//! Two selection modes are supported:
//! - **Candidates**: paragraphs, headings, list items, and block containers
//!   are cleaned individually and only blocks longer than a threshold are
//!   kept. This drops navigation labels and button captions.
//! - **Document**: all visible body text is cleaned as one blob.

use sairen_config::model::SelectionMode;
use scraper::{ElementRef, Html, Node, Selector};

use crate::clean::clean_text;

/// Elements whose whole descendant text forms one candidate block.
const LEAF_BLOCKS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote",
];

/// Containers contribute only their own direct text, since nested blocks are
/// visited separately.
const CONTAINERS: &[&str] = &["div", "section", "article", "main"];

/// Elements whose text is never shown to a reader.
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// Selects and cleans the text of an HTML document.
///
/// Returns an empty string when the document has no text that survives
/// selection.
pub fn extract_text(markup: &str, mode: SelectionMode, min_block_chars: usize) -> String {
    let document = Html::parse_document(markup);
    match mode {
        SelectionMode::Candidates => candidate_text(&document, min_block_chars),
        SelectionMode::Document => document_text(&document),
    }
}

fn candidate_text(document: &Html, min_block_chars: usize) -> String {
    let tags: Vec<&str> = LEAF_BLOCKS.iter().chain(CONTAINERS).copied().collect();
    let Ok(candidates) = Selector::parse(&tags.join(", ")) else {
        return String::new();
    };

    let blocks: Vec<String> = document
        .select(&candidates)
        .filter(|el| !is_inside_invisible(el) && !is_inside_leaf_block(el))
        .map(|el| {
            let raw = if CONTAINERS.contains(&el.value().name()) {
                own_text(&el)
            } else {
                el.text().collect::<Vec<_>>().join(" ")
            };
            clean_text(&raw)
        })
        .filter(|block| block.len() > min_block_chars)
        .collect();

    blocks.join(" ")
}

fn document_text(document: &Html) -> String {
    let root = match Selector::parse("body") {
        Ok(body) => document
            .select(&body)
            .next()
            .unwrap_or_else(|| document.root_element()),
        Err(_) => document.root_element(),
    };

    let pieces: Vec<&str> = root
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent().and_then(ElementRef::wrap)?;
            if INVISIBLE.contains(&parent.value().name()) {
                None
            } else {
                Some(&**text)
            }
        })
        .collect();

    clean_text(&pieces.join(" "))
}

/// Text nodes that are direct children of `el`.
fn own_text(el: &ElementRef<'_>) -> String {
    el.children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A leaf block already contributed all of its descendant text.
fn is_inside_leaf_block(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| LEAF_BLOCKS.contains(&a.value().name()))
}

fn is_inside_invisible(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| INVISIBLE.contains(&a.value().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<!doctype html>
<html>
<head><title>About us</title><style>body { color: red; }</style></head>
<body>
  <nav><a href="/">Home</a> <a href="/shop">Shop</a></nav>
  <main>
    <h1>About Sai Ren and our commitment to customers</h1>
    <p>We ship every order within two business days, anywhere.</p>
    <div>Returns are accepted within thirty days of delivery.<p>Short one.</p></div>
    <script>var tracking = "should never appear in output";</script>
  </main>
  <footer>Copyright</footer>
</body>
</html>"#;

    #[test]
    fn candidates_keep_long_blocks_in_document_order() {
        let text = extract_text(PAGE, SelectionMode::Candidates, 20);
        assert_eq!(
            text,
            "About Sai Ren and our commitment to customers \
             We ship every order within two business days, anywhere. \
             Returns are accepted within thirty days of delivery."
        );
    }

    #[test]
    fn candidates_drop_short_fragments() {
        let text = extract_text(PAGE, SelectionMode::Candidates, 20);
        assert!(!text.contains("Short one."));
        assert!(!text.contains("Home"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn scripts_and_styles_are_ignored() {
        for mode in [SelectionMode::Candidates, SelectionMode::Document] {
            let text = extract_text(PAGE, mode, 0);
            assert!(!text.contains("tracking"), "{mode:?}: {text}");
            assert!(!text.contains("color: red"), "{mode:?}: {text}");
        }
    }

    #[test]
    fn document_mode_takes_all_body_text() {
        let text = extract_text(PAGE, SelectionMode::Document, 20);
        assert!(text.starts_with("Home Shop About Sai Ren"));
        assert!(text.contains("Short one."));
        assert!(text.ends_with("Copyright"));
        assert!(!text.contains("About us"), "title lives in head: {text}");
    }

    #[test]
    fn threshold_is_exclusive() {
        let html = "<p>exactly10!</p><p>eleven char</p>";
        assert_eq!(
            extract_text(html, SelectionMode::Candidates, 10),
            "eleven char"
        );
    }

    #[test]
    fn nested_blocks_are_emitted_once() {
        let html = "<ul><li><p>Free shipping on every order over fifty dollars.</p></li></ul>\
                    <blockquote><p>Best phone I have owned in years.</p>\
                    <div>Signed by a verified buyer</div></blockquote>";
        assert_eq!(
            extract_text(html, SelectionMode::Candidates, 20),
            "Free shipping on every order over fifty dollars. \
             Best phone I have owned in years. Signed by a verified buyer"
        );
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(extract_text("", SelectionMode::Candidates, 20), "");
        assert_eq!(extract_text("", SelectionMode::Document, 20), "");
    }
}
