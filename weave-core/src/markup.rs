//! Markup output tree and HTML serialization.
//!
//! [`MarkupNode`] mirrors the design tree with style attributes replaced
//! by resolved class lists. Serialization produces indented HTML text;
//! [`render_page`] wraps a rendered body in the full page skeleton that
//! links the generated style sheet.

use std::fmt::Write as _;

/// One node of the rendered markup tree.
#[derive(Debug, Clone)]
pub struct MarkupNode {
    /// Element tag (`div` or `p`).
    pub tag: &'static str,
    /// Resolved class tokens, the fixed kind class first.
    pub classes: Vec<String>,
    /// Literal text content, for text nodes.
    pub text: Option<String>,
    /// Child nodes in document order.
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    /// A container element with children.
    #[must_use]
    pub fn element(
        tag: &'static str,
        kind_class: &str,
        classes: Vec<String>,
        children: Vec<MarkupNode>,
    ) -> Self {
        let mut all = vec![kind_class.to_string()];
        all.extend(classes);
        Self {
            tag,
            classes: all,
            text: None,
            children,
        }
    }

    /// A leaf element with literal text content.
    #[must_use]
    pub fn text_element(
        tag: &'static str,
        kind_class: &str,
        classes: Vec<String>,
        text: String,
    ) -> Self {
        let mut node = Self::element(tag, kind_class, classes, Vec::new());
        node.text = Some(text);
        node
    }

    /// Serialize this node and its descendants as indented HTML, starting
    /// at the given indentation depth.
    #[must_use]
    pub fn to_html(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write_html(&mut out, depth);
        out
    }

    fn write_html(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let class_attr = escape_attribute(&self.classes.join(" "));

        if let Some(text) = &self.text {
            let _ = writeln!(
                out,
                "{indent}<{tag} class=\"{class_attr}\">{}</{tag}>",
                escape_text(text),
                tag = self.tag,
            );
        } else if self.children.is_empty() {
            let _ = writeln!(out, "{indent}<{tag} class=\"{class_attr}\"></{tag}>", tag = self.tag);
        } else {
            let _ = writeln!(out, "{indent}<{tag} class=\"{class_attr}\">", tag = self.tag);
            for child in &self.children {
                child.write_html(out, depth + 1);
            }
            let _ = writeln!(out, "{indent}</{tag}>", tag = self.tag);
        }
    }
}

/// Wrap a rendered body in the page skeleton linking the style sheet.
#[must_use]
pub fn render_page(body: &str, css_filename: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Figma Export</title>
  <link rel="stylesheet" href="{css}">
</head>
<body>
{body}</body>
</html>
"#,
        css = escape_attribute(css_filename),
    )
}

/// Escape text content for HTML.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for double-quoted HTML attributes.
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_element_renders_on_one_line() {
        let node = MarkupNode::element(
            "div",
            "figma-rectangle",
            vec!["card".to_string()],
            Vec::new(),
        );
        assert_eq!(node.to_html(0), "<div class=\"figma-rectangle card\"></div>\n");
    }

    #[test]
    fn test_text_element_escapes_content() {
        let node = MarkupNode::text_element(
            "p",
            "figma-text",
            vec!["label".to_string()],
            "a < b & c".to_string(),
        );
        assert_eq!(
            node.to_html(0),
            "<p class=\"figma-text label\">a &lt; b &amp; c</p>\n"
        );
    }

    #[test]
    fn test_children_are_indented() {
        let child = MarkupNode::element("div", "figma-rectangle", Vec::new(), Vec::new());
        let parent = MarkupNode::element(
            "div",
            "figma-frame",
            vec!["wrapper".to_string()],
            vec![child],
        );

        assert_eq!(
            parent.to_html(0),
            "<div class=\"figma-frame wrapper\">\n  <div class=\"figma-rectangle\"></div>\n</div>\n"
        );
    }

    #[test]
    fn test_class_attribute_is_escaped() {
        let node = MarkupNode::element(
            "div",
            "figma-frame",
            vec!["a\"b".to_string()],
            Vec::new(),
        );
        assert!(node.to_html(0).contains("a&quot;b"));
    }

    #[test]
    fn test_page_skeleton_links_style_sheet() {
        let page = render_page("  <div class=\"figma-document\"></div>\n", "export-1.css");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<link rel=\"stylesheet\" href=\"export-1.css\">"));
        assert!(page.contains("<title>Figma Export</title>"));
        assert!(page.contains("<div class=\"figma-document\"></div>"));
        assert!(page.ends_with("</html>\n"));
    }
}
