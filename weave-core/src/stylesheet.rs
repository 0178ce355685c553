//! Style sheet serialization.
//!
//! Flattens the generator's category buckets into one style sheet: font
//! imports first, then one rule block per class in the fixed category
//! order, then the trailing reset block.

use std::fmt::Write as _;

use crate::generator::{CssGenerator, Declaration};

/// Reset appended after all generated rules.
const RESET_BLOCK: &str = "* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  margin: 0;
  padding: 0;
}

p {
  margin: 0;
  padding: 0;
}
";

/// Serialize every recorded style rule into style sheet text.
///
/// Categories appear in their fixed enumeration order, classes in
/// insertion order within each category. One `@import` per distinct font
/// family referenced by any typography declaration precedes the rules, in
/// encounter order; the fixed reset block follows them.
#[must_use]
pub fn render_stylesheet(generator: &CssGenerator) -> String {
    let mut content = String::new();
    let mut fonts: Vec<String> = Vec::new();

    for (property, bucket) in generator.styles().iter() {
        for (class, declaration) in bucket.iter() {
            match declaration {
                Declaration::Value(value) => {
                    let _ = write!(content, ".{class} {{\n  {property}: {value};\n}}\n\n");
                }
                Declaration::Block(block) => {
                    let _ = write!(content, ".{class} {{\n");
                    for (name, value) in block {
                        let _ = writeln!(content, "  {name}: {value};");
                        if *name == "font-family" && !fonts.contains(value) {
                            fonts.push(value.clone());
                        }
                    }
                    let _ = write!(content, "}}\n\n");
                }
            }
        }
    }

    let imports = fonts
        .iter()
        .map(|family| font_import(family))
        .collect::<Vec<_>>()
        .join("\n");

    if imports.is_empty() {
        format!("{content}\n{RESET_BLOCK}")
    } else {
        format!("{imports}\n\n{content}\n{RESET_BLOCK}")
    }
}

/// A Google Fonts import requesting the full 100-900 weight range.
fn font_import(family: &str) -> String {
    format!(
        "@import url('https://fonts.googleapis.com/css2?family={}:wght@100;200;300;400;500;600;700;800;900&display=swap');",
        escape_family(family)
    )
}

/// URL-escape a font family name: every whitespace run becomes one `+`.
fn escape_family(family: &str) -> String {
    let mut out = String::with_capacity(family.len());
    let mut in_whitespace = false;
    for ch in family.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('+');
                in_whitespace = true;
            }
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}
