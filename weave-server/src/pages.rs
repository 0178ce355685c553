//! Server-rendered pages: the input form, conversion results, and error
//! display.

use crate::routes::ConversionOutcome;

/// Escape text for HTML element content.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page_shell(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>figweave</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; color: #222; }}
    form {{ display: flex; flex-direction: column; gap: 0.75rem; max-width: 24rem; }}
    input {{ padding: 0.5rem; border: 1px solid #bbb; border-radius: 4px; }}
    button {{ padding: 0.5rem; border: 0; border-radius: 4px; background: #1a6b3c; color: white; cursor: pointer; }}
    pre {{ background: #f4f4f4; border: 1px solid #ddd; border-radius: 4px; padding: 1rem; overflow-x: auto; max-height: 24rem; }}
    .error {{ background: #fdecea; border: 1px solid #e0b4b4; border-radius: 4px; padding: 1rem; color: #8a1f11; }}
    .downloads a {{ margin-right: 1rem; }}
  </style>
</head>
<body>
  <h1>figweave</h1>
{body}</body>
</html>
"#
    )
}

/// The input form shown at the index route.
pub fn index_page() -> String {
    page_shell(
        r#"  <p>Convert a Figma file into static HTML and CSS.</p>
  <form method="post" action="/convert">
    <label for="token">Personal access token</label>
    <input id="token" name="token" type="password" placeholder="figd_...">
    <label for="file_key">File key</label>
    <input id="file_key" name="file_key" type="text" placeholder="From the file URL">
    <button type="submit">Convert</button>
  </form>
"#,
    )
}

/// Result page with download links and source previews.
pub fn results_page(outcome: &ConversionOutcome) -> String {
    let body = format!(
        r#"  <p><a href="/">&larr; Convert another file</a></p>
  <h2>Export ready</h2>
  <p class="downloads">
    <a href="/download/{html_file}" download>Download {html_file}</a>
    <a href="/download/{css_file}" download>Download {css_file}</a>
  </p>
  <p>Each file can be downloaded once; exports are removed after an hour.</p>
  <h3>HTML</h3>
  <pre><code>{html}</code></pre>
  <h3>CSS</h3>
  <pre><code>{css}</code></pre>
"#,
        html_file = escape_html(&outcome.pair.html_filename),
        css_file = escape_html(&outcome.pair.css_filename),
        html = escape_html(&outcome.html),
        css = escape_html(&outcome.css),
    );
    page_shell(&body)
}

/// Error page showing the upstream failure verbatim.
pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"  <p><a href="/">&larr; Back</a></p>
  <div class="error">{}</div>
"#,
        escape_html(message)
    );
    page_shell(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactPair;

    #[test]
    fn test_index_page_has_form_fields() {
        let page = index_page();
        assert!(page.contains("name=\"token\""));
        assert!(page.contains("name=\"file_key\""));
        assert!(page.contains("action=\"/convert\""));
    }

    #[test]
    fn test_error_page_shows_message_verbatim() {
        let page = error_page("Figma API error: 403 Forbidden - Invalid token");
        assert!(page.contains("Figma API error: 403 Forbidden - Invalid token"));
    }

    #[test]
    fn test_results_page_escapes_previews() {
        let outcome = ConversionOutcome {
            pair: ArtifactPair::generate(),
            html: "<div class=\"x\"></div>".to_string(),
            css: ".x { color: red; }".to_string(),
        };
        let page = results_page(&outcome);

        assert!(page.contains("&lt;div class=&quot;x&quot;&gt;"));
        assert!(page.contains(&format!("/download/{}", outcome.pair.html_filename)));
        assert!(page.contains(&format!("/download/{}", outcome.pair.css_filename)));
    }
}
