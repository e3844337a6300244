use pulldown_cmark::{Parser, html};

/// Static page shell. `style.css` and `script.js` live next to the page
/// and are referenced by relative path only; the build never fetches or
/// generates them.
const SHELL: &str = r#"<!doctype html><html lang="en">
<head><meta charset="utf-8"><link rel="stylesheet" href="style.css"></head>
<script defer src="script.js"></script>
<body>__BODY__</body></html>
"#;

/// Render the Markdown report to HTML and wrap it in the page shell.
///
/// The `<time>` tags produced by the pipeline are inline HTML and pass
/// through the Markdown renderer untouched.
pub fn render_page(markdown: &str) -> String {
    let mut body = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut body, Parser::new(markdown));
    SHELL.replace("__BODY__", &body)
}
