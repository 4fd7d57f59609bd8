//! HTML rendering for the configuration editor.

use common::models::AgentConfig;

/// Renders the editor page for `config`.
pub fn render_page(config: &AgentConfig) -> String {
    let samples = serde_json::to_string_pretty(&config.samples).unwrap_or_else(|_| "[]".into());
    let rows: String = config
        .samples
        .iter()
        .map(|s| {
            format!(
                "      <tr><td>{}</td><td><code>{}</code></td></tr>\n",
                escape_html(&s.question),
                escape_html(&s.sql)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Agent configuration</title>
</head>
<body>
  <h1>Agent configuration</h1>
  <form method="post" action="/update">
    <label for="instructions">Instructions</label><br>
    <textarea id="instructions" name="instructions" rows="6" cols="80">{instructions}</textarea><br>
    <label for="samples">Samples (JSON array of {{"question", "sql"}})</label><br>
    <textarea id="samples" name="samples" rows="16" cols="80">{samples}</textarea><br>
    <button type="submit">Save</button>
  </form>
  <h2>Current samples ({count})</h2>
  <table>
    <thead><tr><th>Question</th><th>SQL</th></tr></thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#,
        instructions = escape_html(&config.instructions),
        samples = escape_html(&samples),
        count = config.samples.len(),
        rows = rows,
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
