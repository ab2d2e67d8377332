//! Server-rendered page: input tab, output tab, and the article view.
//! Everything is drawn from a borrowed [`SessionState`].

use edugen_core::{Document, SessionState, Tab, SUGGESTED_TOPICS};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #eef2ff; color: #1e293b; }
header, footer { padding: 1rem 2rem; }
header { background: #fff; border-bottom: 1px solid #e2e8f0; font-weight: 700; font-size: 1.25rem; }
footer { background: #1e293b; color: #94a3b8; text-align: center; margin-top: 4rem; }
main { max-width: 56rem; margin: 2rem auto; }
.tabs { display: flex; justify-content: center; gap: .25rem; margin-bottom: 1.5rem; }
.tabs button { padding: .75rem 1.5rem; border: 0; border-radius: .5rem; background: #fff; cursor: pointer; }
.tabs button.active { background: #2563eb; color: #fff; }
.panel { background: #fff; border-radius: 1rem; padding: 2rem; box-shadow: 0 10px 25px rgba(0,0,0,.08); }
label { display: block; font-weight: 600; margin: 1rem 0 .5rem; }
input[type=text], textarea { width: 100%; padding: .75rem; border: 1px solid #cbd5e1; border-radius: .75rem; box-sizing: border-box; }
.suggestions { display: flex; flex-wrap: wrap; gap: .5rem; }
.suggestions button { background: #f1f5f9; border: 0; border-radius: .5rem; padding: .5rem .75rem; cursor: pointer; }
.primary { width: 100%; margin-top: 1.5rem; padding: 1rem; border: 0; border-radius: .75rem; background: #4f46e5; color: #fff; font-weight: 600; }
.primary:disabled { opacity: .5; cursor: not-allowed; }
.notice { background: #fef3c7; padding: .75rem 1rem; border-radius: .5rem; margin-bottom: 1rem; }
.spinner { width: 3rem; height: 3rem; border: 3px solid #cbd5e1; border-bottom-color: #2563eb; border-radius: 50%; margin: 0 auto 1rem; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.section { background: #f8fafc; border-radius: .75rem; padding: 1.5rem; margin-bottom: 1.5rem; }
.points { background: #fff; border-radius: .5rem; padding: 1rem; }
.actions { display: flex; gap: .5rem; }
.actions a { padding: .5rem 1rem; border-radius: .5rem; color: #fff; text-decoration: none; }
.center { text-align: center; padding: 3rem 0; }
"#;

/// Full page for the current session. `notice` is shown above the active panel.
pub fn render_page(app_name: &str, state: &SessionState, notice: Option<&str>) -> String {
    let refresh = if state.is_busy() {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };
    let notice_html = notice
        .map(|n| format!(r#"<div class="notice">{}</div>"#, html_escape(n)))
        .unwrap_or_default();
    let panel = match state.tab() {
        Tab::Input => render_input_panel(state),
        Tab::Output => render_output_panel(state),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{name}</title>
<style>{STYLE}</style>
</head>
<body>
<header>{name}</header>
<main>
{tabs}
{notice_html}
{panel}
</main>
<footer>{name}: structured educational content</footer>
</body>
</html>"#,
        name = html_escape(app_name),
        tabs = render_tabs(state),
    )
}

fn render_tabs(state: &SessionState) -> String {
    let class = |tab: Tab| if state.tab() == tab { "active" } else { "" };
    let output_disabled = if state.output_available() { "" } else { " disabled" };
    // On the input tab the buttons submit the generate form so unsaved field
    // text travels with them; elsewhere the saved values are carried along.
    let (open, attrs, close) = match state.tab() {
        Tab::Input => (
            r#"<div class="tabs">"#.to_string(),
            r#" form="generate" formaction="/tab" formnovalidate"#,
            "</div>",
        ),
        Tab::Output => (
            format!(
                r#"<form class="tabs" method="post" action="/tab"><input type="hidden" name="topic" value="{}"><input type="hidden" name="keywords" value="{}">"#,
                html_escape(state.topic()),
                html_escape(state.keywords())
            ),
            "",
            "</form>",
        ),
    };
    format!(
        r#"{open}
<button type="submit" name="tab" value="input" class="{}"{attrs}>Input &amp; Generate</button>
<button type="submit" name="tab" value="output" class="{}"{attrs}{}>Generated Article</button>
{close}"#,
        class(Tab::Input),
        class(Tab::Output),
        output_disabled
    )
}

fn render_input_panel(state: &SessionState) -> String {
    let suggestions: String = SUGGESTED_TOPICS
        .iter()
        .map(|t| {
            format!(
                r#"<button type="submit" form="generate" formaction="/suggest" formnovalidate name="suggestion" value="{0}">{0}</button>"#,
                html_escape(t)
            )
        })
        .collect();

    let disabled = if state.is_busy() { " disabled" } else { "" };
    let label = if state.is_busy() {
        "Generating Article..."
    } else {
        "Generate Educational Article"
    };

    format!(
        r#"<section class="panel">
<h2>Create Your Educational Article</h2>
<form id="generate" method="post" action="/generate"></form>
<label for="topic">Main Topic or Subject Area</label>
<input id="topic" type="text" name="topic" form="generate" value="{topic}" required pattern=".*\S.*" placeholder="e.g., Machine Learning, Web Development, Digital Marketing...">
<label>Popular Topics</label>
<div class="suggestions">{suggestions}</div>
<label for="keywords">Keywords &amp; Focus Areas (Optional)</label>
<textarea id="keywords" name="keywords" form="generate" rows="3" placeholder="Add specific keywords, subtopics, or areas you want to emphasize...">{keywords}</textarea>
<button class="primary" type="submit" form="generate"{disabled}>{label}</button>
<form method="post" action="/reset"><button type="submit">Reset</button></form>
</section>"#,
        topic = html_escape(state.topic()),
        keywords = html_escape(state.keywords()),
    )
}

fn render_output_panel(state: &SessionState) -> String {
    if state.is_busy() {
        return r#"<section class="panel center">
<div class="spinner"></div>
<h3>Creating Your Article</h3>
<p>This may take a few moments...</p>
<form method="post" action="/cancel"><button type="submit">Cancel</button></form>
</section>"#
            .to_string();
    }
    match state.document() {
        Some(doc) => render_article(doc),
        None => r#"<section class="panel center">
<h3>No Article Generated Yet</h3>
<p>Switch to the Input tab to create your first article.</p>
</section>"#
            .to_string(),
    }
}

/// Article view: header with export links, introduction, numbered sections, conclusion, references.
pub fn render_article(doc: &Document) -> String {
    let mut sections = String::new();
    for (i, s) in doc.sections.iter().enumerate() {
        let points = s
            .examples
            .as_ref()
            .map(|items| {
                let lis: String = items
                    .iter()
                    .map(|p| format!("<li>{}</li>", html_escape(p)))
                    .collect();
                format!(r#"<div class="points"><h4>Key Points:</h4><ul>{}</ul></div>"#, lis)
            })
            .unwrap_or_default();
        sections.push_str(&format!(
            r#"<div class="section"><h2>{}. {}</h2><p>{}</p>{}</div>"#,
            i + 1,
            html_escape(&s.title),
            html_escape(&s.content),
            points
        ));
    }
    let references: String = doc
        .references
        .iter()
        .map(|r| format!("<li>{}</li>", html_escape(r)))
        .collect();

    format!(
        r#"<article class="panel">
<div class="actions" style="justify-content: space-between; align-items: start;">
<h1>{title}</h1>
<div class="actions">
<a href="/api/v1/article/export?format=pdf" style="background: #059669;">PDF</a>
<a href="/api/v1/article/export?format=markdown" style="background: #2563eb;">Export</a>
</div>
</div>
<h2>Introduction</h2>
<p>{intro}</p>
{sections}
<h2>Conclusion</h2>
<p>{conclusion}</p>
<div class="section"><h2>References &amp; Further Reading</h2><ul>{references}</ul></div>
</article>"#,
        title = html_escape(&doc.title),
        intro = html_escape(&doc.introduction),
        conclusion = html_escape(&doc.conclusion),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
