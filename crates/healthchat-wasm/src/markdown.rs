use healthchat_types::{Role, Turn};
use pulldown_cmark::{html, Options, Parser};

/// Render markdown to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    // Raw HTML in model output is shown as text, never injected
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        pulldown_cmark::Event::Html(raw) | pulldown_cmark::Event::InlineHtml(raw) => {
            pulldown_cmark::Event::Text(raw)
        }
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Render a turn's body: assistant text is markdown, user text is literal
pub fn render_turn_content(turn: &Turn) -> String {
    match turn.role {
        Role::Assistant => render_markdown(&turn.content),
        Role::User | Role::System => crate::utils::escape_html(&turn.content).replace('\n', "<br>"),
    }
}
