use askama::Template;

use crate::actions::MenuAction;
use crate::config::ProviderStatus;
use crate::logger::SessionMetrics;
use crate::menu::TITLE;

/// One button on the page with its counter.
pub struct ActionView {
    pub name: &'static str,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub actions: &'a [ActionView],
    pub invalid_choices: usize,
    pub providers: &'a [ProviderStatus],
    pub output: Option<&'a str>,
}

pub fn render_index(
    metrics: &SessionMetrics,
    providers: &[ProviderStatus],
    output: Option<&str>,
) -> axum::response::Html<String> {
    let actions: Vec<ActionView> = MenuAction::ALL
        .iter()
        .map(|a| ActionView {
            name: a.name(),
            label: a.label(),
            count: metrics.count(*a),
        })
        .collect();
    let template = IndexTemplate {
        title: TITLE,
        actions: &actions,
        invalid_choices: metrics.invalid_choices,
        providers,
        output,
    };
    axum::response::Html(template.render().unwrap_or_else(|e| {
        let msg = e
            .to_string()
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        format!("<h1>Template error: {}</h1>", msg)
    }))
}
