use axum::{
    extract::State,
    response::{Html, Json},
    Form,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::state::DashboardState;
use super::templates;
use crate::actions::MenuAction;
use crate::config::ProviderStatus;
use crate::logger::SessionMetrics;
use crate::menu::TITLE;

pub const QUIT_ACTION: &str = "quit";
pub const WEB_FAREWELL: &str = "Au revoir ! (Cette action ne ferme pas le serveur en mode démo)";
pub const UNKNOWN_ACTION: &str = "Action inconnue";

// ── GET / — page without a result ───────────────────────────────────

pub async fn index(State(state): State<Arc<DashboardState>>) -> Html<String> {
    let metrics = state.metrics.read().await;
    templates::render_index(&metrics, &state.api_keys.statuses(), None)
}

// ── POST / — run the posted action and show its output ──────────────

#[derive(Debug, Deserialize)]
pub struct ActionForm {
    #[serde(default)]
    pub action: String,
}

/// A POST without a form body is treated like an empty `action`.
pub async fn run_action(
    State(state): State<Arc<DashboardState>>,
    form: Option<Form<ActionForm>>,
) -> Html<String> {
    let action = form.map(|Form(form)| form.action).unwrap_or_default();
    if let Some(logger) = &state.logger {
        let _ = logger.log_web_action(&action);
    }

    let output = match MenuAction::from_name(&action) {
        Some(action) => {
            state.metrics.write().await.record(action);
            capture_output(action)
        }
        // Demo behaviour: the server keeps running.
        None if action == QUIT_ACTION => WEB_FAREWELL.to_string(),
        None => {
            state.metrics.write().await.record_invalid();
            UNKNOWN_ACTION.to_string()
        }
    };

    let metrics = state.metrics.read().await;
    templates::render_index(&metrics, &state.api_keys.statuses(), Some(&output))
}

/// Run `action` against an in-memory buffer; prefer what it printed, fall back
/// to its return value when it printed nothing.
pub fn capture_output(action: MenuAction) -> String {
    let mut buf = Vec::new();
    let result = action.run(&mut buf);
    let printed = String::from_utf8_lossy(&buf).trim().to_string();
    if printed.is_empty() {
        result
    } else {
        printed
    }
}

// ── GET /api/status — JSON summary ──────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub title: &'static str,
    pub actions: Vec<&'static str>,
    pub providers: Vec<ProviderStatus>,
    pub metrics: SessionMetrics,
}

pub async fn get_status(State(state): State<Arc<DashboardState>>) -> Json<StatusResponse> {
    let metrics = state.metrics.read().await.clone();
    Json(StatusResponse {
        title: TITLE,
        actions: MenuAction::ALL.iter().map(|a| a.name()).collect(),
        providers: state.api_keys.statuses(),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{IMAGE_MESSAGE, QUESTION_MESSAGE};
    use crate::config::{ApiKeys, AppConfig};

    fn state() -> Arc<DashboardState> {
        Arc::new(DashboardState::new(
            AppConfig::default(),
            ApiKeys::from_lookup(|var| (var == "KLING_API_KEY").then(|| "k-secret".to_string())),
            None,
        ))
    }

    fn form(action: &str) -> Option<Form<ActionForm>> {
        Some(Form(ActionForm {
            action: action.to_string(),
        }))
    }

    #[test]
    fn test_capture_output_uses_printed_line() {
        assert_eq!(capture_output(MenuAction::Question), QUESTION_MESSAGE);
    }

    #[tokio::test]
    async fn test_index_has_no_result_block() {
        let Html(body) = index(State(state())).await;
        assert!(body.contains("DREAM.AI MENU"));
        assert!(!body.contains("<pre"));
    }

    #[tokio::test]
    async fn test_post_image_shows_message() {
        let state = state();
        let Html(body) = run_action(State(state.clone()), form("image")).await;
        assert!(body.contains(&format!("<pre>{}</pre>", IMAGE_MESSAGE)));
        assert_eq!(state.metrics.read().await.image, 1);
    }

    #[tokio::test]
    async fn test_post_quit_is_inert() {
        let state = state();
        let Html(body) = run_action(State(state.clone()), form("quit")).await;
        assert!(body.contains(WEB_FAREWELL));
        assert_eq!(state.metrics.read().await.total_actions(), 0);
        assert_eq!(state.metrics.read().await.invalid_choices, 0);
    }

    #[tokio::test]
    async fn test_post_unknown_action() {
        for action in ["", "Image", "delete", "1"] {
            let Html(body) = run_action(State(state()), form(action)).await;
            assert!(body.contains(UNKNOWN_ACTION), "action {action:?}");
        }
    }

    #[tokio::test]
    async fn test_post_without_form_body() {
        let state = state();
        let Html(body) = run_action(State(state.clone()), None).await;
        assert!(body.contains(&format!("<pre>{}</pre>", UNKNOWN_ACTION)));
        assert_eq!(state.metrics.read().await.invalid_choices, 1);
    }

    #[tokio::test]
    async fn test_page_never_shows_keys() {
        let Html(body) = index(State(state())).await;
        assert!(!body.contains("k-secret"));
        assert!(body.contains("kling"));
    }

    #[tokio::test]
    async fn test_status_reports_counters() {
        let state = state();
        let _ = run_action(State(state.clone()), form("video")).await;
        let _ = run_action(State(state.clone()), form("nope")).await;
        let Json(status) = get_status(State(state)).await;
        assert_eq!(status.title, TITLE);
        assert_eq!(status.actions, ["image", "video", "transcription", "question"]);
        assert_eq!(status.metrics.video, 1);
        assert_eq!(status.metrics.invalid_choices, 1);
        assert_eq!(status.providers.len(), 6);
        assert!(status.providers.iter().any(|p| p.name == "kling" && p.configured));
    }
}
