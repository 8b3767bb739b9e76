use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::middleware::AuthenticatedUser;
use crate::catalog::{self, Category, CATEGORY_REGISTRY};
use crate::AppState;

/// User-entered tool metadata from the suggestion form. Exists only for the
/// duration of one compose call.
#[derive(Debug, Deserialize)]
pub struct ToolSuggestion {
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// The pre-filled "new issue" link produced for a suggestion. Opening it is
/// the caller's navigation side effect; nothing is created via the API.
#[derive(Debug, Serialize)]
pub struct ComposedIssue {
    pub url: String,
}

/// Strip the leading emoji token from a category name, leaving the bare
/// issue label: "🧰 System & Administration" -> "System & Administration".
fn bare_label(category: &str) -> &str {
    match category.split_once(' ') {
        Some((_, rest)) => rest.trim(),
        None => category.trim(),
    }
}

fn compose_title(suggestion: &ToolSuggestion) -> String {
    let name = if suggestion.name.is_empty() {
        "New Tool"
    } else {
        suggestion.name.as_str()
    };
    format!("Tool Suggestion: {name}")
}

fn compose_body(suggestion: &ToolSuggestion) -> String {
    let name = if suggestion.name.is_empty() {
        "N/A"
    } else {
        suggestion.name.as_str()
    };
    let url = if suggestion.url.is_empty() {
        "N/A"
    } else {
        suggestion.url.as_str()
    };
    let description = if suggestion.description.is_empty() {
        "No description provided."
    } else {
        suggestion.description.as_str()
    };
    let categories = if suggestion.categories.is_empty() {
        "N/A".to_string()
    } else {
        suggestion
            .categories
            .iter()
            .map(|c| format!("- {}", bare_label(c)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "**Tool Name:** {name}\n**GitHub URL:** {url}\n**Description:**\n{description}\n\n**Categories:**\n{categories}"
    )
}

/// Render a suggestion into a pre-filled "new issue" URL for `repo_path`.
/// Pure: identical input always yields an identical URL.
pub fn compose_issue(suggestion: &ToolSuggestion, repo_path: &str) -> ComposedIssue {
    let title = compose_title(suggestion);
    let body = compose_body(suggestion);
    let labels: Vec<String> = suggestion
        .categories
        .iter()
        .map(|c| urlencoding::encode(bare_label(c)).into_owned())
        .collect();

    let mut url = format!(
        "https://github.com/{repo_path}/issues/new?title={}&body={}",
        urlencoding::encode(&title),
        urlencoding::encode(&body),
    );
    if !labels.is_empty() {
        url.push_str("&labels=");
        url.push_str(&labels.join(","));
    }

    ComposedIssue { url }
}

/// GET /api/categories. The static category catalog for the suggestion form.
pub async fn list_categories() -> Json<&'static Vec<Category>> {
    Json(&*CATEGORY_REGISTRY)
}

/// POST /api/suggest. Gated behind a verified session. Validates the
/// category selection against the catalog and returns the issue URL the
/// client should open.
pub async fn suggest_tool(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(suggestion): Json<ToolSuggestion>,
) -> impl IntoResponse {
    if let Some(unknown) = suggestion
        .categories
        .iter()
        .find(|c| !catalog::is_known_category(c))
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": format!("Unknown category: {unknown}") })),
        )
            .into_response();
    }

    let issue = compose_issue(&suggestion, &state.config.suggestions_repo);
    info!(
        "Composed suggestion issue for '{}' by {}",
        suggestion.name, user.profile.sub
    );
    (StatusCode::OK, Json(issue)).into_response()
}
