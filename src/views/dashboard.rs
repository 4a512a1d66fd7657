use askama::Template;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use super::html;
use crate::auth::extractor::AdminSession;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct DashboardTemplate {
    notice: Option<Notice>,
    projects: Vec<ProjectRow>,
}

struct ProjectRow {
    id: String,
    website_name: String,
    product_title: String,
    price: String,
    template_name: String,
    updated_at: String,
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub notice: Option<String>,
}

struct Notice {
    message: &'static str,
    is_error: bool,
}

/// Flash messages are passed through the redirect as a short code.
fn notice_for(code: &str) -> Option<Notice> {
    let (message, is_error) = match code {
        "created" => ("Project created successfully.", false),
        "saved" => ("Project updated successfully.", false),
        "deleted" => ("Project deleted.", false),
        "render-failed" => ("Could not generate the page: its template no longer exists.", true),
        "not-found" => ("Project not found.", true),
        _ => return None,
    };
    Some(Notice { message, is_error })
}

pub async fn index(
    _session: AdminSession,
    State(state): State<SharedState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let projects = state.projects.list_all().await?;

    let rows = projects
        .into_iter()
        .map(|p| {
            let template_name = state
                .templates
                .get(&p.template)
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| format!("{} (missing)", p.template));
            ProjectRow {
                id: p.id,
                website_name: p.website_name,
                product_title: p.product_title,
                price: p.price,
                template_name,
                updated_at: p.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            }
        })
        .collect();

    let template = DashboardTemplate {
        notice: query.notice.as_deref().and_then(notice_for),
        projects: rows,
    };
    html(&template)
}
