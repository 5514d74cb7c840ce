//! HTTP request dispatch.
//!
//! A thin axum router over the registry:
//!
//! - `GET /` — the rendered index
//! - `GET /projects/{slug}` — one project's detail page; a trailing `.html`
//!   is stripped so the exported-site URLs work against the live server too
//! - `GET /static/*` — the asset directory, prefix-stripped
//!
//! Handlers only read registry snapshots, so serving never contends with a
//! reload. A missing project is a 404 with a rendered body — per-request
//! problems are logged and answered, never allowed to take the process down.

use crate::registry::ProjectRegistry;
use crate::render::{RenderContext, render};
use axum::Router;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProjectRegistry>,
}

/// Build the application router.
pub fn router(registry: Arc<ProjectRegistry>, asset_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/projects/{slug}", get(project_page))
        .nest_service("/static", ServeDir::new(asset_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { registry })
}

/// Bind and serve until the process is stopped.
pub async fn serve(
    addr: SocketAddr,
    registry: Arc<ProjectRegistry>,
    asset_dir: PathBuf,
) -> std::io::Result<()> {
    let app = router(registry, asset_dir);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await
}

async fn index_page(State(state): State<AppState>) -> Html<String> {
    let projects = state.registry.snapshot();
    Html(
        render(&RenderContext::Index {
            projects: &projects,
        })
        .into_string(),
    )
}

async fn project_page(
    State(state): State<AppState>,
    UrlPath(slug): UrlPath<String>,
) -> (StatusCode, Html<String>) {
    // one normalization rule: lookup key is the exact title, minus any
    // trailing .html the exported site's links carry
    let key = slug.strip_suffix(".html").unwrap_or(&slug);

    match state.registry.find_by_slug(key) {
        Some(project) => (
            StatusCode::OK,
            Html(render(&RenderContext::Project { project: &project }).into_string()),
        ),
        None => {
            warn!(slug = %key, "project not found");
            (
                StatusCode::NOT_FOUND,
                Html(render(&RenderContext::NotFound { slug: key }).into_string()),
            )
        }
    }
}
