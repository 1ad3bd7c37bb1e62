//! Live server: renders the page per request and backs the interactive
//! publication filter and theme toggle.

use anyhow::{Context, Result};
use axum::{
    extract::{Json, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::data::{DataSource, Fetcher, PublicationSet};
use crate::environment::SiteConfig;
use crate::page::{bootstrap, BootstrapOptions, Document};
use crate::render::markup::to_html;
use crate::render::publications::{PublicationBoard, Selection, ALL_FILTER};
use crate::render::{patches_for, Mount};
use crate::theme::{self, CookieThemeStore, SystemPreference, Theme, ToggleControl};
use crate::TARGET_WEB_REQUEST;

/// Client hint carrying the browser's color scheme.
const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub template: Arc<String>,
}

/// Error returned by handlers, rendered as a plain text body.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn new(status: StatusCode, err: impl std::fmt::Display) -> Self {
        AppError {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(target: TARGET_WEB_REQUEST, "{}: {}", self.status, self.message);
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    year: Option<String>,
    /// `data-year-type` of the clicked button.
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Markup for both publication containers after a filter change.
#[derive(Debug, Serialize)]
pub struct PublicationFragments {
    filters: String,
    list: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    current: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    theme: Theme,
    #[serde(flatten)]
    control: ToggleControl,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/fragments/publications", get(publication_fragments))
        .route("/theme/toggle", post(toggle_theme))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Bind to `0.0.0.0:<port>` and serve until the process is stopped.
pub async fn serve(config: &SiteConfig) -> Result<()> {
    let source = DataSource::parse(&config.data)?;
    let fetcher = Fetcher::new(source)?;
    let template = tokio::fs::read_to_string(&config.template)
        .await
        .with_context(|| format!("Failed to read template {}", config.template.display()))?;

    let app = router(AppState {
        fetcher,
        template: Arc::new(template),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> impl IntoResponse {
    let system = headers
        .get(PREFERS_COLOR_SCHEME)
        .and_then(|value| value.to_str().ok())
        .map(SystemPreference::parse)
        .unwrap_or_default();
    let store = CookieThemeStore::new(jar);
    let theme = theme::resolve_initial(&store, system);

    let mut document = Document::new(state.template.as_str());
    let options = BootstrapOptions { theme, live: true };
    let report = bootstrap(&mut document, &state.fetcher, &options).await;
    debug!(
        target: TARGET_WEB_REQUEST,
        "GET / theme={} rendered={:?} failed={:?}",
        theme,
        report.rendered,
        report.failed
    );

    (
        [
            ("accept-ch", "Sec-CH-Prefers-Color-Scheme"),
            ("vary", "Sec-CH-Prefers-Color-Scheme, Cookie"),
        ],
        Html(document.into_html()),
    )
}

async fn publication_fragments(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<PublicationFragments>, AppError> {
    let label = query.year.unwrap_or_else(|| ALL_FILTER.to_string());
    let set: PublicationSet = state
        .fetcher
        .fetch_document("publications.json")
        .await
        .map_err(|err| AppError::new(StatusCode::BAD_GATEWAY, err))?;

    let mut board = PublicationBoard::new(set.normalize());
    let patches = board.set_filter(Selection::parse(&label, query.kind.as_deref()));
    let html_for = |mount| {
        patches_for(&patches, mount)
            .first()
            .map(|patch| to_html(patch.nodes()))
            .unwrap_or_default()
    };
    debug!(
        target: TARGET_WEB_REQUEST,
        "GET /fragments/publications year={} visible={}",
        label,
        board.visible().len()
    );

    Ok(Json(PublicationFragments {
        filters: html_for(Mount::PublicationsFilters),
        list: html_for(Mount::PublicationsList),
    }))
}

async fn toggle_theme(
    jar: CookieJar,
    Json(request): Json<ToggleRequest>,
) -> Result<(CookieJar, Json<ThemeResponse>), AppError> {
    let current = request.current.and_then(|value| value.parse().ok());
    let mut store = CookieThemeStore::new(jar);
    let next = theme::toggle(current, &mut store)
        .map_err(|err| AppError::new(StatusCode::INTERNAL_SERVER_ERROR, err))?;
    debug!(target: TARGET_WEB_REQUEST, "POST /theme/toggle -> {}", next);

    Ok((
        store.into_jar(),
        Json(ThemeResponse {
            theme: next,
            control: ToggleControl::for_theme(next),
        }),
    ))
}

async fn healthz() -> &'static str {
    "ok"
}
