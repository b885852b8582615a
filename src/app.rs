use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::error::GalleryError;
use crate::fetch::ImageFetcher;
use crate::layout::{Policy, RenderPlan};
use crate::render::{RenderedGrid, render_pass};
use crate::selection::{parse_row_numbers, select_rows};
use crate::session::{SESSION_COOKIE, SessionStore};
use crate::table::Table;

const PAGE_TITLE: &str = "Image Display from Excel";
const GALLERY_TEMPLATE: &str = "gallery";

pub struct AppState {
    sessions: SessionStore,
    fetcher: ImageFetcher,
    templates: Handlebars<'static>,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let fetcher = ImageFetcher::new(&config.fetch)?;

        let mut templates = Handlebars::new();
        templates
            .register_template_string(GALLERY_TEMPLATE, include_str!("./static/gallery.hbs"))?;

        Ok(Self {
            sessions: SessionStore::with_ttl(config.session_ttl),
            fetcher,
            templates,
            config,
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

#[derive(Deserialize)]
struct GalleryQuery {
    rows: Option<String>,
}

/// Everything the gallery template needs for one page load.
#[derive(Serialize, Default)]
struct GalleryPage {
    title: &'static str,
    file_name: Option<String>,
    row_count: Option<usize>,
    rows_input: String,
    policy: Option<&'static str>,
    error: Option<String>,
    image_errors: Vec<String>,
    grid: Option<RenderedGrid>,
}

/// Build the router with all gallery routes.
pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.upload_limit;

    Router::new()
        .route("/", get(serve_gallery))
        .route("/upload", post(upload_workbook))
        .route("/thumbnail/:index", get(serve_thumbnail))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    // Start server
    let listener = TcpListener::bind(bind_addr).await?;
    log::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

/// Re-run the whole page from the session's table and the current row input.
async fn serve_gallery(
    Query(params): Query<GalleryQuery>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Response {
    let (id, handle) = state
        .sessions
        .get_or_create(jar.get(SESSION_COOKIE).map(|c| c.value()));
    let mut session = handle.lock().await;

    let rows_input = params.rows.unwrap_or_default();
    let mut page = GalleryPage {
        title: PAGE_TITLE,
        file_name: session.file_name.clone(),
        rows_input: rows_input.clone(),
        error: session.upload_error.clone(),
        ..GalleryPage::default()
    };

    // Split the borrow so the cache can be mutated while the table is read
    let session = &mut *session;
    if let Some(table) = session.table.as_ref() {
        page.row_count = Some(table.len());

        let policy = if rows_input.trim().is_empty() {
            Some(Policy::Sequential)
        } else {
            match parse_row_numbers(&rows_input) {
                Ok(numbers) => Some(Policy::RowSelection(select_rows(&numbers, table.len()))),
                Err(e) => {
                    log::info!("Rejected row input '{}': {}", rows_input, e);
                    page.error = Some(e.to_string());
                    None
                }
            }
        };

        if let Some(policy) = policy {
            page.policy = Some(match policy {
                Policy::Sequential => "sequential",
                Policy::RowSelection(_) => "rows",
            });

            let plan = RenderPlan::build(&policy, table.len());
            let grid = render_pass(
                table,
                &plan,
                &state.fetcher,
                &mut session.cache,
                state.config.thumbnail_size,
            )
            .await;

            page.image_errors = grid.errors().into_iter().map(str::to_string).collect();
            page.grid = Some(grid);
        }
    }

    match state.templates.render(GALLERY_TEMPLATE, &page) {
        Ok(html) => (jar.add(session_cookie(id)), Html(html)).into_response(),
        Err(e) => {
            log::error!("Failed to render gallery page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// Accept one `.xlsx` upload in the `file` field and make it the session's
/// table.
async fn upload_workbook(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    multipart: Multipart,
) -> impl IntoResponse {
    let (id, handle) = state
        .sessions
        .get_or_create(jar.get(SESSION_COOKIE).map(|c| c.value()));

    let (file_name, outcome) = read_upload(multipart).await;
    let mut session = handle.lock().await;

    match outcome {
        Ok(table) => {
            let file_name = file_name.unwrap_or_else(|| "upload.xlsx".to_string());
            log::info!("Loaded '{}' with {} rows", file_name, table.len());
            session.load_table(file_name, table);
        }
        Err(e) => {
            log::warn!("Rejected upload {:?}: {}", file_name, e);
            session.reject_upload(file_name, e.to_string());
        }
    }

    (jar.add(session_cookie(id)), Redirect::to("/"))
}

async fn read_upload(mut multipart: Multipart) -> (Option<String>, Result<Table, GalleryError>) {
    let mut file_name = None;
    let mut file_data = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return (file_name, Err(GalleryError::Upload(e.to_string()))),
        };

        if field.name() != Some("file") {
            continue;
        }

        file_name = field.file_name().map(str::to_string);
        match field.bytes().await {
            Ok(bytes) => file_data = bytes.to_vec(),
            Err(e) => return (file_name, Err(GalleryError::Upload(e.to_string()))),
        }
    }

    if file_data.is_empty() {
        return (
            file_name,
            Err(GalleryError::Upload("No file data received".to_string())),
        );
    }

    if let Some(name) = &file_name {
        if !name.to_lowercase().ends_with(".xlsx") {
            return (
                file_name.clone(),
                Err(GalleryError::UnsupportedFile(name.clone())),
            );
        }
    }

    let outcome = Table::from_xlsx_bytes(&file_data);
    (file_name, outcome)
}

/// Serve the cached thumbnail for table row `index`.
async fn serve_thumbnail(
    Path(index): Path<usize>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Response {
    let Some(handle) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| state.sessions.get(c.value()))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let session = handle.lock().await;

    let thumbnail = session
        .table
        .as_ref()
        .and_then(|table| table.link(index))
        .and_then(|url| session.cache.get(url))
        .and_then(|entry| entry.as_ref().ok());

    match thumbnail {
        Some(thumb) => (
            [(header::CONTENT_TYPE, "image/png")],
            thumb.png.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
