//! HTTP server for the pages, the highlight stylesheet, and static assets

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::PipelineError;
use crate::helpers::html_escape;
use crate::page::{Heading, Page, PageMetadata, Section, HIGHLIGHT_STYLESHEET};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
    highlight_css: String,
}

/// Build the router
pub fn router(folio: Folio) -> Result<Router> {
    let highlight_css = folio.highlight_css()?;
    let state = Arc::new(ServerState {
        folio,
        highlight_css,
    });

    Ok(Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route("/posts/:slug", get(post_handler))
        .route(HIGHLIGHT_STYLESHEET, get(stylesheet_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(folio.clone())?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    page_response(&state, StatusCode::OK, &state.folio.home_page())
}

async fn about_handler(State(state): State<Arc<ServerState>>) -> Response {
    page_response(&state, StatusCode::OK, &state.folio.about_page())
}

/// Render one post; the fetch is cancelled if the client goes away
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.folio.render_post(&slug).await {
        Ok(page) => page_response(&state, StatusCode::OK, &page),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!("Failed to render {}: {}", slug, e);
            } else {
                tracing::info!("{}", e);
            }
            page_response(&state, status, &error_page(&state.folio, status, &e))
        }
    }
}

async fn stylesheet_handler(State(state): State<Arc<ServerState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        state.highlight_css.clone(),
    )
        .into_response()
}

/// Serve static files from the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.folio.public_dir);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Failed to serve static file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn page_response(state: &ServerState, status: StatusCode, page: &Page) -> Response {
    (status, Html(page.to_html(&state.folio.config.language))).into_response()
}

/// HTTP status for a failed render
pub fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::NotFound { .. } => StatusCode::NOT_FOUND,
        PipelineError::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PipelineError::Parse { .. } | PipelineError::UnresolvedComponent { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_page(folio: &Folio, status: StatusCode, error: &PipelineError) -> Page {
    let reason = status.canonical_reason().unwrap_or("Error");
    let message = match error {
        PipelineError::NotFound { .. } => "This post could not be found.",
        PipelineError::SourceUnavailable(_) => {
            "Posts are temporarily unavailable. Please try again later."
        }
        _ => "This post could not be rendered.",
    };

    let mut page = Page::new(
        PageMetadata {
            title: format!("{} - {}", reason, folio.config.author),
            description: message.to_string(),
        },
        "error",
    );
    page.heading = Some(Heading {
        text: format!("{} {}", status.as_u16(), reason),
        class: String::new(),
    });
    page.sections
        .push(Section::Markup(format!("<p>{}</p>", html_escape(message))));
    page
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
