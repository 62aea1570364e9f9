//! Flipink Video Render Server
//!
//! Turns the editor's exported stills into an MP4 with ffmpeg.
//!
//! ## Protocol
//!
//! ```json
//! POST /render-video
//! { "frames": ["data:image/png;base64,...", "..."], "fps": 10 }
//! ```
//!
//! Answers with the video as `my-animation.mp4`, `400` for an empty or
//! undecodable frame list, and `500` when ffmpeg fails.

mod config;
mod job;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use config::ServerConfig;
use flipink_core::export::RenderVideoBody;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

const VIDEO_FILENAME: &str = "my-animation.mp4";

/// Shared server state
struct AppState {
    config: ServerConfig,
}

fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit;
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/render-video", post(render_video))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flipink_server=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    tokio::fs::create_dir_all(&config.temp_dir).await?;

    let listener = tokio::net::TcpListener::bind(config.bind.as_str()).await?;
    info!("Flipink render server listening on {}", listener.local_addr()?);
    info!("Job directories under {}", config.temp_dir.display());

    let app = build_router(Arc::new(AppState { config }));
    axum::serve(listener, app).await
}

/// Index page
async fn index() -> &'static str {
    "Flipink Render Server - POST frames to /render-video"
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Encode the posted frames into an MP4 download.
async fn render_video(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RenderVideoBody>,
) -> Response {
    if body.frames.is_empty() {
        return (StatusCode::BAD_REQUEST, "No frames provided").into_response();
    }

    let frames = match job::decode_frames(&body.frames) {
        Ok(frames) => frames,
        Err(e) => {
            warn!("Rejected render request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let fps = body
        .fps
        .filter(|fps| *fps > 0)
        .unwrap_or(state.config.default_fps);
    info!("Rendering {} frames at {} fps", frames.len(), fps);

    match job::render_video(&state.config, &frames, fps).await {
        Ok(video) => {
            info!("Rendered {} bytes", video.len());
            (
                [
                    (header::CONTENT_TYPE, "video/mp4".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{VIDEO_FILENAME}\""),
                    ),
                ],
                video,
            )
                .into_response()
        }
        Err(e) => {
            error!("Video generation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Video generation failed").into_response()
        }
    }
}
