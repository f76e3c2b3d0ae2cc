//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for uploading recordings, transcription, minutes
//! generation and sharing. Uploaded files land in the configured upload
//! directory with sanitized names.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::MinutesPipeline;
use crate::storage;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    pipeline: MinutesPipeline,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let pipeline = MinutesPipeline::new(settings)?;
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/transcribe", post(transcribe))
        .route("/minutes", post(minutes))
        .route("/share", post(share))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Referat API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Upload", "POST /upload (multipart, field 'file')");
    Output::kv("Transcribe", "POST /transcribe");
    Output::kv("Minutes", "POST /minutes");
    Output::kv("Share", "POST /share");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Serialize)]
struct UploadResponse {
    path: String,
}

#[derive(Deserialize)]
struct TranscribeRequest {
    /// Path to a recording, typically returned by /upload
    input: String,
}

#[derive(Serialize)]
struct TranscribeResponse {
    transcript: String,
    segments: usize,
}

#[derive(Deserialize)]
struct MinutesRequest {
    transcript: String,
}

#[derive(Serialize)]
struct MinutesResponse {
    minutes: serde_json::Value,
    markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

#[derive(Deserialize)]
struct ShareRequest {
    /// The (edited) minutes record
    minutes: serde_json::Value,
    #[serde(default)]
    internal: Vec<String>,
    #[serde(default)]
    external: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    transcript: Option<String>,
}

#[derive(Serialize)]
struct ShareResponse {
    internal_sent: usize,
    external_sent: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    meeting_code: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let upload_dir = state.pipeline.settings().upload_dir();

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("recording").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
        };

        return match storage::save_upload(&upload_dir, &filename, &bytes) {
            Ok(path) => Json(UploadResponse {
                path: path.display().to_string(),
            })
            .into_response(),
            Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
        };
    }

    error_response(StatusCode::BAD_REQUEST, "missing multipart field 'file'")
}

async fn transcribe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscribeRequest>,
) -> impl IntoResponse {
    match state.pipeline.transcribe_media(&req.input).await {
        Ok(outcome) => Json(TranscribeResponse {
            segments: outcome.transcript.segments.len(),
            transcript: outcome.labeled_text,
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

async fn minutes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MinutesRequest>,
) -> impl IntoResponse {
    match state.pipeline.generate_minutes(&req.transcript).await {
        Ok(generated) => Json(MinutesResponse {
            minutes: serde_json::to_value(&generated.record).unwrap_or_default(),
            markdown: generated.markdown,
            summary: generated.summary,
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

async fn share(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ShareRequest>,
) -> impl IntoResponse {
    let edited_json = req.minutes.to_string();

    match state
        .pipeline
        .finalize_and_share(
            &edited_json,
            &req.internal,
            &req.external,
            req.summary.as_deref(),
            req.transcript.as_deref(),
        )
        .await
    {
        Ok(result) => Json(ShareResponse {
            internal_sent: result.internal_sent,
            external_sent: result.external_sent,
            meeting_code: result.meeting_code,
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
