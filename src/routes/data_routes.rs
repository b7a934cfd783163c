use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use trajectory_reader::{
    Recording, SampleParser, TrajectoryError, TrajectorySeriesBuilder, UnitScaler,
};

use crate::state::app_state::{AppState, LoadedRecording};
use crate::utils::conf_helper::get_cached_config;

#[derive(Deserialize, Debug)]
pub struct FileReadRequest {
    pub path: String,
}

#[derive(Serialize, Debug)]
pub struct FileReadResponse {
    pub id: String,
    pub name: String,
    pub path: String,
    pub samples: usize,
    pub channels: Option<usize>,
    pub unknown_fields: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SeriesQuery {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, err: impl ToString) -> Response {
    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}

pub fn status_for(err: &TrajectoryError) -> StatusCode {
    match err {
        TrajectoryError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
        TrajectoryError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TrajectoryError::EmptySequence => StatusCode::CONFLICT,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// =======================
/// ROUTER
/// =======================

pub fn data_routes(state: AppState) -> Router {
    Router::new()
        .route("/read-file", post(read_file))
        .route("/series", get(series))
        .with_state(state)
}

/// =======================
/// HANDLERS
/// =======================

async fn read_file(
    State(state): State<AppState>,
    Json(request): Json<FileReadRequest>,
) -> Response {
    debug!("Reading file: path={}", request.path);
    let settings = &get_cached_config().playback;

    let recording = match Recording::open(&request.path) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to open file {}: {}", request.path, e);
            return error_response(status_for(&e), e);
        }
    };

    let parser = SampleParser::new()
        .with_delimiter(settings.delimiter as u8)
        .with_strict_width(settings.strict_width);

    let (samples, field_errors) = match parser.parse_with_report(recording.text()) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Failed to parse {}: {}", recording.name(), e);
            return error_response(status_for(&e), e);
        }
    };

    if let Some(first) = field_errors.first() {
        warn!("{}: first non-numeric field at {}", recording.name(), first);
    }

    let scaled = UnitScaler::new(settings.unit_ratio).scale(&samples);

    // resets the engine on success and leaves it alone on failure
    if let Err(e) = state.load_playback(scaled).await {
        error!("Rejected {} for playback: {}", recording.name(), e);
        return error_response(status_for(&e), e);
    }

    let loaded = LoadedRecording {
        session_id: uuid::Uuid::new_v4().to_string(),
        info: recording.info().clone(),
        samples: Arc::new(samples),
        unknown_fields: field_errors.len(),
    };

    info!(
        "Session {} loaded {} ({} samples)",
        loaded.session_id,
        loaded.info.name,
        loaded.samples.len()
    );

    let response = FileReadResponse {
        id: loaded.session_id.clone(),
        name: loaded.info.name.clone(),
        path: request.path,
        samples: loaded.samples.len(),
        channels: loaded.samples.width(),
        unknown_fields: loaded.unknown_fields,
        created_at: loaded.info.loaded_at,
    };

    *state.recording.write().await = Some(loaded);

    Json(response).into_response()
}

async fn series(State(state): State<AppState>, Query(query): Query<SeriesQuery>) -> Response {
    let samples = match state.recording.read().await.as_ref() {
        Some(loaded) => loaded.samples.clone(),
        None => return error_response(StatusCode::NOT_FOUND, "no recording loaded"),
    };

    let step = get_cached_config().playback.sample_step;
    let triple = match TrajectorySeriesBuilder::new(step).and_then(|b| b.build(&samples)) {
        Ok(t) => t,
        Err(e) => {
            error!("Series build failed: {}", e);
            return error_response(status_for(&e), e);
        }
    };

    let triple = match (query.start, query.end) {
        (None, None) => triple,
        (start, end) => triple.time_range(
            start.unwrap_or(f64::NEG_INFINITY),
            end.unwrap_or(f64::INFINITY),
        ),
    };

    Json(triple).into_response()
}
