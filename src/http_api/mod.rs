use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::export::{self, DEFAULT_CSV_FILENAME, ExportError};
use crate::metadata::PlanMetadata;
use crate::plan::{PlanError, StudyPlan};
use crate::timetable::Timetable;

/// Per-session state: the editable plan and the last generated timetable.
/// The timetable is only replaced by the next generation request.
pub struct Session {
    pub metadata: PlanMetadata,
    pub plan: StudyPlan,
    pub timetable: Option<Timetable>,
}

impl Session {
    pub fn new(plan: StudyPlan) -> Self {
        Self {
            metadata: PlanMetadata::default(),
            plan,
            timetable: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<Session>>,
}

impl AppState {
    pub fn new(plan: StudyPlan) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new(plan))),
        }
    }

    pub fn with_shared(session: Arc<RwLock<Session>>) -> Self {
        Self { session }
    }

    fn session(&self) -> Arc<RwLock<Session>> {
        self.session.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::InvalidInput(msg) => ApiError::Invalid(msg),
            PlanError::DataFrame(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(value: ExportError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayColumn {
    pub label: String,
    pub entries: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimetableBody {
    pub slots: Vec<String>,
    pub days: Vec<DayColumn>,
}

impl TimetableBody {
    fn from_timetable(timetable: &Timetable) -> Result<Self, ApiError> {
        let slots = timetable.slot_labels()?;
        let mut days = Vec::with_capacity(timetable.day_count());
        for label in timetable.day_labels() {
            let entries = timetable.entries_for_day(&label)?;
            days.push(DayColumn { label, entries });
        }
        Ok(Self { slots, days })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metadata", get(get_metadata).put(update_metadata))
        .route("/plan", get(get_plan).put(update_plan))
        .route("/generate", post(generate_timetable))
        .route("/timetable", get(get_timetable))
        .route("/timetable/csv", get(download_csv))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, plan: StudyPlan) -> std::io::Result<()> {
    let state = AppState::new(plan);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_metadata(State(state): State<AppState>) -> Json<PlanMetadata> {
    let session = state.session();
    let metadata = {
        let guard = session.read();
        guard.metadata.clone()
    };
    Json(metadata)
}

async fn update_metadata(
    State(state): State<AppState>,
    Json(metadata): Json<PlanMetadata>,
) -> Json<PlanMetadata> {
    let session = state.session();
    {
        let mut guard = session.write();
        guard.metadata = metadata.clone();
    }
    Json(metadata)
}

async fn get_plan(State(state): State<AppState>) -> Json<StudyPlan> {
    let session = state.session();
    let plan = {
        let guard = session.read();
        guard.plan.clone()
    };
    Json(plan)
}

async fn update_plan(
    State(state): State<AppState>,
    Json(plan): Json<StudyPlan>,
) -> Result<Json<StudyPlan>, ApiError> {
    plan.validate()?;
    let session = state.session();
    {
        let mut guard = session.write();
        guard.plan = plan.clone();
    }
    Ok(Json(plan))
}

async fn generate_timetable(
    State(state): State<AppState>,
) -> Result<Json<TimetableBody>, ApiError> {
    let session = state.session();
    let mut guard = session.write();
    let timetable = Timetable::generate_with_metadata(&guard.plan, guard.metadata.clone())?;
    let body = TimetableBody::from_timetable(&timetable)?;
    guard.timetable = Some(timetable);
    Ok(Json(body))
}

async fn get_timetable(State(state): State<AppState>) -> Result<Json<TimetableBody>, ApiError> {
    let session = state.session();
    let guard = session.read();
    match guard.timetable.as_ref() {
        Some(timetable) => Ok(Json(TimetableBody::from_timetable(timetable)?)),
        None => Err(ApiError::not_found("no timetable generated")),
    }
}

async fn download_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let session = state.session();
    let bytes = {
        let guard = session.read();
        let timetable = guard
            .timetable
            .as_ref()
            .ok_or_else(|| ApiError::not_found("no timetable generated"))?;
        export::csv_bytes(timetable)?
    };
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DEFAULT_CSV_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
