use crate::document::{Document, DocumentStatus};
use crate::engine::SearchServer;
use crate::error::{IdRejection, SearchError};
use crate::index::IndexStats;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tower_http::trace::TraceLayer;

/// Server shared between handlers: adds take the write lock, queries the read lock.
pub type SharedServer = Arc<RwLock<SearchServer>>;

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct AddDocumentRequest {
    pub id: i32,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub documents: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: i32,
    pub matched_terms: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub position: usize,
    pub id: i32,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

pub enum AppError {
    Search(SearchError),
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Search(err) => match err {
                SearchError::DocumentNotFound(_) | SearchError::PositionOutOfRange { .. } => {
                    StatusCode::NOT_FOUND
                }
                SearchError::InvalidDocumentId {
                    reason: IdRejection::Duplicate,
                    ..
                } => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::Search(err) => err.to_string(),
            AppError::Internal(message) => message,
        };
        tracing::warn!(%status, "API error: {}", message);

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::Search(err)
    }
}

fn read(server: &SharedServer) -> Result<RwLockReadGuard<'_, SearchServer>, AppError> {
    server
        .read()
        .map_err(|_| AppError::Internal("search server lock poisoned".to_string()))
}

fn write(server: &SharedServer) -> Result<RwLockWriteGuard<'_, SearchServer>, AppError> {
    server
        .write()
        .map_err(|_| AppError::Internal("search server lock poisoned".to_string()))
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn add_document(
    State(server): State<SharedServer>,
    Json(req): Json<AddDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    write(&server)?.add_document(req.id, &req.text, req.status, &req.ratings)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Document added successfully")),
    ))
}

async fn search_documents(
    State(server): State<SharedServer>,
    Query(req): Query<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = req.status.unwrap_or_default();
    let documents = read(&server)?.find_top_documents_with_status(&req.query, status)?;

    Ok(Json(ApiResponse::success(SearchResponse {
        query: req.query,
        documents,
    })))
}

async fn match_document(
    State(server): State<SharedServer>,
    Path(id): Path<i32>,
    Query(req): Query<MatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (matched_terms, status) = read(&server)?.match_document(&req.query, id)?;

    Ok(Json(ApiResponse::success(MatchResponse {
        id,
        matched_terms,
        status,
    })))
}

async fn document_count(State(server): State<SharedServer>) -> Result<impl IntoResponse, AppError> {
    let count = read(&server)?.document_count();
    Ok(Json(ApiResponse::success(CountResponse { count })))
}

async fn document_at(
    State(server): State<SharedServer>,
    Path(position): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    let id = read(&server)?.document_id_at(position)?;
    Ok(Json(ApiResponse::success(PositionResponse { position, id })))
}

async fn get_stats(State(server): State<SharedServer>) -> Result<impl IntoResponse, AppError> {
    let stats: IndexStats = read(&server)?.stats();
    Ok(Json(ApiResponse::success(stats)))
}

// ========== Router ==========

pub fn create_router(server: SharedServer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/documents", post(add_document))
        .route("/documents/count", get(document_count))
        .route("/documents/at/:position", get(document_at))
        .route("/documents/:id/match", get(match_document))
        .route("/search", get(search_documents))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}
