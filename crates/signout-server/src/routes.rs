//! Route handlers for the signout API.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use signout_core::cases::{CaseCatalog, CaseDetail, CaseSummary, CaseView};
use signout_core::model::{HandoffMetadata, HandoffRecord, HandoffSubmission};
use signout_core::rubric::RubricResult;
use signout_core::service::HandoffService;
use signout_core::traits::ListQuery;
use signout_core::SignoutError;

use crate::error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: HandoffService,
    pub catalog: Arc<CaseCatalog>,
}

/// All API routes, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/signouts", post(create_signout).get(list_signouts))
        .route(
            "/api/signouts/{signout_id}",
            get(get_signout).put(update_signout).delete(delete_signout),
        )
        .route("/api/signouts/{signout_id}/score", post(score_signout))
        .route("/api/cases", get(list_cases))
        .route("/api/cases/{case_id}", get(get_case))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub signout_id: Uuid,
}

/// Parse a request body as a submission. Unparseable JSON is a validation
/// error (422), like any other bad submission.
fn parse_submission(body: &[u8]) -> Result<HandoffSubmission, SignoutError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| SignoutError::MalformedSubmission(e.to_string()))?;
    HandoffSubmission::from_json(value)
}

async fn create_signout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let submission = parse_submission(&body)?;
    let record = state.service.create(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            signout_id: record.id,
        }),
    ))
}

/// Parse a path identifier. A malformed id cannot name a stored record, so
/// it is reported as not found.
fn parse_signout_id(raw: &str) -> Result<Uuid, SignoutError> {
    Uuid::parse_str(raw).map_err(|_| SignoutError::UnknownSignoutId(raw.to_string()))
}

async fn get_signout(
    State(state): State<AppState>,
    Path(signout_id): Path<String>,
) -> Result<Json<HandoffRecord>, ApiError> {
    let signout_id = parse_signout_id(&signout_id)?;
    Ok(Json(state.service.get(signout_id).await?))
}

async fn update_signout(
    State(state): State<AppState>,
    Path(signout_id): Path<String>,
    body: Bytes,
) -> Result<Json<HandoffRecord>, ApiError> {
    let signout_id = parse_signout_id(&signout_id)?;
    let submission = parse_submission(&body)?;
    Ok(Json(state.service.update(signout_id, submission).await?))
}

async fn delete_signout(
    State(state): State<AppState>,
    Path(signout_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let signout_id = parse_signout_id(&signout_id)?;
    state.service.delete(signout_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters arrive as raw strings so bad values are reported as
/// validation errors with a JSON body.
type QueryParams = HashMap<String, String>;

fn count_param(params: &QueryParams, param: &'static str) -> Result<Option<usize>, SignoutError> {
    params
        .get(param)
        .map(|value| {
            value.parse::<usize>().map_err(|_| SignoutError::InvalidQueryParam {
                param,
                value: value.clone(),
            })
        })
        .transpose()
}

fn list_query(params: &QueryParams) -> Result<ListQuery, SignoutError> {
    let case_id = params.get("case_id").cloned();
    if case_id.as_deref().is_some_and(str::is_empty) {
        return Err(SignoutError::MissingField("case_id"));
    }
    Ok(ListQuery {
        case_id,
        offset: count_param(params, "offset")?.unwrap_or(0),
        limit: count_param(params, "limit")?,
    })
}

async fn list_signouts(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<HandoffMetadata>>, ApiError> {
    let query = list_query(&params)?;
    let records = state.service.list(&query).await?;
    Ok(Json(records.iter().map(HandoffRecord::metadata).collect()))
}

async fn score_signout(
    State(state): State<AppState>,
    Path(signout_id): Path<String>,
) -> Result<Json<RubricResult>, ApiError> {
    let signout_id = parse_signout_id(&signout_id)?;
    Ok(Json(state.service.score(signout_id).await?))
}

async fn list_cases(State(state): State<AppState>) -> Json<Vec<CaseSummary>> {
    Json(state.catalog.summaries())
}

async fn get_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Result<Json<CaseDetail>, ApiError> {
    let view = match params.get("mode") {
        None => CaseView::default(),
        Some(mode) => mode.parse::<CaseView>()?,
    };
    Ok(Json(state.catalog.detail(&case_id, view)?))
}
