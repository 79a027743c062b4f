use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tessera_diff::DiffResult;
use tessera_sdk::{NewVersion, SdkResult, Tessera, VerifyReport};
use tessera_types::{DocumentId, Version, VersionId};

use crate::auth::{AuthProvider, Credentials};
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub tessera: Tessera,
    pub auth: Arc<dyn AuthProvider>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVersionRequest {
    pub document_id: String,
    pub content: String,
    pub commit_message: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    pub base: String,
    pub new: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub intact: bool,
    pub hash_matches: bool,
    pub size_matches: bool,
    #[serde(flatten)]
    pub report: VerifyReport,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "tessera-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn create_version_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateVersionRequest>,
) -> ServerResult<Json<Version>> {
    let identity = state
        .auth
        .authenticate(&Credentials::from_headers(&headers))
        .await?;
    let document_id = parse_id::<DocumentId>(&body.document_id, "document id")?;

    let mut request = NewVersion::new(
        document_id,
        body.content,
        body.commit_message,
        identity.name,
    );
    request.tag = body.tag;

    let tessera = state.tessera.clone();
    let version = blocking(move || tessera.create_version(request)).await?;
    Ok(Json(version))
}

pub async fn get_version_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Version>> {
    let id = parse_id::<VersionId>(&id, "version id")?;
    let tessera = state.tessera.clone();
    Ok(Json(blocking(move || tessera.get_version(&id)).await?))
}

/// Raw snapshot bytes. Snapshots are HTML documents.
pub async fn get_content_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Response> {
    let id = parse_id::<VersionId>(&id, "version id")?;
    let tessera = state.tessera.clone();
    let bytes = blocking(move || tessera.get_version_content(&id)).await?;
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response())
}

pub async fn verify_version_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<VerifyResponse>> {
    let id = parse_id::<VersionId>(&id, "version id")?;
    let tessera = state.tessera.clone();
    let report = blocking(move || tessera.verify_version(&id)).await?;
    Ok(Json(VerifyResponse {
        intact: report.is_intact(),
        hash_matches: report.hash_matches(),
        size_matches: report.size_matches(),
        report,
    }))
}

pub async fn list_versions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<Version>>> {
    let id = parse_id::<DocumentId>(&id, "document id")?;
    let tessera = state.tessera.clone();
    Ok(Json(blocking(move || tessera.list_versions(&id)).await?))
}

pub async fn diff_handler(
    State(state): State<AppState>,
    Query(query): Query<DiffQuery>,
) -> ServerResult<Json<DiffResult>> {
    let base = parse_id::<VersionId>(&query.base, "base version id")?;
    let new = parse_id::<VersionId>(&query.new, "new version id")?;
    let tessera = state.tessera.clone();
    Ok(Json(blocking(move || tessera.compare_versions(&base, &new)).await?))
}

fn parse_id<T: FromStr>(raw: &str, what: &str) -> ServerResult<T> {
    raw.parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid {what}: {raw}")))
}

/// Run a store operation on the blocking pool.
async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> SdkResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(ServerError::from)
}
