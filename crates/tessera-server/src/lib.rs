//! HTTP server for Tessera.
//!
//! Exposes version creation, retrieval, verification, and diffing as a JSON
//! REST API. Store calls run on the blocking thread pool; the caller's
//! identity comes from an [`AuthProvider`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use auth::{AuthProvider, Credentials, Identity, TrustedHeaderAuth, USER_HEADER};
pub use config::{DocumentConfig, TesseraConfig};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::TesseraServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tessera_sdk::{Document, DocumentId, InMemoryDocumentRegistry, Tessera};
    use tower::util::ServiceExt;

    fn app(doc: DocumentId) -> Router {
        let registry = InMemoryDocumentRegistry::with_documents([Document::new(doc, "Thesis")]);
        let state = AppState {
            tessera: Tessera::in_memory(Arc::new(registry)),
            auth: Arc::new(TrustedHeaderAuth),
        };
        router::build_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn create(app: &Router, doc: DocumentId, content: &str) -> Value {
        let body = json!({
            "document_id": doc.to_string(),
            "content": content,
            "commit_message": "revise",
            "tag": "draft",
        });
        let request = Request::builder()
            .method("POST")
            .uri("/v1/versions")
            .header("content-type", "application/json")
            .header(USER_HEADER, "alice")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, _) = get(&app(DocumentId::new()), "/v1/health").await;
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = get_json(&app(DocumentId::new()), "/v1/info").await;
        assert_eq!(status, 200);
        assert_eq!(body["name"], "tessera-server");
    }

    #[tokio::test]
    async fn create_and_fetch_version() {
        let doc = DocumentId::new();
        let app = app(doc);
        let created = create(&app, doc, "<p>hello</p>").await;
        assert_eq!(created["version_number"], "1.0");
        assert_eq!(created["author_id"], "alice");
        assert_eq!(created["tag"], "draft");

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = get_json(&app, &format!("/v1/versions/{id}")).await;
        assert_eq!(status, 200);
        assert_eq!(fetched, created);

        let (status, content) = get(&app, &format!("/v1/versions/{id}/content")).await;
        assert_eq!(status, 200);
        assert_eq!(content, b"<p>hello</p>");

        let (status, verify) = get_json(&app, &format!("/v1/versions/{id}/verify")).await;
        assert_eq!(status, 200);
        assert_eq!(verify["intact"], true);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let doc = DocumentId::new();
        let app = app(doc);
        create(&app, doc, "one").await;
        create(&app, doc, "two").await;

        let (status, list) = get_json(&app, &format!("/v1/documents/{doc}/versions")).await;
        assert_eq!(status, 200);
        let numbers: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["version_number"].as_str().unwrap())
            .collect();
        assert_eq!(numbers, vec!["2.0", "1.0"]);
    }

    #[tokio::test]
    async fn diff_endpoint() {
        let doc = DocumentId::new();
        let app = app(doc);
        let v1 = create(&app, doc, "a\nb\nc").await;
        let v2 = create(&app, doc, "a\nx\nc").await;

        let uri = format!(
            "/v1/diff?base={}&new={}",
            v1["id"].as_str().unwrap(),
            v2["id"].as_str().unwrap()
        );
        let (status, diff) = get_json(&app, &uri).await;
        assert_eq!(status, 200);
        assert_eq!(diff["added"], 1);
        assert_eq!(diff["removed"], 1);
        assert_eq!(diff["modified"], 1);
        assert_eq!(diff["entries"][1], json!({"kind": "removed", "value": "b"}));
        assert!(diff["html"].as_str().unwrap().starts_with("<div class='diff-container'>"));
    }

    #[tokio::test]
    async fn missing_version_is_404() {
        let app = app(DocumentId::new());
        let id = tessera_sdk::VersionId::new();
        let (status, body) = get_json(&app, &format!("/v1/versions/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "version_not_found");
        assert!(body["message"].as_str().unwrap().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        let app = app(DocumentId::new());
        let (status, body) = get_json(&app, "/v1/versions/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn unknown_document_is_404() {
        let app = app(DocumentId::new());
        let other = DocumentId::new();
        let (status, body) = get_json(&app, &format!("/v1/documents/{other}/versions")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "document_not_found");
    }

    #[tokio::test]
    async fn create_without_user_is_401() {
        let doc = DocumentId::new();
        let body = json!({
            "document_id": doc.to_string(),
            "content": "x",
            "commit_message": "m",
        });
        let request = Request::builder()
            .method("POST")
            .uri("/v1/versions")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _) = send(&app(doc), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_commit_message_is_400() {
        let doc = DocumentId::new();
        let body = json!({
            "document_id": doc.to_string(),
            "content": "x",
            "commit_message": "  ",
        });
        let request = Request::builder()
            .method("POST")
            .uri("/v1/versions")
            .header("content-type", "application/json")
            .header(USER_HEADER, "alice")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(&app(doc), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "validation_error");
    }
}
