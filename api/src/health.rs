use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    App,
    envelope::{Envelope, Status},
};

pub async fn welcome() -> Json<Envelope<()>> {
    Json(Envelope::message(Status::Success, "CRUD Blog API"))
}

/// Reports liveness together with the number of stored blogs, which doubles
/// as a connectivity check against the store.
pub async fn healthchecker(State(ctx): State<App>) -> impl IntoResponse {
    match ctx.store.count().await {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({
                "status": Status::Success,
                "message": "CRUD Blog API",
                "environment": ctx.env,
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "records": records,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check could not reach the store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": Status::Error,
                    "message": e.to_string(),
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{App, config::Env, router, store::MemoryBlogStore};

    fn app() -> Router {
        router(App {
            store: Arc::new(MemoryBlogStore::new()),
            env: Env::Staging,
        })
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri).await
    }

    #[tokio::test]
    async fn welcome_is_success() {
        let (status, body) = get_json(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn healthchecker_reports_environment_and_records() {
        let (status, body) = get_json(app(), "/api/healthchecker").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["environment"], "staging");
        assert_eq!(body["records"], 0);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_is_a_fail() {
        let (status, body) = get_json(app(), "/api/nothing/here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");
        assert_eq!(
            body["message"],
            "Route: /api/nothing/here does not exist on this server"
        );
    }

    #[tokio::test]
    async fn unknown_route_message_keeps_the_query_string() {
        let (status, body) = get_json(app(), "/api/nothing?page=2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            "Route: /api/nothing?page=2 does not exist on this server"
        );
    }

    #[tokio::test]
    async fn unsupported_method_on_known_path_is_a_fail() {
        let id_path = format!("/api/blogs/{}", uuid::Uuid::new_v4());
        let cases = [
            (Method::PUT, "/api/blogs"),
            (Method::DELETE, "/api/blogs"),
            (Method::PUT, id_path.as_str()),
            (Method::POST, "/api/healthchecker"),
        ];

        for (method, uri) in cases {
            let (status, body) = send(app(), method.clone(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(body["status"], "fail", "{method} {uri}");
            assert_eq!(
                body["message"],
                format!("Route: {uri} does not exist on this server"),
                "{method} {uri}"
            );
        }
    }
}
