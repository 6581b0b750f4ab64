    use super::*;
    use crate::cache::MemoryCache;
    use crate::prompt::{PromptStore, ResponseMode};
    use crate::testing::StubBackend;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            backend: Arc::new(StubBackend::with_response("[\"rust\"]")),
            prompts: PromptStore::from_templates(
                "extract {page_content}",
                "search {keyword}",
                "summarize {keyword}",
            ),
            mode: ResponseMode::Summarize,
            extraction_cache: Arc::new(MemoryCache::new()),
            response_cache: Arc::new(MemoryCache::new()),
        })
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_without_q_is_400() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::get("/api/search").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_with_missing_text_is_400() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/extract-keywords")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_happy_path_through_router() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/extract-keywords")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text": "a page about rust"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!(["rust"]));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::get("/api/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
