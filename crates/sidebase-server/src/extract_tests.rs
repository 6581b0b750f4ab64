    use super::*;
    use crate::cache::MemoryCache;
    use crate::prompt::{PromptStore, ResponseMode};
    use crate::testing::{StubBackend, StubResponse};
    use axum::http::StatusCode;

    fn state_with(backend: Arc<StubBackend>) -> Arc<AppState> {
        Arc::new(AppState {
            backend: backend.clone(),
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

    async fn call(state: Arc<AppState>, text: Option<&str>) -> Response {
        let body = ExtractRequest {
            text: text.map(|t| t.to_string()),
        };
        match extract_keywords(State(state), Json(body)).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_content_hash_deterministic() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
        assert_eq!(content_hash("abc").len(), 64);
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "Here you go:\n```json\n[\"rust\", \"cargo\"]\n```\nDone.";
        let keywords = parse_keyword_array(raw).unwrap();
        assert_eq!(keywords, vec!["rust", "cargo"]);
    }

    #[test]
    fn test_parse_bare_json() {
        let keywords = parse_keyword_array("  [\"a\", \"b\"]  ").unwrap();
        assert_eq!(keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_invalid_output() {
        let err = parse_keyword_array("I could not find any keywords.").unwrap_err();
        assert!(matches!(err, ServiceError::ParseError(_)));
    }

    #[test]
    fn test_parse_unterminated_fence_falls_back() {
        let err = parse_keyword_array("```json\n[\"a\"]").unwrap_err();
        assert!(matches!(err, ServiceError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_missing_text_is_400() {
        let state = state_with(Arc::new(StubBackend::with_response("[]")));
        let response = call(state.clone(), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = call(state, Some("   ")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extraction_success() {
        let backend = Arc::new(StubBackend::with_response("```json\n[\"rust\"]\n```"));
        let state = state_with(backend.clone());
        let response = call(state, Some("a page about rust")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!(["rust"]));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_identical_text_served_from_cache() {
        let backend = Arc::new(StubBackend::with_response("[\"rust\"]"));
        let state = state_with(backend.clone());

        let first = call(state.clone(), Some("same text")).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(backend.calls(), 1);

        let second = call(state, Some("same text")).await;
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(body_json(second).await, serde_json::json!(["rust"]));
        // No additional model invocation.
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_quota_exhaustion_is_429() {
        let state = state_with(Arc::new(StubBackend::failing(StubResponse::Quota)));
        let response = call(state, Some("text")).await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("quota"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_500() {
        let state = state_with(Arc::new(StubBackend::failing(StubResponse::Network)));
        let response = call(state, Some("text")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unparseable_output_is_500_and_not_cached() {
        let backend = Arc::new(StubBackend::with_response("not json"));
        let state = state_with(backend.clone());
        let response = call(state.clone(), Some("text")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // A retry hits the backend again since nothing was cached.
        let _ = call(state, Some("text")).await;
        assert_eq!(backend.calls(), 2);
    }
