#[cfg(test)]
mod http_api_tests {
    use std::sync::Arc;

    use anyhow::Result;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use propsearch::config::ServerConfig;
    use propsearch::executor::{ExecutionError, PropertyStore, RawRow};
    use propsearch::feed::{ExternalListing, FeedFetchError, ListingFeed};
    use propsearch::image_resolver::PLACEHOLDER_IMAGE_URL;
    use propsearch::schema_descriptor::SchemaDescriptor;
    use propsearch::search::SearchOrchestrator;
    use propsearch::server::{build_router, AppState};
    use propsearch::translator::{CompletionService, QueryTranslator, TranslationError};

    struct StaticCompletion {
        text: String,
    }

    #[async_trait]
    impl CompletionService for StaticCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String, TranslationError> {
            Ok(self.text.clone())
        }
    }

    struct StaticStore {
        rows: Vec<RawRow>,
    }

    #[async_trait]
    impl PropertyStore for StaticStore {
        async fn fetch_rows(&self, _sql: &str) -> Result<Vec<RawRow>, ExecutionError> {
            Ok(self.rows.clone())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl PropertyStore for FailingStore {
        async fn fetch_rows(&self, _sql: &str) -> Result<Vec<RawRow>, ExecutionError> {
            Err(ExecutionError::Store("Code: 62. Syntax error".to_string()))
        }
    }

    struct FailingFeed;

    #[async_trait]
    impl ListingFeed for FailingFeed {
        async fn fetch_snapshot(&self) -> Result<Vec<ExternalListing>, FeedFetchError> {
            Err(FeedFetchError::Request("operation timed out".to_string()))
        }
    }

    fn raw_row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be objects"),
        }
    }

    fn test_state(store: Arc<dyn PropertyStore>, feed: Arc<dyn ListingFeed>) -> Arc<AppState> {
        let translator = QueryTranslator::new(
            Arc::new(StaticCompletion {
                text: "```sql\nSELECT * FROM Properties\n```".to_string(),
            }),
            SchemaDescriptor::default(),
        );
        Arc::new(AppState {
            orchestrator: SearchOrchestrator::new(translator, store, feed),
            config: ServerConfig::default(),
        })
    }

    fn sample_state() -> Arc<AppState> {
        let rows = vec![raw_row(json!({
            "property_id": 1,
            "unparsed_address": "123 Main St, Springfield",
            "bedrooms": 3
        }))];
        test_state(Arc::new(StaticStore { rows }), Arc::new(FailingFeed))
    }

    fn search_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    async fn response_json(response: axum::response::Response) -> Result<Value> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[tokio::test]
    async fn test_search_happy_path() -> Result<()> {
        let app = build_router(sample_state());

        let response = app
            .oneshot(search_request(r#"{"query": "show me 3 bedroom houses"}"#))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await?;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["query"], json!("show me 3 bedroom houses"));
        assert_eq!(body["sql"], json!("SELECT * FROM Properties"));
        assert_eq!(body["count"], json!(1));
        assert_eq!(body["message"], json!("Showing 1 3 bedroom houses"));
        assert_eq!(
            body["results"][0]["UnparsedAddress"],
            json!("123 Main St, Springfield")
        );
        // Feed was down: placeholder attached, failure absent from the body.
        assert_eq!(
            body["results"][0]["Media"][0]["MediaURL"],
            json!(PLACEHOLDER_IMAGE_URL)
        );
        assert!(body.get("error").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_search_missing_query_field() -> Result<()> {
        let app = build_router(sample_state());

        let response = app.oneshot(search_request("{}")).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await?;
        assert_eq!(body["error"], json!("Missing query parameter"));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_empty_query() -> Result<()> {
        let app = build_router(sample_state());

        let response = app.oneshot(search_request(r#"{"query": "   "}"#)).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await?;
        assert_eq!(body["error"], json!("Query cannot be empty"));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_store_failure_returns_500() -> Result<()> {
        let app = build_router(test_state(Arc::new(FailingStore), Arc::new(FailingFeed)));

        let response = app.oneshot(search_request(r#"{"query": "houses"}"#)).await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response_json(response).await?;
        assert_eq!(body["success"], json!(false));
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("Query execution failed"));
        Ok(())
    }

    #[tokio::test]
    async fn test_health_reports_config_presence_not_values() -> Result<()> {
        let app = build_router(sample_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/health")
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await?;
        assert_eq!(body["service"], json!("propsearch"));
        assert_eq!(body["status"], json!("healthy"));
        // Default config has a store URL but no API key or feed token.
        assert_eq!(body["config"]["clickhouse_url"], json!(true));
        assert_eq!(body["config"]["gemini_api_key"], json!(false));
        assert_eq!(body["config"]["feed_token"], json!(false));
        Ok(())
    }

    #[tokio::test]
    async fn test_cors_preflight() -> Result<()> {
        let app = build_router(sample_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/search")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        Ok(())
    }
}
