//! Integration tests that drive the HTTP surface through the full router,
//! with stub collaborators behind the orchestrator.

mod http_api_tests;
