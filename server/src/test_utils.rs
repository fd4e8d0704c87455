use std::sync::Arc;

use axum_test::TestServer;
use drr_core::InMemoryRecordRepository;

use crate::{Application, Config};

pub fn create_test_server_with(repo: InMemoryRecordRepository, strict: bool, max_body_bytes: usize) -> TestServer {
    let config = Config {
        strict,
        max_body_bytes,
        ..Config::default()
    };
    let app = Application::with_repository(config, Arc::new(repo));
    TestServer::new(app.router()).expect("Failed to create test server")
}

/// A server over a fresh store, plus a handle on that store for assertions.
pub fn create_test_server(strict: bool) -> (TestServer, InMemoryRecordRepository) {
    let repo = InMemoryRecordRepository::new();
    let server = create_test_server_with(repo.clone(), strict, Config::default().max_body_bytes);
    (server, repo)
}
