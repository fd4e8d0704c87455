use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use drr_core::{Record, RecordRepository};

use crate::errors::Error;
use crate::AppState;

/// Runs a repository call off the async executor; the file store blocks.
async fn with_repo<T, F>(state: &AppState, f: F) -> Result<T, Error>
where
    F: FnOnce(&dyn RecordRepository) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let repo = Arc::clone(&state.repo);
    let result = tokio::task::spawn_blocking(move || f(repo.as_ref()))
        .await
        .map_err(anyhow::Error::from)?;
    Ok(result?)
}

/// `GET /api/data`: every record in insertion order.
pub async fn list_data(State(state): State<AppState>) -> Result<Json<Vec<Record>>, Error> {
    let records = with_repo(&state, |repo| repo.list()).await?;
    Ok(Json(records))
}

/// `POST /api/data`: stores the body and echoes it back unchanged.
pub async fn create_data(State(state): State<AppState>, Json(record): Json<Record>) -> Result<Json<Record>, Error> {
    if state.strict {
        record.validate()?;
    }
    let stored = with_repo(&state, move |repo| repo.append(record)).await?;
    tracing::debug!(id = stored.id().unwrap_or_default(), "Record stored");
    Ok(Json(stored))
}

/// `DELETE /api/data/{id}`: removes the first record with this id.
pub async fn delete_data(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Record>, Error> {
    let lookup = id.clone();
    match with_repo(&state, move |repo| repo.remove_by_id(&lookup)).await? {
        Some(record) => {
            tracing::debug!(%id, "Record deleted");
            Ok(Json(record))
        }
        None => Err(Error::NotFound { id }),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use drr_core::{InMemoryRecordRepository, RecordRepository};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_post_then_get() {
        let (server, _) = create_test_server(false);

        let response = server.post("/api/data").json(&json!({ "id": "a1", "leadCount": 50 })).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "id": "a1", "leadCount": 50 }));

        let response = server.get("/api/data").await;
        response.assert_status_ok();
        response.assert_json(&json!([{ "id": "a1", "leadCount": 50 }]));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let (server, _) = create_test_server(false);
        for id in ["c", "a", "b"] {
            server.post("/api/data").json(&json!({ "id": id })).await.assert_status_ok();
        }

        let records: Vec<Value> = server.get("/api/data").await.json();
        let ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_post_echoes_body_exactly() {
        let (server, repo) = create_test_server(false);
        let body = json!({
            "id": "x9",
            "startDate": "2024-01-01",
            "endDate": "2024-01-07",
            "leadCount": "50",
            "numberOfDays": 6,
            "expectedDRR": "8.33",
            "daysOfCount": 0
        });

        server.post("/api/data").json(&body).await.assert_json(&body);
        assert_eq!(serde_json::to_value(repo.list().unwrap()).unwrap(), json!([body]));
    }

    #[tokio::test]
    async fn test_post_and_list_keep_key_order() {
        let (server, _) = create_test_server(false);
        let raw = r#"{"id":"a1","zeta":1,"leadCount":50,"alpha":2.0}"#;

        let response = server
            .post("/api/data")
            .bytes(Bytes::from_static(raw.as_bytes()))
            .content_type("application/json")
            .await;
        response.assert_status_ok();
        assert_eq!(response.text(), raw);

        assert_eq!(server.get("/api/data").await.text(), format!("[{raw}]"));
    }

    #[tokio::test]
    async fn test_malformed_bodies_stored_as_is_when_lenient() {
        let (server, repo) = create_test_server(false);
        server
            .post("/api/data")
            .json(&json!({ "leadCount": "lots" }))
            .await
            .assert_status_ok();
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_malformed_bodies() {
        let (server, repo) = create_test_server(true);
        let response = server
            .post("/api/data")
            .json(&json!({ "id": "a1", "startDate": "2024-01-01", "endDate": "2024-01-07", "leadCount": "lots" }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "leadCount must be a number, got 'lots'" }));
        assert!(repo.list().unwrap().is_empty());

        server
            .post("/api/data")
            .json(&json!({ "id": "a1", "startDate": "2024-01-01", "endDate": "2024-01-07", "leadCount": 50 }))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_non_object_body_rejected() {
        let (server, repo) = create_test_server(false);
        let response = server.post("/api/data").json(&json!(["a1"])).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(repo.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let (server, repo) = create_test_server(false);
        server.post("/api/data").json(&json!({ "id": "a1", "leadCount": 50 })).await;
        server.post("/api/data").json(&json!({ "id": "b2", "leadCount": 10 })).await;

        let response = server.delete("/api/data/a1").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "id": "a1", "leadCount": 50 }));

        let remaining = repo.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), Some("b2"));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_404() {
        let (server, _) = create_test_server(false);
        let response = server.delete("/api/data/unknown").await;
        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Data not found" }));
    }

    #[tokio::test]
    async fn test_instances_do_not_share_state() {
        let (first, _) = create_test_server(false);
        let (second, _) = create_test_server(false);
        first.post("/api/data").json(&json!({ "id": "only-here" })).await;

        second.get("/api/data").await.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_body_limit() {
        let repo = InMemoryRecordRepository::new();
        let server = create_test_server_with(repo, false, 64);
        let response = server
            .post("/api/data")
            .json(&json!({ "id": "a1", "note": "x".repeat(200) }))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }
}
