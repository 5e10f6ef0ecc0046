use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, TimeZone};
use material_graphs::infrastructure::config::{BulkSettings, LiveSettings};
use material_graphs::{
    BulkSnapshotRepository, FetchWindow, GraphDataService, GraphError, GraphRepository,
    HighlightCondition, LiveIncrementalRepository,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn bulk(server: &MockServer) -> BulkSnapshotRepository {
    BulkSnapshotRepository::new(&BulkSettings {
        host: server.uri(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn live(server: &MockServer, timeout_secs: u64) -> LiveIncrementalRepository {
    LiveIncrementalRepository::new(
        &LiveSettings {
            host: server.uri(),
            limit: 50,
            timeout_secs,
        },
        tokyo(),
    )
    .unwrap()
}

fn snapshot_body() -> serde_json::Value {
    json!({
        "prop_x": "Temperature",
        "prop_y": "Seebeck coefficient",
        "unit_x": "K",
        "unit_y": "V/K",
        "data": {
            "x": [[300, 400], [300, 400, 500], [350]],
            "y": [[10, 20], [30, 40], [15]],
            "updated_at": [
                "2024-01-01T00:00:00+09:00",
                "2024-01-01T00:00:00+09:00",
                "2024-01-02T00:00:00+09:00"
            ],
            "SID": ["A", "ragged", "C"]
        }
    })
}

fn live_body() -> serde_json::Value {
    json!({
        "prop_x": "Temperature",
        "prop_y": "Seebeck coefficient",
        "unit_x": "K",
        "unit_y": "V/K",
        "data": {
            "x": [[1, 2], [3]],
            "y": [[5, 6], [7]],
            "updated_at": ["2025-05-30T10:02:26.505Z", "2025-06-02T04:50:51.331000"],
            "SID": ["B", "D"],
            "figure_id": ["fig-b", "fig-d"],
            "sample_id": ["s-b", "s-d"],
            "composition": ["Bi2Te3", "PbTe"]
        }
    })
}

// ── Bulk snapshot ───────────────────────────────────────────────

#[tokio::test]
async fn bulk_snapshot_fetches_pair_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Temperature-Seebeck%20coefficient.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = bulk(&server)
        .fetch_snapshot("Temperature", "Seebeck coefficient")
        .await
        .unwrap();

    let sids: Vec<&str> = snapshot.iter().map(|series| series.sid()).collect();
    assert_eq!(sids, vec!["A", "C"]);
    // Snapshot timestamps are passed through untouched.
    assert_eq!(snapshot.as_slice()[0].updated_at(), "2024-01-01T00:00:00+09:00");
}

#[tokio::test]
async fn bulk_snapshot_non_2xx_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such pair"))
        .mount(&server)
        .await;

    let err = bulk(&server)
        .fetch_snapshot("Temperature", "ZT")
        .await
        .unwrap_err();

    match err {
        GraphError::Fetch { reason, .. } => assert!(reason.contains("404")),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn bulk_snapshot_error_reason_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(1_000_000)))
        .mount(&server)
        .await;

    let err = bulk(&server)
        .fetch_snapshot("Temperature", "ZT")
        .await
        .unwrap_err();

    match err {
        GraphError::Fetch { reason, .. } => {
            assert!(reason.contains("500"));
            assert!(reason.contains("1000000 bytes total"));
            assert!(reason.len() < 1_000, "reason is {} bytes", reason.len());
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn bulk_snapshot_malformed_json_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": [1, 2"))
        .mount(&server)
        .await;

    let err = bulk(&server)
        .fetch_snapshot("Temperature", "ZT")
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Fetch { .. }));
}

#[tokio::test]
async fn bulk_snapshot_rejects_windowed_query() {
    let server = MockServer::start().await;

    let err = bulk(&server)
        .fetch_incremental("Temperature", "ZT", "K", "-", None)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::NotSupported { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Live incremental ────────────────────────────────────────────

#[tokio::test]
async fn live_incremental_sends_window_and_normalizes_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("property_x", "Temperature"))
        .and(query_param("property_y", "Seebeck coefficient"))
        .and(query_param("unit_x", "K"))
        .and(query_param("unit_y", "V/K"))
        .and(query_param("date_from", "2025-05-29T00:00:00+09:00"))
        .and(query_param("date_to", "2025-06-03T00:00:00+09:00"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let window = FetchWindow::new(
        tokyo().with_ymd_and_hms(2025, 5, 29, 0, 0, 0).unwrap(),
        tokyo().with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap(),
    );
    let incremental = live(&server, 5)
        .fetch_incremental("Temperature", "Seebeck coefficient", "K", "V/K", Some(window))
        .await
        .unwrap();

    let timestamps: Vec<&str> = incremental.iter().map(|series| series.updated_at()).collect();
    assert_eq!(
        timestamps,
        vec!["2025-05-30T19:02:26.505+09:00", "2025-06-02T13:50:51.331+09:00"]
    );
    assert_eq!(incremental.as_slice()[0].composition(), Some("Bi2Te3"));
}

#[tokio::test]
async fn live_incremental_defaults_to_yesterdays_midnight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .mount(&server)
        .await;

    live(&server, 5)
        .fetch_incremental("Temperature", "ZT", "K", "-", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let date_from = requests[0]
        .url
        .query_pairs()
        .find(|(key, _)| key == "date_from")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert!(date_from.ends_with("T00:00:00+09:00"), "{}", date_from);
}

#[tokio::test]
async fn live_incremental_missing_metadata_is_schema_error() {
    let server = MockServer::start().await;
    let mut body = live_body();
    body["data"].as_object_mut().unwrap().remove("SID");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = live(&server, 5)
        .fetch_incremental("Temperature", "ZT", "K", "-", None)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Schema(_)));
}

#[tokio::test]
async fn live_incremental_timeout_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(live_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = live(&server, 1)
        .fetch_incremental("Temperature", "ZT", "K", "-", None)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Fetch { .. }));
}

#[tokio::test]
async fn live_snapshot_makes_no_request() {
    let server = MockServer::start().await;

    let snapshot = live(&server, 5)
        .fetch_snapshot("Temperature", "ZT")
        .await
        .unwrap();

    assert!(snapshot.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── End to end ──────────────────────────────────────────────────

async fn mount_sources(bulk_server: &MockServer, live_server: &MockServer, live_status: u16) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body()))
        .mount(bulk_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(live_status).set_body_json(live_body()))
        .mount(live_server)
        .await;
}

#[tokio::test]
async fn service_merges_snapshot_then_incremental() {
    let bulk_server = MockServer::start().await;
    let live_server = MockServer::start().await;
    mount_sources(&bulk_server, &live_server, 200).await;
    let service = GraphDataService::new(
        Arc::new(bulk(&bulk_server)),
        Arc::new(live(&live_server, 5)),
    );

    let merged = service
        .get_merged_graph_data("Temperature", "Seebeck coefficient", "K", "V/K", None)
        .await
        .unwrap();

    let sids: Vec<&str> = merged.iter().map(|entry| entry.series.sid()).collect();
    assert_eq!(sids, vec!["A", "C", "B", "D"]);

    let condition = HighlightCondition::date_range("2024-01-01", "2024-01-01");
    let classified = service
        .get_merged_graph_data("Temperature", "Seebeck coefficient", "K", "V/K", Some(&condition))
        .await
        .unwrap();

    let sids: Vec<&str> = classified.iter().map(|entry| entry.series.sid()).collect();
    assert_eq!(sids, vec!["C", "B", "D", "A"]);
    assert_eq!(classified.highlighted_count(), 1);
}

#[tokio::test]
async fn service_fails_whole_merge_when_live_fails() {
    let bulk_server = MockServer::start().await;
    let live_server = MockServer::start().await;
    mount_sources(&bulk_server, &live_server, 503).await;
    let service = GraphDataService::new(
        Arc::new(bulk(&bulk_server)),
        Arc::new(live(&live_server, 5)),
    );

    let err = service
        .get_merged_graph_data("Temperature", "Seebeck coefficient", "K", "V/K", None)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Fetch { .. }));
}
