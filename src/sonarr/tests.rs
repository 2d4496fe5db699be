//! Tests for the Sonarr client

use super::*;
use crate::error::Error;
use crate::pagination::PageRequest;
use crate::types::SortDirection;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sonarr_for(server: &MockServer) -> Sonarr {
    Sonarr::new(Config::new(server.uri(), "secret")).unwrap()
}

fn records(ids: std::ops::Range<i64>) -> Vec<Value> {
    ids.map(|id| json!({"id": id, "title": format!("Show.S01E{id:02}"), "status": "downloading"}))
        .collect()
}

fn queue_page(page: usize, page_size: usize, total: usize, ids: std::ops::Range<i64>) -> Value {
    json!({
        "page": page,
        "pageSize": page_size,
        "sortKey": "timeleft",
        "sortDirection": "ascending",
        "totalRecords": total,
        "records": records(ids)
    })
}

#[tokio::test]
async fn test_get_queue_page_sets_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "20"))
        .and(query_param("sortKey", "timeleft"))
        .and(query_param("includeUnknownSeriesItems", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_page(1, 20, 2, 0..2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let queue = sonarr_for(&mock_server)
        .get_queue_page(PageRequest::new(1, 20))
        .await
        .unwrap();

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.records[1].title, "Show.S01E01");
    assert_eq!(queue.sort_direction, SortDirection::Ascending);
}

#[tokio::test]
async fn test_get_queue_page_keeps_caller_sort_and_forces_unknown_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("sortKey", "title"))
        .and(query_param("sortDirection", "descending"))
        .and(query_param("includeUnknownSeriesItems", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_page(1, 10, 0, 0..0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = PageRequest::new(1, 10)
        .sorted_by("title", SortDirection::Descending)
        .param(INCLUDE_UNKNOWN_SERIES, "false");

    let queue = sonarr_for(&mock_server)
        .get_queue_page(request)
        .await
        .unwrap();
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_get_queue_page_decode_error_names_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = sonarr_for(&mock_server)
        .get_queue_page(PageRequest::new(1, 10))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("api.Get(v3/queue): Failed to decode response"));
}

#[tokio::test]
async fn test_get_queue_all_records_in_three_pages() {
    let mock_server = MockServer::start().await;

    for (page, size, ids) in [(1, 10, 0..10), (2, 10, 10..20), (3, 5, 20..25)] {
        Mock::given(method("GET"))
            .and(path("/api/v3/queue"))
            .and(query_param("page", page.to_string()))
            .and(query_param("pageSize", size.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(queue_page(page, size, 25, ids)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let queue = sonarr_for(&mock_server).get_queue(0, 10).await.unwrap();

    assert_eq!(queue.len(), 25);
    assert_eq!(queue.total_records, 25);
    assert_eq!(queue.page_size, 5);
    assert_eq!(
        queue.records.iter().map(|r| r.id).collect::<Vec<_>>(),
        (0..25).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_get_queue_desired_count_single_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_page(1, 5, 25, 0..5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let queue = sonarr_for(&mock_server).get_queue(5, 10).await.unwrap();

    assert_eq!(queue.len(), 5);
    assert_eq!(queue.total_records, 25);
}

#[tokio::test]
async fn test_get_queue_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "pageSize": 500,
            "totalRecords": 0,
            "records": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let queue = sonarr_for(&mock_server).get_queue(0, 0).await.unwrap();

    assert!(queue.is_empty());
    assert_eq!(queue.total_records, 0);
}

#[tokio::test]
async fn test_get_queue_server_error_discards_partial() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_page(1, 10, 25, 0..10)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .mount(&mock_server)
        .await;

    let err = sonarr_for(&mock_server).get_queue(0, 10).await.unwrap_err();

    assert!(matches!(err, Error::Endpoint { .. }));
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_cancelled());
}

#[tokio::test]
async fn test_get_queue_cancelled_mid_loop() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_page(1, 10, 25, 0..10)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(queue_page(2, 10, 25, 10..20))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_page(3, 5, 25, 20..25)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let sonarr = sonarr_for(&mock_server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let err = sonarr.get_queue_with_cancel(0, 10, &cancel).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn test_get_queue_sorted_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/queue"))
        .and(query_param("sortKey", "progress"))
        .and(query_param("protocol", "torrent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_page(1, 3, 3, 0..3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let template = PageRequest::default()
        .sorted_by("progress", SortDirection::Ascending)
        .param("protocol", "torrent");
    let queue = sonarr_for(&mock_server)
        .get_queue_sorted(&template, 0, 0, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(queue.len(), 3);
}

#[tokio::test]
async fn test_delete_queue_record_blacklist() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/queue/42"))
        .and(query_param("blacklist", "true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/queue/43"))
        .and(query_param("blacklist", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sonarr = sonarr_for(&mock_server);
    sonarr
        .delete_queue_record(42, DeleteQueueRecordParams { blacklist: true })
        .await
        .unwrap();
    sonarr
        .delete_queue_record(43, DeleteQueueRecordParams::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_queue_record_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/queue/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message": "NotFound"}"#))
        .mount(&mock_server)
        .await;

    let err = sonarr_for(&mock_server)
        .delete_queue_record(7, DeleteQueueRecordParams::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"api.Delete(v3/queue/7): HTTP 404: {"message": "NotFound"}"#
    );
}

#[tokio::test]
async fn test_delete_queue_record_cancelled_in_flight() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/queue/8"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let sonarr = sonarr_for(&mock_server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = sonarr
        .delete_queue_record_with_cancel(8, DeleteQueueRecordParams::default(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn test_system_status_uses_v3() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "4.0.1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = sonarr_for(&mock_server).get_system_status().await.unwrap();
    assert_eq!(status.version, "4.0.1");
}

#[test]
fn test_queue_record_decodes() {
    let record: QueueRecord = serde_json::from_value(json!({
        "id": 1,
        "seriesId": 12,
        "episodeId": 340,
        "language": {"id": 1, "name": "English"},
        "quality": {
            "quality": {"id": 3, "name": "WEBDL-1080p", "source": "web", "resolution": 1080},
            "revision": {"version": 1, "real": 0, "isRepack": false}
        },
        "size": 1_500_000_000.0,
        "title": "Show.S01E01.1080p",
        "sizeleft": 250_000_000.0,
        "timeleft": "00:05:00",
        "estimatedCompletionTime": "2024-01-02T03:09:05Z",
        "status": "downloading",
        "trackedDownloadStatus": "ok",
        "trackedDownloadState": "downloading",
        "statusMessages": [{"title": "Show.S01E01", "messages": ["slow"]}],
        "downloadId": "SABnzbd_nzo_abc",
        "protocol": "usenet",
        "downloadClient": "SABnzbd",
        "indexer": "NZBgeek",
        "outputPath": "/downloads/Show.S01E01"
    }))
    .unwrap();

    assert_eq!(record.series_id, 12);
    assert_eq!(record.language.unwrap().name, "English");
    assert_eq!(
        record.quality.unwrap().quality.unwrap().name,
        "WEBDL-1080p"
    );
    assert_eq!(record.status_messages[0].messages, vec!["slow"]);
    assert!(record.estimated_completion_time.is_some());
}
