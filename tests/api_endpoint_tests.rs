//! Integration tests for the typed endpoint surface.
//!
//! Each test mounts a wiremock expectation for the endpoint's wire shape
//! (path, method, body) and asserts the typed decode on the way back.

use std::time::Duration;

use haven_api::{
    ApiError, ApiKey, AudioAnalysisRequest, BaseUrl, DataJobKind, DataJobStatus, HavenClient,
    HavenConfig, NewReport, NewSubscription, ReportCategory, ReportListParams, ReportStatus,
    RiskLevel, Severity, TextInput,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(server: &MockServer) -> HavenClient {
    let config = HavenConfig::builder()
        .api_key(ApiKey::new("hvn_0123456789abcdef").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .max_retries(1)
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    HavenClient::new(config).unwrap()
}

// ============================================================================
// Text Analysis
// ============================================================================

#[tokio::test]
async fn test_analyze_bullying_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/bullying"))
        .and(body_json(json!({
            "text": "nobody likes you, just leave",
            "child_age": 13
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "detected": true,
            "severity": "high",
            "confidence": 0.93,
            "categories": ["exclusion"],
            "spans": [{"start": 0, "end": 16, "label": "exclusion"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let input = TextInput::new("nobody likes you, just leave").child_age(13);
    let analysis = client.analyze_bullying(&input).await.unwrap();

    assert!(analysis.detected);
    assert_eq!(analysis.severity, Severity::High);
    assert_eq!(analysis.categories, vec!["exclusion"]);
    assert_eq!(analysis.spans[0].label, "exclusion");
}

#[tokio::test]
async fn test_analyze_grooming_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/grooming"))
        .and(body_json(json!({"text": "this is our little secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "detected": true,
            "risk_level": "moderate",
            "confidence": 0.74,
            "indicators": ["secrecy_request"]
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let analysis = client
        .analyze_grooming(&TextInput::new("this is our little secret"))
        .await
        .unwrap();

    assert_eq!(analysis.risk_level, RiskLevel::Moderate);
    assert_eq!(analysis.indicators, vec!["secrecy_request"]);
}

#[tokio::test]
async fn test_analyze_content_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "flagged": false,
            "scores": {"violence": 0.02, "hate": 0.01},
            "flagged_categories": []
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let analysis = client
        .analyze_content(&TextInput::new("see you at practice"))
        .await
        .unwrap();

    assert!(!analysis.flagged);
    assert!(analysis.flagged_categories.is_empty());
}

#[tokio::test]
async fn test_analyze_emotion_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/emotion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dominant": "sadness",
            "scores": {"sadness": 0.81, "anger": 0.1}
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let analysis = client
        .analyze_emotion(&TextInput::new("i just want to disappear"))
        .await
        .unwrap();

    assert_eq!(analysis.dominant, "sadness");
}

#[tokio::test]
async fn test_validation_error_carries_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/bullying"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "VAL_1101",
                "message": "text must not be empty",
                "details": {"text": ["must not be empty"]}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.analyze_bullying(&TextInput::new("")).await;

    match result {
        Err(ApiError::Validation { message, details }) => {
            assert_eq!(message, "text must not be empty");
            assert_eq!(details, Some(json!({"text": ["must not be empty"]})));
        }
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plan_restriction_error_carries_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/audio"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": "PLAN_2001",
                "message": "Audio analysis requires the Pro plan"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client
        .analyze_audio(AudioAnalysisRequest::new("clip.mp3", b"x".to_vec()))
        .await;

    match result {
        Err(ApiError::PlanRestriction { code, .. }) => {
            assert_eq!(code.as_deref(), Some("PLAN_2001"));
        }
        other => panic!("expected PlanRestriction error, got {other:?}"),
    }
}

// ============================================================================
// Media Analysis
// ============================================================================

#[tokio::test]
async fn test_analyze_audio_uploads_multipart_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/audio"))
        .and(body_string_contains("filename=\"report.mp3\""))
        .and(body_string_contains("Content-Type: audio/mpeg"))
        .and(body_string_contains("name=\"child_age\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transcript": "you are pathetic",
            "duration_seconds": 2.1,
            "bullying": {
                "detected": true,
                "severity": "medium",
                "confidence": 0.8
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let request = AudioAnalysisRequest::new("report.mp3", b"fake-audio".to_vec()).child_age(12);
    let analysis = client.analyze_audio(request).await.unwrap();

    assert_eq!(analysis.transcript.as_deref(), Some("you are pathetic"));
    assert_eq!(analysis.bullying.unwrap().severity, Severity::Medium);
}

#[tokio::test]
async fn test_analyze_image_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/image"))
        .and(body_string_contains("Content-Type: image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": {"flagged": false, "scores": {}},
            "ocr_text": null
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let analysis = client
        .analyze_image(haven_api::ImageAnalysisRequest::new(
            "shot.png",
            vec![0x89, 0x50],
        ))
        .await
        .unwrap();

    assert!(!analysis.content.flagged);
    assert!(analysis.ocr_text.is_none());
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_create_report_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reports"))
        .and(body_json(json!({
            "category": "bullying",
            "description": "repeated insults in chat"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "rep_1",
            "category": "bullying",
            "status": "open",
            "description": "repeated insults in chat",
            "created_at": "2025-01-15T10:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let report = client
        .create_report(&NewReport::new(
            ReportCategory::Bullying,
            "repeated insults in chat",
        ))
        .await
        .unwrap();

    assert_eq!(report.id, "rep_1");
    assert_eq!(report.status, ReportStatus::Open);
}

#[tokio::test]
async fn test_get_report_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/rep_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "rep_1",
            "category": "grooming",
            "status": "under_review",
            "description": "suspicious contact pattern",
            "created_at": "2025-01-15T10:30:00Z",
            "updated_at": "2025-01-16T09:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let report = client.get_report("rep_1").await.unwrap();

    assert_eq!(report.category, ReportCategory::Grooming);
    assert_eq!(report.status, ReportStatus::UnderReview);
    assert!(report.updated_at.is_some());
}

#[tokio::test]
async fn test_get_missing_report_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/rep_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "NF_4040", "message": "Report not found"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.get_report("rep_missing").await;

    match result {
        Err(ApiError::NotFound { message }) => assert_eq!(message, "Report not found"),
        other => panic!("expected NotFound error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_reports_sends_filters_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports"))
        .and(query_param("status", "open"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [{
                "id": "rep_9",
                "category": "other",
                "status": "open",
                "description": "misc",
                "created_at": "2025-01-15T10:30:00Z"
            }],
            "total": 41,
            "page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let page = client
        .list_reports(ReportListParams {
            status: Some(ReportStatus::Open),
            page: Some(2),
            ..ReportListParams::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 41);
    assert_eq!(page.reports.len(), 1);
}

// ============================================================================
// Webhook Subscriptions
// ============================================================================

#[tokio::test]
async fn test_create_subscription_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhooks"))
        .and(body_json(json!({
            "url": "https://example.com/hooks/haven",
            "events": ["report.created"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "sub_1",
            "url": "https://example.com/hooks/haven",
            "events": ["report.created"],
            "active": true,
            "created_at": "2025-01-15T10:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let subscription = client
        .create_subscription(&NewSubscription::new(
            "https://example.com/hooks/haven",
            vec!["report.created".to_string()],
        ))
        .await
        .unwrap();

    assert_eq!(subscription.id, "sub_1");
    assert!(subscription.active);
}

#[tokio::test]
async fn test_list_subscriptions_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscriptions": [
                {
                    "id": "sub_1",
                    "url": "https://example.com/a",
                    "events": ["report.created"],
                    "active": true,
                    "created_at": "2025-01-15T10:30:00Z"
                },
                {
                    "id": "sub_2",
                    "url": "https://example.com/b",
                    "events": ["usage.threshold"],
                    "active": false,
                    "created_at": "2025-01-16T10:30:00Z"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let subscriptions = client.list_subscriptions().await.unwrap();

    assert_eq!(subscriptions.len(), 2);
    assert_eq!(subscriptions[1].id, "sub_2");
}

#[tokio::test]
async fn test_delete_subscription_succeeds_on_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/webhooks/sub_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    client.delete_subscription("sub_1").await.unwrap();
}

// ============================================================================
// GDPR
// ============================================================================

#[tokio::test]
async fn test_request_data_export_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gdpr/export"))
        .and(body_json(json!({"user_id": "u_99"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "job_1",
            "kind": "export",
            "status": "pending",
            "user_id": "u_99",
            "requested_at": "2025-01-15T10:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let job = client.request_data_export("u_99").await.unwrap();

    assert_eq!(job.kind, DataJobKind::Export);
    assert_eq!(job.status, DataJobStatus::Pending);
}

#[tokio::test]
async fn test_get_data_job_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gdpr/jobs/job_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job_1",
            "kind": "export",
            "status": "completed",
            "user_id": "u_99",
            "requested_at": "2025-01-15T10:30:00Z",
            "completed_at": "2025-01-15T10:45:00Z",
            "download_url": "https://exports.haven.dev/job_1.zip"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let job = client.get_data_job("job_1").await.unwrap();

    assert_eq!(job.status, DataJobStatus::Completed);
    assert!(job.download_url.is_some());
}

#[tokio::test]
async fn test_request_data_deletion_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gdpr/delete"))
        .and(body_json(json!({"user_id": "u_100"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "job_2",
            "kind": "deletion",
            "status": "pending",
            "user_id": "u_100",
            "requested_at": "2025-01-15T10:30:00Z"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let job = client.request_data_deletion("u_100").await.unwrap();

    assert_eq!(job.kind, DataJobKind::Deletion);
}

// ============================================================================
// Cross-cutting
// ============================================================================

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/emotion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dominant": "joy",
            "scores": {"joy": 0.9}
        })))
        .expect(4)
        .mount(&server)
        .await;

    let client = create_test_client(&server);

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .analyze_emotion(&TextInput::new(format!("message {n}")))
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    // All four calls fed the shared metadata tracker
    assert!(client.last_latency().is_some());
}
