use dangle_client::{DangleError, RateLimit, ZoneClient};
use dangle_core::{AliasValue, ListRecordSetsRequest, RecordSetSource, RecordValues, StartPosition};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RRSET_PATH: &str = "/2013-04-01/hostedzone/Z1D633PJN98FT9/rrset";

fn client_for(server: &MockServer) -> ZoneClient {
    ZoneClient::builder()
        .endpoint(server.uri())
        .token("test-token")
        .rate_limit(None)
        .build()
        .unwrap()
}

#[tokio::test]
async fn first_page_sends_no_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param_is_missing("name"))
        .and(query_param_is_missing("type"))
        .and(query_param_is_missing("identifier"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                {
                    "Name": "api.example.com.",
                    "Type": "A",
                    "TTL": 60,
                    "ResourceRecords": [{"Value": "203.0.113.5"}]
                }
            ],
            "IsTruncated": false,
            "MaxItems": "100"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .list_record_sets(&ListRecordSetsRequest::first_page("Z1D633PJN98FT9"))
        .await
        .unwrap();

    assert!(!page.is_truncated);
    assert_eq!(page.resource_record_sets.len(), 1);
    assert!(matches!(
        page.resource_record_sets[0].resource_records,
        Some(RecordValues::Structured(ref values)) if values[0].value == "203.0.113.5"
    ));
}

#[tokio::test]
async fn continuation_forwards_whole_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .and(query_param("name", "weighted.example.com."))
        .and(query_param("type", "A"))
        .and(query_param("identifier", "blue"))
        .and(query_param("maxitems", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [],
            "IsTruncated": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ListRecordSetsRequest {
        zone_id: "/hostedzone/Z1D633PJN98FT9".into(),
        start: Some(StartPosition {
            name: "weighted.example.com.".into(),
            record_type: Some("A".into()),
            identifier: Some("blue".into()),
        }),
        max_items: Some(2),
    };

    let page = client.list_record_sets(&request).await.unwrap();
    assert!(page.resource_record_sets.is_empty());
}

#[tokio::test]
async fn missing_zone_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "Error": {"Code": "NoSuchHostedZone", "Message": "No hosted zone found"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .record_sets()
        .list("Z1D633PJN98FT9")
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, DangleError::ZoneNotFound { ref zone_id } if zone_id == "Z1D633PJN98FT9"));
    assert!(err.is_provider_error());
}

#[tokio::test]
async fn rejected_credential_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .record_sets()
        .list("Z1D633PJN98FT9")
        .send()
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
}

#[tokio::test]
async fn throttling_is_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Error": {"Code": "Throttling", "Message": "Rate exceeded"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .record_sets()
        .list("Z1D633PJN98FT9")
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, DangleError::RateLimited { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn server_error_keeps_code_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "try later"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .record_sets()
        .list("Z1D633PJN98FT9")
        .send()
        .await
        .unwrap_err();

    match err {
        DangleError::Api { code, message } => {
            assert_eq!(code, 503);
            assert_eq!(message, "try later");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn odd_records_still_decode_with_their_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RRSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                {"Name": "bad.example.com.", "Type": "A", "AliasTarget": {"HostedZoneId": "Z2"}},
                {"Name": "typed.example.com.", "Type": ["A"], "TTL": 1.5, "ResourceRecords": []},
                {"Name": "ok.example.com.", "Type": "A", "TTL": 60, "ResourceRecords": [{"Value": "203.0.113.5"}]}
            ],
            "IsTruncated": true,
            "NextRecordName": "zz.example.com.",
            "NextRecordType": "A"
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_record_sets(&ListRecordSetsRequest::first_page("Z1D633PJN98FT9"))
        .await
        .unwrap();

    let sets = &page.resource_record_sets;
    assert_eq!(sets.len(), 3);
    assert!(matches!(sets[0].alias_target, Some(AliasValue::Unstructured(_))));
    assert_eq!(sets[1].record_type, r#"["A"]"#);
    assert_eq!(sets[1].ttl, None);
    assert_eq!(sets[2].ttl, Some(60));
    assert_eq!(page.next_position().unwrap().name, "zz.example.com.");
}

#[tokio::test]
async fn garbage_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<xml/>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .record_sets()
        .list("Z1D633PJN98FT9")
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, DangleError::Decode(_)));
}

#[tokio::test]
async fn rate_limited_client_still_completes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [],
            "IsTruncated": false
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = ZoneClient::builder()
        .endpoint(server.uri())
        .rate_limit(RateLimit::per_second(50))
        .build()
        .unwrap();

    for _ in 0..2 {
        client
            .list_record_sets(&ListRecordSetsRequest::first_page("Z1D633PJN98FT9"))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn empty_zone_id_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .record_sets()
        .list("  ")
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, DangleError::Config(_)));
}
