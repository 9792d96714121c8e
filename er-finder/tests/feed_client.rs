//! Integration tests for `FeedClient` using wiremock HTTP mocks.

use std::time::Duration;

use er_finder::feed::{FeedClient, FeedConfig, FeedError, FeedKind, FeedSource};
use er_finder::geo::Coordinate;
use er_finder::ranking::{RankError, RankingConfig, rank};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FACILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>
  <body>
    <items>
      <item>
        <hpid>A1</hpid><dutyName>가까운병원</dutyName>
        <wgs84Lat>37.5</wgs84Lat><wgs84Lon>127.0</wgs84Lon>
      </item>
      <item>
        <hpid>A2</hpid><dutyName>먼병원</dutyName>
        <wgs84Lat>37.6</wgs84Lat><wgs84Lon>127.0</wgs84Lon>
      </item>
    </items>
    <numOfRows>100</numOfRows><pageNo>1</pageNo><totalCount>2</totalCount>
  </body>
</response>"#;

const BEDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>
  <body>
    <items>
      <item><hpid>A2</hpid><hvicc>2</hvicc><hv7>Y</hv7></item>
      <item><hpid>A1</hpid><hvicc>1</hvicc><hv7>Y</hv7></item>
    </items>
  </body>
</response>"#;

fn test_client(base_url: &str) -> FeedClient {
    let config = FeedConfig::new("ab+c/d==")
        .with_base_url(format!("{base_url}/svc"))
        .with_timeout(1);
    FeedClient::new(config).expect("client construction should not fail")
}

async fn mount_feed(server: &MockServer, kind: FeedKind, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/svc/{}", kind.path())))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_sends_encoded_key_and_paging() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/svc/getEgytListInfoInqire"))
        .and(query_param("serviceKey", "ab+c/d=="))
        .and(query_param("numOfRows", "100"))
        .and(query_param("pageNo", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FACILITIES))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let body = client.fetch(FeedKind::Facilities).await.expect("should fetch");

    assert!(body.contains("<hpid>A1</hpid>"));
}

#[tokio::test]
async fn server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("SERVICE ERROR"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch(FeedKind::Beds)
        .await
        .unwrap_err();

    match err {
        FeedError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "SERVICE ERROR");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_key_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch(FeedKind::Facilities)
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Unauthorized));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(BEDS)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch(FeedKind::Beds)
        .await
        .unwrap_err();

    match err {
        FeedError::Http(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn ranks_live_feeds_end_to_end() {
    let server = MockServer::start().await;
    mount_feed(&server, FeedKind::Facilities, FACILITIES).await;
    mount_feed(&server, FeedKind::Beds, BEDS).await;

    let client = test_client(&server.uri());
    let user = Coordinate::new(37.5, 127.0).unwrap();
    let ranked = rank(&client, user, &RankingConfig::default())
        .await
        .expect("should rank");

    let names: Vec<_> = ranked.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, ["가까운병원", "먼병원"]);
    assert_eq!(ranked[0].distance.to_string(), "0.0");
    assert_eq!(ranked[1].intensive_care_beds, 2);
}

#[tokio::test]
async fn one_failing_feed_fails_the_ranking() {
    let server = MockServer::start().await;
    mount_feed(&server, FeedKind::Facilities, FACILITIES).await;

    Mock::given(method("GET"))
        .and(path(format!("/svc/{}", FeedKind::Beds.path())))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let user = Coordinate::new(37.5, 127.0).unwrap();
    let err = rank(&client, user, &RankingConfig::default())
        .await
        .unwrap_err();

    match err {
        RankError::Fetch { feed, source } => {
            assert_eq!(feed, FeedKind::Beds);
            assert!(matches!(source, FeedError::Api { status: 503, .. }));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}
