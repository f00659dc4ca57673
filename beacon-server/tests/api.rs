//! HTTP API tests against a live server bound to a random local port

use std::sync::Arc;
use std::time::Duration;

use beacon_core::domain::build::BuildStatus;
use beacon_core::domain::viewer::Viewer;
use beacon_core::dto::dashboard::{DashboardView, TeamGroup, VIEWER_HEADER};
use beacon_core::testing::{exposed, finished, job, pipeline, running, team};
use beacon_server::api;
use beacon_server::service::{DashboardFeed, SystemClock};
use beacon_server::source::InMemoryFactSource;

struct TestServer {
    base_url: String,
    source: Arc<InMemoryFactSource>,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let source = Arc::new(InMemoryFactSource::new(vec![
            team(
                "main",
                vec![
                    pipeline(
                        "private",
                        vec![job("unit", vec![finished(1, BuildStatus::Failed, 0)])],
                    ),
                    exposed(pipeline(
                        "public",
                        vec![
                            job("unit", vec![finished(1, BuildStatus::Succeeded, 0)]),
                            job("deploy", vec![running(1, 5)]),
                        ],
                    )),
                ],
            ),
            team("other", vec![pipeline("hidden", vec![])]),
        ]));

        let feed = DashboardFeed::new(
            source.clone(),
            Arc::new(SystemClock),
            Duration::from_millis(100),
        );
        let app = api::create_router(feed);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        Self {
            base_url: format!("http://{}", addr),
            source,
            client: reqwest::Client::new(),
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;

    let response = server.get("/health").send().await.unwrap();
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_member_dashboard() {
    let server = TestServer::start().await;

    let view: DashboardView = server
        .get("/api/v1/dashboard")
        .header(VIEWER_HEADER, "main")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.viewer, Viewer::Team("main".to_string()));
    assert_eq!(view.teams.len(), 1);

    let group = &view.teams[0];
    assert!(group.own);
    assert_eq!(group.pipelines[0].name, "private");
    assert!(
        group.pipelines[0]
            .failing_for
            .as_deref()
            .unwrap()
            .starts_with("private failing for: ")
    );
    assert_eq!(group.pipelines[1].running_jobs, vec!["deploy".to_string()]);
}

#[tokio::test]
async fn test_anonymous_dashboard() {
    let server = TestServer::start().await;

    let response = server.get("/api/v1/dashboard").send().await.unwrap();
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["viewer"]["kind"], "anonymous");
    assert_eq!(json["teams"].as_array().unwrap().len(), 1);
    assert_eq!(json["teams"][0]["pipelines"][0]["name"], "public");
    assert_eq!(json["teams"][0]["pipelines"][0]["color"], "green");
}

#[tokio::test]
async fn test_team_group_endpoint() {
    let server = TestServer::start().await;

    let group: TeamGroup = server
        .get("/api/v1/dashboard/teams/other")
        .header(VIEWER_HEADER, "other")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(group.name, "other");
    assert_eq!(group.pipelines.len(), 1);

    let response = server
        .get("/api/v1/dashboard/teams/other")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_unavailable_source_returns_503() {
    let server = TestServer::start().await;
    server.source.set_unavailable(true);

    let response = server.get("/api/v1/dashboard").send().await.unwrap();
    assert_eq!(response.status(), 503);

    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_stream_sends_dashboard_events() {
    let server = TestServer::start().await;

    let mut response = server
        .get("/api/v1/dashboard/stream")
        .header(VIEWER_HEADER, "main")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );

    let mut received = String::new();
    let read = tokio::time::timeout(Duration::from_secs(5), async {
        while !received.contains("\n\n") {
            match response.chunk().await.unwrap() {
                Some(chunk) => received.push_str(&String::from_utf8_lossy(&chunk)),
                None => break,
            }
        }
    })
    .await;

    assert!(read.is_ok(), "no event within 5s");
    assert!(received.contains("event: dashboard"));
    assert!(received.contains("\"private\""));
}
