//! Stores driven over real HTTP against a mock server

use docy_core::models::{ProjectIn, ProjectType, ProjectUpdate, TaskIn};
use docy_core::Config;
use docy_store::Stores;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "framework": "",
        "project_type": "code"
    })
}

fn stores_for(server: &MockServer) -> Stores {
    let config = Config {
        api_base: server.uri(),
        timeout_secs: 5,
        max_retries: 0,
        ..Config::default()
    };
    Stores::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_create_project_then_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/"))
        .and(body_json(json!({"name": "demo", "project_type": "code", "framework": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(project(1, "demo")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project(1, "demo")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stores = stores_for(&mock_server);
    stores
        .projects
        .create(&ProjectIn::new("demo", ProjectType::Code, ""))
        .await
        .unwrap();

    let state = stores.projects.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "demo");
    assert!(!state.pending);
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn test_update_selected_project_refreshes_in_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project(5, "renamed")))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/projects/5"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(project(5, "renamed")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project(5, "renamed")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stores = stores_for(&mock_server);
    stores.projects.fetch_one(5).await.unwrap();
    let update = ProjectUpdate {
        name: Some("renamed".to_string()),
        ..Default::default()
    };
    stores.projects.update(5, &update).await.unwrap();

    let received: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect();
    assert_eq!(
        received,
        vec![
            "GET /api/v1/projects/5",
            "PUT /api/v1/projects/5",
            "GET /api/v1/projects/5",
            "GET /api/v1/projects/",
        ]
    );
}

#[tokio::test]
async fn test_server_error_is_recorded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "Database unavailable"})),
        )
        .mount(&mock_server)
        .await;

    let stores = stores_for(&mock_server);
    assert!(stores.tasks.fetch_all().await.is_err());

    let state = stores.tasks.snapshot();
    assert!(state.items.is_empty());
    assert!(!state.pending);
    assert_eq!(state.error_message(), Some("Database unavailable"));
    assert_eq!(state.last_error.unwrap().status(), Some(500));
}

#[tokio::test]
async fn test_create_task_returns_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(17)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&mock_server)
        .await;

    let stores = stores_for(&mock_server);
    let id = stores
        .tasks
        .create(&TaskIn::new("write docs", "", 2))
        .await
        .unwrap();

    assert_eq!(id, 17);
    assert!(stores.tasks.items().is_empty());
    assert!(stores.tasks.last_error().is_none());
}
