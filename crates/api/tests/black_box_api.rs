use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderName;
use reqwest::StatusCode;
use serde_json::json;

use netapi_api::app::{self, services::AppServices};
use netapi_api::config::Config;
use netapi_api::identity::MissingRequestIdPolicy;
use netapi_auth::{admin, AdministrativeGrant, Capability};
use netapi_core::RecordId;
use netapi_grupo::{GrupoError, Permission};
use netapi_infra::{InMemoryGrantSource, InMemoryPermissionRepository, PermissionRepository};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: Config, services: AppServices) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = app::build_app(&config, Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn seeded() -> Self {
        Self::spawn(Config::default(), seeded_services()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn seeded_services() -> AppServices {
    let perms = InMemoryPermissionRepository::with_permissions([
        Permission::new(RecordId::new(1), "administracao_usuarios").unwrap(),
        Permission::new(RecordId::new(2), "cadastro_de_equipamentos").unwrap(),
        Permission::new(RecordId::new(3), "cadastro_de_vlans").unwrap(),
    ]);

    let grants = InMemoryGrantSource::new();
    grants.grant(
        "ALICE",
        AdministrativeGrant::new("admins", admin::USER_ADMINISTRATION, true, true),
    );
    grants.grant(
        "CAROL",
        AdministrativeGrant::new("network", Capability::from_static("cadastro_de_vlans"), true, true),
    );

    AppServices::new(Arc::new(perms), Arc::new(grants))
}

struct FailingRepository;

#[async_trait]
impl PermissionRepository for FailingRepository {
    async fn list_all(&self) -> Result<Vec<Permission>, GrupoError> {
        Err(GrupoError::data_source("connection refused"))
    }
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::seeded().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn authorized_api_user_lists_all_permissions() {
    let srv = TestServer::seeded().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/perms/all", srv.base_url))
        .basic_auth("alice", Some("secret"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"perms": [
            {"id": 1, "function": "administracao_usuarios"},
            {"id": 2, "function": "cadastro_de_equipamentos"},
            {"id": 3, "function": "cadastro_de_vlans"},
        ]})
    );
}

#[tokio::test]
async fn listing_is_served_as_xml_when_accepted() {
    let srv = TestServer::seeded().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/perms/all", srv.base_url))
        .basic_auth("alice", Some("secret"))
        .header("Accept", "application/xml")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let xml = res.text().await.unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><networkapi versao="1.0">"#));
    assert_eq!(xml.matches("<perms>").count(), 3);
    assert!(xml.contains("<perms><function>cadastro_de_vlans</function><id>3</id></perms>"));
}

#[tokio::test]
async fn session_user_with_grant_is_authorized() {
    let srv = TestServer::seeded().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/perms/all", srv.base_url))
        .header("NetworkAPI-Username", "alice")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn user_without_the_capability_is_forbidden() {
    let srv = TestServer::seeded().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/perms/all", srv.base_url))
        .basic_auth("carol", Some("secret"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_authorized");
}

#[tokio::test]
async fn request_without_identity_is_forbidden() {
    let srv = TestServer::seeded().await;

    let res = reqwest::get(format!("{}/perms/all", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_authorization_is_bad_request() {
    let srv = TestServer::seeded().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/perms/all", srv.base_url))
        .header("Authorization", "Basic !!not-base64!!")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "malformed_credentials");
}

#[tokio::test]
async fn data_source_failure_is_a_coded_error() {
    let services = AppServices::new(
        Arc::new(FailingRepository),
        seeded_services().grants.clone(),
    );
    let srv = TestServer::spawn(Config::default(), services).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/perms/all", srv.base_url))
        .basic_auth("alice", Some("secret"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "business_error");
    assert_eq!(body["code"], 1);
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let srv = TestServer::seeded().await;

    let res = reqwest::get(format!("{}/perms/none", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn whoami_reports_the_resolved_context() {
    let srv = TestServer::seeded().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/whoami?verbose=1", srv.base_url))
        .basic_auth("alice", Some("secret"))
        .header("X-Request-Context", "change-1234")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"], "ALICE");
    assert_eq!(body["is_api"], true);
    assert_eq!(body["path"], "/whoami?verbose=1");
    assert_eq!(body["context"], "change-1234");
    assert_eq!(body["request_id"].as_str().unwrap().len(), 22);
}

#[tokio::test]
async fn whoami_defaults_to_sentinels() {
    let srv = TestServer::seeded().await;

    let body: serde_json::Value = reqwest::get(format!("{}/whoami", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["user"], "NoUser");
    assert_eq!(body["is_api"], false);
    assert_eq!(body["context"], "NoContext");
}

#[tokio::test]
async fn trusted_request_id_header_is_echoed() {
    let mut config = Config::default();
    config.identity.request_id_header = Some(HeaderName::from_static("x-request-id"));
    let srv = TestServer::spawn(config, seeded_services()).await;

    let client = reqwest::Client::new();
    let body: serde_json::Value = client
        .get(format!("{}/whoami", srv.base_url))
        .header("X-Request-Id", "abc-123")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["request_id"], "abc-123");
}

#[tokio::test]
async fn missing_trusted_header_yields_sentinel() {
    let mut config = Config::default();
    config.identity.request_id_header = Some(HeaderName::from_static("x-request-id"));
    let srv = TestServer::spawn(config, seeded_services()).await;

    let body: serde_json::Value = reqwest::get(format!("{}/whoami", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["request_id"], "NoRequestId");
}

#[tokio::test]
async fn missing_trusted_header_can_be_generated() {
    let mut config = Config::default();
    config.identity.request_id_header = Some(HeaderName::from_static("x-request-id"));
    config.identity.missing_request_id = MissingRequestIdPolicy::Generate;
    let srv = TestServer::spawn(config, seeded_services()).await;

    let body: serde_json::Value = reqwest::get(format!("{}/whoami", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["request_id"].as_str().unwrap().len(), 22);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_keep_their_own_context() {
    let srv = Arc::new(TestServer::seeded().await);
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..40 {
        let client = client.clone();
        let srv = srv.clone();
        tasks.push(tokio::spawn(async move {
            let user = format!("user-{i}");
            let ctx = format!("ctx-{i}");
            let body: serde_json::Value = client
                .get(format!("{}/whoami", srv.base_url))
                .header("NetworkAPI-Username", &user)
                .header("X-Request-Context", &ctx)
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();

            assert_eq!(body["user"], user);
            assert_eq!(body["context"], ctx);
            body["request_id"].as_str().unwrap().to_string()
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    assert_eq!(ids.len(), 40);
}
