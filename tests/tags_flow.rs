//! Integration tests for tags, smartgroups, profiles, and apps using
//! wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ws1uem::apps::Apps;
use ws1uem::client::UemClient;
use ws1uem::profiles::Profiles;
use ws1uem::smartgroups::{SmartGroupDefinition, Smartgroups};
use ws1uem::tags::Tags;

fn mock_uem(server: &MockServer) -> UemClient {
    UemClient::with_base_url(&server.uri(), "TENANTCODE", "admin", "secret")
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("failed to build runtime")
}

// ── Tags ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_device_sends_the_bulk_values_envelope() {
    let server = MockServer::start().await;
    let tags = Tags::new(mock_uem(&server));

    Mock::given(method("POST"))
        .and(path("/api/mdm/tags/42/adddevices"))
        .and(body_json(json!({"BulkValues": {"Value": [12345]}})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"AcceptedItems": 1, "FailedItems": 0})),
        )
        .mount(&server)
        .await;

    let outcome = tags.add_device_async(42, 12345).await.unwrap();
    assert_eq!(outcome.as_json().unwrap()["AcceptedItems"], 1);
}

#[tokio::test]
async fn remove_device_targets_the_removedevices_path() {
    let server = MockServer::start().await;
    let tags = Tags::new(mock_uem(&server));

    Mock::given(method("POST"))
        .and(path("/api/mdm/tags/42/removedevices"))
        .and(body_json(json!({"BulkValues": {"Value": [12345]}})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"AcceptedItems": 1, "FailedItems": 0})),
        )
        .mount(&server)
        .await;

    let outcome = tags.remove_device_async(42, 12345).await.unwrap();
    assert_eq!(outcome.as_json().unwrap()["FailedItems"], 0);
}

#[tokio::test]
async fn device_has_tag_checks_the_tag_listing() {
    let server = MockServer::start().await;
    let tags = Tags::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/mdm/tags/42/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Device": [
                {"DeviceId": 11, "DeviceUuid": "aaa-111"},
                {"DeviceId": 22, "DeviceUuid": "bbb-222"}
            ]
        })))
        .mount(&server)
        .await;

    assert!(tags.device_has_tag_async(42, Some(22), None).await.unwrap());
    assert!(tags
        .device_has_tag_async(42, None, Some("aaa-111"))
        .await
        .unwrap());
    assert!(!tags.device_has_tag_async(42, Some(99), None).await.unwrap());
}

// ── Smartgroups (blocking endpoints) ───────────────────────────────────

#[test]
fn smartgroup_add_serializes_the_definition() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    let smartgroups = Smartgroups::new(mock_uem(&server));

    let mut definition = SmartGroupDefinition::new("Lab Macs");
    definition.platforms.push("AppleOsX".to_string());

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/api/mdm/smartgroups"))
            .and(body_json(serde_json::to_value(&definition).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Value": 12})))
            .mount(&server),
    );

    let outcome = smartgroups.add(&definition).unwrap();
    assert_eq!(outcome.as_json().unwrap()["Value"], 12);
}

#[test]
fn smartgroup_lifecycle_targets_the_id_paths() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    let smartgroups = Smartgroups::new(mock_uem(&server));

    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/api/mdm/smartgroups/12"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"Name": "Lab Macs"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/mdm/smartgroups/12/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Devices": []})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/mdm/smartgroups/12"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
    });

    assert_eq!(
        smartgroups.get(12).unwrap().as_json().unwrap()["Name"],
        "Lab Macs"
    );
    assert!(smartgroups.devices(12).unwrap().as_json().is_some());
    assert_eq!(smartgroups.delete(12).unwrap().status(), Some(204));
}

// ── Profiles (blocking endpoints) ──────────────────────────────────────

#[test]
fn profile_search_uses_v2_accept_and_fixed_filters() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    let profiles = Profiles::new(mock_uem(&server));

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/mdm/profiles/search"))
            .and(header("Accept", "application/json;version=2"))
            .and(query_param("platform", "WinRT"))
            .and(query_param("status", "Active"))
            .and(query_param("pagesize", "1000"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"profiles": [], "total": 0})),
            )
            .mount(&server),
    );

    let outcome = profiles.active_windows10_profiles().unwrap();
    assert_eq!(outcome.as_json().unwrap()["total"], 0);
}

// ── Apps (blocking endpoints) ──────────────────────────────────────────

#[test]
fn internal_app_lookup_targets_the_mam_module() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    let apps = Apps::new(mock_uem(&server));

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/mam/apps/internal/33"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ApplicationName": "Munki",
                "Id": {"Value": 33}
            })))
            .mount(&server),
    );

    let outcome = apps.get_internal(33).unwrap();
    assert_eq!(outcome.as_json().unwrap()["ApplicationName"], "Munki");
}
