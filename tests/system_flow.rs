//! Integration tests for the system-module endpoint families (users,
//! organization groups, environment info) using wiremock.

use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ws1uem::client::UemClient;
use ws1uem::groups::Groups;
use ws1uem::info::Info;
use ws1uem::users::{EnrolledDevicesFilter, Users};

fn mock_uem(server: &MockServer) -> UemClient {
    UemClient::with_base_url(&server.uri(), "TENANTCODE", "admin", "secret")
}

// ── Users ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_search_decodes_the_paged_result() {
    let server = MockServer::start().await;
    let users = Users::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/users/search"))
        .and(query_param("username", "jdoe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Users": [{
                "Id": {"Value": 68},
                "UserName": "jdoe",
                "FirstName": "Jane",
                "LastName": "Doe",
                "Email": "jdoe@example.com",
                "Status": true
            }],
            "Page": 0,
            "PageSize": 500,
            "Total": 1
        })))
        .mount(&server)
        .await;

    let page = users.search_async(&[("username", "jdoe")]).await.unwrap();
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].user_name.as_deref(), Some("jdoe"));
    assert_eq!(page.users[0].status, Some(true));
}

#[tokio::test]
async fn user_crud_uses_the_v2_accept_header() {
    let server = MockServer::start().await;
    let users = Users::new(mock_uem(&server));
    let uuid = "e559e7df-4ba0-4891-9fcd-8574c1770d34";

    Mock::given(method("GET"))
        .and(path(format!("/api/system/users/{uuid}")))
        .and(header("Accept", "application/json;version=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": uuid,
            "userName": "jdoe"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/system/users/{uuid}")))
        .and(header("Accept", "application/json;version=2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let fetched = users.get_by_uuid_async(uuid).await.unwrap();
    assert_eq!(fetched.as_json().unwrap()["userName"], "jdoe");

    let deleted = users.delete_by_uuid_async(uuid).await.unwrap();
    assert_eq!(deleted.status(), Some(204));
}

#[tokio::test]
async fn enrolled_devices_folds_filters_into_the_path() {
    let server = MockServer::start().await;
    let users = Users::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/users/enrolleddevices/search"))
        .and(query_param("platform", "Apple"))
        .and(query_param("serialnumber", "C02XX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Devices": []})))
        .mount(&server)
        .await;

    let filter = EnrolledDevicesFilter {
        platform: Some("Apple".to_string()),
        serial_number: Some("C02XX".to_string()),
        ..Default::default()
    };
    let outcome = users.enrolled_devices_async(&filter).await.unwrap();
    assert!(outcome.as_json().is_some());
}

// ── Groups ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn id_from_group_id_resolves_via_search() {
    let server = MockServer::start().await;
    let groups = Groups::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/groups/search"))
        .and(query_param("groupid", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LocationGroups": [{
                "Id": {"Value": 570},
                "GroupId": "acme",
                "Name": "Acme Corp"
            }],
            "Total": 1
        })))
        .mount(&server)
        .await;

    let id = groups.id_from_group_id_async("acme").await.unwrap();
    assert_eq!(id, Some(570));
}

#[tokio::test]
async fn id_from_group_id_is_none_for_no_match() {
    let server = MockServer::start().await;
    let groups = Groups::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/groups/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"LocationGroups": []})))
        .mount(&server)
        .await;

    let id = groups.id_from_group_id_async("nope").await.unwrap();
    assert_eq!(id, None);
}

#[tokio::test]
async fn group_id_and_uuid_resolve_from_numeric_id() {
    let server = MockServer::start().await;
    let groups = Groups::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/groups/570"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Id": {"Value": 570},
            "GroupId": "acme",
            "Uuid": "4b2a-77c1"
        })))
        .mount(&server)
        .await;

    assert_eq!(
        groups.group_id_from_id_async(570).await.unwrap().as_deref(),
        Some("acme")
    );
    assert_eq!(
        groups.uuid_from_id_async(570).await.unwrap().as_deref(),
        Some("4b2a-77c1")
    );
}

#[tokio::test]
async fn create_customer_group_posts_raw_json_under_the_root() {
    let server = MockServer::start().await;
    let groups = Groups::new(mock_uem(&server));

    // The group document travels as a raw JSON string with an explicit
    // content type; the new group ID comes back in "Value".
    Mock::given(method("POST"))
        .and(path("/api/system/groups/7"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(
            json!({
                "GroupId": "acme",
                "Name": "acme",
                "LocationGroupType": "Customer"
            })
            .to_string(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Value": "571"})))
        .mount(&server)
        .await;

    let created = groups
        .create_customer_group_async("acme", None)
        .await
        .unwrap();
    assert_eq!(created.as_deref(), Some("571"));
}

#[tokio::test]
async fn create_child_group_resolves_the_parent_first() {
    let server = MockServer::start().await;
    let groups = Groups::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/groups/search"))
        .and(query_param("groupid", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LocationGroups": [{"Id": {"Value": 570}, "GroupId": "acme"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/system/groups/570"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Value": "580"})))
        .mount(&server)
        .await;

    let created = groups
        .create_child_group_async("acme", "acme-east", None, Some("Acme East"))
        .await
        .unwrap();
    assert_eq!(created.as_deref(), Some("580"));
}

#[tokio::test]
async fn create_child_group_bails_when_parent_is_unknown() {
    let server = MockServer::start().await;
    let groups = Groups::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/groups/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"LocationGroups": []})))
        .mount(&server)
        .await;

    let created = groups
        .create_child_group_async("ghost", "child", None, None)
        .await
        .unwrap();
    assert_eq!(created, None, "unresolvable parent must not create anything");
}

// ── Info ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn environment_info_decodes_the_console_version() {
    let server = MockServer::start().await;
    let info = Info::new(mock_uem(&server));

    Mock::given(method("GET"))
        .and(path("/api/system/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Version": "24.2.0.1"})))
        .mount(&server)
        .await;

    let env = info.environment_info_async().await.unwrap();
    assert_eq!(env.version.as_deref(), Some("24.2.0.1"));
}
