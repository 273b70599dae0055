//! Organization group endpoints of the `system` module.
//!
//! Organization groups ("OGs") form the console's tenant hierarchy. The
//! identifier vocabulary is overloaded: every group has a numeric ID, a
//! human-assigned Group ID string, and a UUID. The lookup helpers here
//! translate between the three.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::UemClient;
use crate::devices::EntityId;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;
use crate::response::ResponseValue;

/// Numeric ID of the root organization group under which customer-type
/// groups are created.
const CUSTOMER_PARENT_ID: i64 = 7;

// ── Response types ─────────────────────────────────────────────────────

/// An organization group as returned by the group endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationGroup {
    /// Numeric group ID, wrapped in the `{"Value": n}` envelope.
    #[serde(default)]
    pub id: Option<EntityId>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Human-assigned Group ID string.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Group type (`"Customer"`, `"Container"`, ...).
    #[serde(default)]
    pub location_group_type: Option<String>,
    /// Console-assigned UUID.
    #[serde(default)]
    pub uuid: Option<String>,
}

/// One page of a `/groups/search` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupsPage {
    /// The groups on this page.
    #[serde(default)]
    pub location_groups: Vec<LocationGroup>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size used by the server.
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Total number of matching groups across all pages.
    #[serde(default)]
    pub total: Option<i64>,
}

// ── Endpoints ──────────────────────────────────────────────────────────

/// Organization group endpoints, bound to the `system` module.
#[derive(Clone)]
pub struct Groups {
    system: ModuleClient,
}

impl Groups {
    /// Creates the group endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Groups {
            system: ModuleClient::new(client, "system"),
        }
    }

    /// Searches `/groups/search` and decodes the paged result.
    pub fn search(&self, params: &[(&str, &str)]) -> Result<GroupsPage> {
        self.system
            .get("/groups/search", RequestOptions::new().query(params))?
            .decode()
    }

    /// Async variant of [`Groups::search`].
    pub async fn search_async(&self, params: &[(&str, &str)]) -> Result<GroupsPage> {
        self.system
            .get_async("/groups/search", RequestOptions::new().query(params))
            .await?
            .decode()
    }

    /// Resolves a Group ID string to the numeric group ID via search.
    /// Returns `None` when no group matches.
    pub fn id_from_group_id(&self, group_id: &str) -> Result<Option<i64>> {
        let page = self.search(&[("groupid", group_id)])?;
        Ok(first_group_id(&page))
    }

    /// Async variant of [`Groups::id_from_group_id`].
    pub async fn id_from_group_id_async(&self, group_id: &str) -> Result<Option<i64>> {
        let page = self.search_async(&[("groupid", group_id)]).await?;
        Ok(first_group_id(&page))
    }

    /// Resolves a numeric group ID to its Group ID string.
    pub fn group_id_from_id(&self, id: i64) -> Result<Option<String>> {
        let group: LocationGroup = self
            .system
            .get(&format!("/groups/{id}"), RequestOptions::new())?
            .decode()?;
        Ok(group.group_id)
    }

    /// Async variant of [`Groups::group_id_from_id`].
    pub async fn group_id_from_id_async(&self, id: i64) -> Result<Option<String>> {
        let group: LocationGroup = self
            .system
            .get_async(&format!("/groups/{id}"), RequestOptions::new())
            .await?
            .decode()?;
        Ok(group.group_id)
    }

    /// Resolves a numeric group ID to the group's UUID.
    pub fn uuid_from_id(&self, id: i64) -> Result<Option<String>> {
        let group: LocationGroup = self
            .system
            .get(&format!("/groups/{id}"), RequestOptions::new())?
            .decode()?;
        Ok(group.uuid.filter(|uuid| !uuid.is_empty()))
    }

    /// Async variant of [`Groups::uuid_from_id`].
    pub async fn uuid_from_id_async(&self, id: i64) -> Result<Option<String>> {
        let group: LocationGroup = self
            .system
            .get_async(&format!("/groups/{id}"), RequestOptions::new())
            .await?
            .decode()?;
        Ok(group.uuid.filter(|uuid| !uuid.is_empty()))
    }

    /// Creates a child group under `parent_id`. The group document is sent
    /// as a raw JSON body with an explicit content type, matching the
    /// endpoint's expectations.
    pub fn create(&self, parent_id: i64, group: Value) -> Result<ResponseValue> {
        self.system.post(
            &format!("/groups/{parent_id}"),
            RequestOptions::new()
                .header("Content-Type", "application/json")
                .data(group.to_string()),
        )
    }

    /// Async variant of [`Groups::create`].
    pub async fn create_async(&self, parent_id: i64, group: Value) -> Result<ResponseValue> {
        self.system
            .post_async(
                &format!("/groups/{parent_id}"),
                RequestOptions::new()
                    .header("Content-Type", "application/json")
                    .data(group.to_string()),
            )
            .await
    }

    /// Creates a customer-type group under the root group and returns the
    /// new group's ID, or `None` when the response carries no `Value`.
    /// `name` falls back to `group_id`.
    pub fn create_customer_group(
        &self,
        group_id: &str,
        name: Option<&str>,
    ) -> Result<Option<String>> {
        let payload = group_payload(group_id, name, "Customer");
        let response = self.create(CUSTOMER_PARENT_ID, payload)?;
        Ok(created_group_value(&response))
    }

    /// Async variant of [`Groups::create_customer_group`].
    pub async fn create_customer_group_async(
        &self,
        group_id: &str,
        name: Option<&str>,
    ) -> Result<Option<String>> {
        let payload = group_payload(group_id, name, "Customer");
        let response = self.create_async(CUSTOMER_PARENT_ID, payload).await?;
        Ok(created_group_value(&response))
    }

    /// Creates a child group under the group whose Group ID string is
    /// `parent_group_id`. `group_type` defaults to `"Container"`, `name`
    /// falls back to `group_id`. Returns `None` when the parent cannot be
    /// resolved or the response carries no `Value`.
    pub fn create_child_group(
        &self,
        parent_group_id: &str,
        group_id: &str,
        group_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<String>> {
        let Some(parent_id) = self.id_from_group_id(parent_group_id)? else {
            return Ok(None);
        };
        let payload = group_payload(group_id, name, group_type.unwrap_or("Container"));
        let response = self.create(parent_id, payload)?;
        Ok(created_group_value(&response))
    }

    /// Async variant of [`Groups::create_child_group`].
    pub async fn create_child_group_async(
        &self,
        parent_group_id: &str,
        group_id: &str,
        group_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<String>> {
        let Some(parent_id) = self.id_from_group_id_async(parent_group_id).await? else {
            return Ok(None);
        };
        let payload = group_payload(group_id, name, group_type.unwrap_or("Container"));
        let response = self.create_async(parent_id, payload).await?;
        Ok(created_group_value(&response))
    }
}

fn first_group_id(page: &GroupsPage) -> Option<i64> {
    page.location_groups
        .first()
        .and_then(|group| group.id)
        .map(|id| id.value)
}

fn group_payload(group_id: &str, name: Option<&str>, group_type: &str) -> Value {
    json!({
        "GroupId": group_id,
        "Name": name.unwrap_or(group_id),
        "LocationGroupType": group_type,
    })
}

fn created_group_value(response: &ResponseValue) -> Option<String> {
    response
        .as_json()
        .and_then(|json| json.get("Value"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseValue;

    #[test]
    fn groups_page_deserializes() {
        let json = r#"{
            "LocationGroups": [
                {
                    "Id": {"Value": 570},
                    "Name": "Acme Corp",
                    "GroupId": "acme",
                    "LocationGroupType": "Customer",
                    "Uuid": "4b2a-77c1"
                }
            ],
            "Page": 0,
            "PageSize": 500,
            "Total": 1
        }"#;
        let page: GroupsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.location_groups.len(), 1);
        let group = &page.location_groups[0];
        assert_eq!(group.id, Some(EntityId { value: 570 }));
        assert_eq!(group.group_id.as_deref(), Some("acme"));
        assert_eq!(group.location_group_type.as_deref(), Some("Customer"));
    }

    #[test]
    fn first_group_id_of_empty_page_is_none() {
        let page: GroupsPage = serde_json::from_str(r#"{"LocationGroups": []}"#).unwrap();
        assert_eq!(first_group_id(&page), None);
    }

    #[test]
    fn group_payload_defaults_name_to_group_id() {
        let payload = group_payload("acme-east", None, "Container");
        assert_eq!(payload["GroupId"], "acme-east");
        assert_eq!(payload["Name"], "acme-east");
        assert_eq!(payload["LocationGroupType"], "Container");
    }

    #[test]
    fn group_payload_uses_explicit_name() {
        let payload = group_payload("acme-east", Some("Acme East"), "Customer");
        assert_eq!(payload["Name"], "Acme East");
    }

    #[test]
    fn created_group_value_reads_the_value_field() {
        let response = ResponseValue::Json(json!({"Value": "571"}));
        assert_eq!(created_group_value(&response).as_deref(), Some("571"));
    }

    #[test]
    fn created_group_value_is_none_for_status_or_missing_field() {
        assert_eq!(created_group_value(&ResponseValue::Status(201)), None);
        let response = ResponseValue::Json(json!({"Unexpected": true}));
        assert_eq!(created_group_value(&response), None);
    }
}
