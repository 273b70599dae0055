//! Enrollment user endpoints of the `system` module.
//!
//! The user family spans two endpoint generations: the v1 search endpoint
//! (PascalCase responses, decoded here into typed pages) and the v2 CRUD
//! endpoints selected with `Accept: application/json;version=2`, whose
//! shapes vary by console version and are returned raw.

use serde::Deserialize;
use serde_json::Value;

use crate::client::UemClient;
use crate::devices::EntityId;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;
use crate::response::ResponseValue;

/// `Accept` value selecting the v2 user endpoints.
const ACCEPT_V2: &str = "application/json;version=2";

// ── Response types ─────────────────────────────────────────────────────

/// An enrollment user as returned by the v1 search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Numeric user ID, wrapped in the `{"Value": n}` envelope.
    #[serde(default)]
    pub id: Option<EntityId>,
    /// Login name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the user is active.
    #[serde(default)]
    pub status: Option<bool>,
    /// Security type (basic or directory).
    #[serde(default)]
    pub security_type: Option<i64>,
}

/// One page of a `/users/search` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsersPage {
    /// The users on this page.
    #[serde(default)]
    pub users: Vec<User>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size used by the server.
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Total number of matching users across all pages.
    #[serde(default)]
    pub total: Option<i64>,
}

// ── Request types ──────────────────────────────────────────────────────

/// Filters for [`Users::enrolled_devices`]. Unset fields are omitted from
/// the query entirely.
#[derive(Debug, Clone, Default)]
pub struct EnrolledDevicesFilter {
    /// Organization group ID filter (`organizationalgroupid` on the wire —
    /// the endpoint's own spelling).
    pub organization_group_id: Option<String>,
    /// Organization group name filter.
    pub organization_group: Option<String>,
    /// Platform filter.
    pub platform: Option<String>,
    /// Custom attribute name filter.
    pub custom_attributes: Option<String>,
    /// Serial number filter.
    pub serial_number: Option<String>,
    /// Only devices seen after this timestamp.
    pub seen_since: Option<String>,
    /// Only devices seen before this timestamp.
    pub seen_till: Option<String>,
    /// Only devices enrolled after this timestamp.
    pub enrolled_since: Option<String>,
    /// Only devices enrolled before this timestamp.
    pub enrolled_till: Option<String>,
}

impl EnrolledDevicesFilter {
    fn to_query(&self) -> String {
        let fields = [
            ("organizationalgroupid", &self.organization_group_id),
            ("organizationgroup", &self.organization_group),
            ("platform", &self.platform),
            ("customattributes", &self.custom_attributes),
            ("serialnumber", &self.serial_number),
            ("seensince", &self.seen_since),
            ("seentill", &self.seen_till),
            ("enrolledsince", &self.enrolled_since),
            ("enrolledtill", &self.enrolled_till),
        ];
        fields
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={v}")))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// ── Endpoints ──────────────────────────────────────────────────────────

/// Enrollment user endpoints, bound to the `system` module.
#[derive(Clone)]
pub struct Users {
    system: ModuleClient,
}

impl Users {
    /// Creates the user endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Users {
            system: ModuleClient::new(client, "system"),
        }
    }

    /// Searches `/users/search` (`username`, `firstname`, `lastname`,
    /// `email`, `organizationgroupid`, `role`) and decodes the paged
    /// result.
    pub fn search(&self, params: &[(&str, &str)]) -> Result<UsersPage> {
        self.system
            .get("/users/search", RequestOptions::new().query(params))?
            .decode()
    }

    /// Async variant of [`Users::search`].
    pub async fn search_async(&self, params: &[(&str, &str)]) -> Result<UsersPage> {
        self.system
            .get_async("/users/search", RequestOptions::new().query(params))
            .await?
            .decode()
    }

    /// Fetches an enrollment user by UUID via the v2 endpoint.
    pub fn get_by_uuid(&self, uuid: &str) -> Result<ResponseValue> {
        self.system.get(
            &format!("/users/{uuid}"),
            RequestOptions::new().header("Accept", ACCEPT_V2),
        )
    }

    /// Async variant of [`Users::get_by_uuid`].
    pub async fn get_by_uuid_async(&self, uuid: &str) -> Result<ResponseValue> {
        self.system
            .get_async(
                &format!("/users/{uuid}"),
                RequestOptions::new().header("Accept", ACCEPT_V2),
            )
            .await
    }

    /// Creates an enrollment user via the v2 endpoint. `user` carries the
    /// v2 attribute set (`userName`, `securityType`, ...).
    pub fn create(&self, user: Value) -> Result<ResponseValue> {
        self.system.post(
            "/users/",
            RequestOptions::new().header("Accept", ACCEPT_V2).json(user),
        )
    }

    /// Async variant of [`Users::create`].
    pub async fn create_async(&self, user: Value) -> Result<ResponseValue> {
        self.system
            .post_async(
                "/users/",
                RequestOptions::new().header("Accept", ACCEPT_V2).json(user),
            )
            .await
    }

    /// Updates an enrollment user by UUID via the v2 endpoint.
    pub fn update_by_uuid(&self, uuid: &str, update: Value) -> Result<ResponseValue> {
        self.system.put(
            &format!("/users/{uuid}"),
            RequestOptions::new().header("Accept", ACCEPT_V2).json(update),
        )
    }

    /// Async variant of [`Users::update_by_uuid`].
    pub async fn update_by_uuid_async(&self, uuid: &str, update: Value) -> Result<ResponseValue> {
        self.system
            .put_async(
                &format!("/users/{uuid}"),
                RequestOptions::new().header("Accept", ACCEPT_V2).json(update),
            )
            .await
    }

    /// Deletes an enrollment user by UUID via the v2 endpoint.
    pub fn delete_by_uuid(&self, uuid: &str) -> Result<ResponseValue> {
        self.system.delete(
            &format!("/users/{uuid}"),
            RequestOptions::new().header("Accept", ACCEPT_V2),
        )
    }

    /// Async variant of [`Users::delete_by_uuid`].
    pub async fn delete_by_uuid_async(&self, uuid: &str) -> Result<ResponseValue> {
        self.system
            .delete_async(
                &format!("/users/{uuid}"),
                RequestOptions::new().header("Accept", ACCEPT_V2),
            )
            .await
    }

    /// Deletes an enrollment user by numeric ID (v1 endpoint).
    pub fn delete_by_id(&self, user_id: i64) -> Result<ResponseValue> {
        self.system
            .delete(&format!("/users/{user_id}/delete"), RequestOptions::new())
    }

    /// Async variant of [`Users::delete_by_id`].
    pub async fn delete_by_id_async(&self, user_id: i64) -> Result<ResponseValue> {
        self.system
            .delete_async(&format!("/users/{user_id}/delete"), RequestOptions::new())
            .await
    }

    /// Registers a device to a user. The registration record is sent as a
    /// raw JSON document, matching the endpoint's expectations.
    pub fn register_device(&self, user_id: i64, registration: Value) -> Result<ResponseValue> {
        self.system.post(
            &format!("/users/{user_id}/registerdevice"),
            RequestOptions::new().data(registration.to_string()),
        )
    }

    /// Async variant of [`Users::register_device`].
    pub async fn register_device_async(
        &self,
        user_id: i64,
        registration: Value,
    ) -> Result<ResponseValue> {
        self.system
            .post_async(
                &format!("/users/{user_id}/registerdevice"),
                RequestOptions::new().data(registration.to_string()),
            )
            .await
    }

    /// Retrieves enrolled device details for the given filters. The filter
    /// query is folded into the path, as the endpoint expects.
    pub fn enrolled_devices(&self, filter: &EnrolledDevicesFilter) -> Result<ResponseValue> {
        self.system
            .get(&enrolled_devices_path(filter), RequestOptions::new())
    }

    /// Async variant of [`Users::enrolled_devices`].
    pub async fn enrolled_devices_async(
        &self,
        filter: &EnrolledDevicesFilter,
    ) -> Result<ResponseValue> {
        self.system
            .get_async(&enrolled_devices_path(filter), RequestOptions::new())
            .await
    }
}

fn enrolled_devices_path(filter: &EnrolledDevicesFilter) -> String {
    let query = filter.to_query();
    if query.is_empty() {
        "/users/enrolleddevices/search".to_string()
    } else {
        format!("/users/enrolleddevices/search?{query}")
    }
}
