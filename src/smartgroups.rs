//! Smartgroup endpoints of the `mdm` module.
//!
//! Smartgroups are criteria-based device collections used as assignment
//! targets. Creation and update share one definition document, modeled
//! here as [`SmartGroupDefinition`].

use serde::Serialize;
use serde_json::Value;

use crate::client::UemClient;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;
use crate::response::ResponseValue;

// ── Request types ──────────────────────────────────────────────────────

/// Definition document for creating or updating a smartgroup.
///
/// Criteria lists left empty are sent as empty arrays, which the console
/// interprets as "no restriction on this axis". The element shapes of the
/// list fields (organization groups, user additions, OEM/model pairs, ...)
/// follow the console's own documents and are passed through as JSON
/// values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmartGroupDefinition {
    /// Display name of the smartgroup.
    pub name: String,
    /// Tag names included in the criteria.
    pub tags: Vec<String>,
    /// Criteria combination mode, `"All"` or `"UserDevice"`.
    pub criteria_type: String,
    /// Numeric ID of the managing organization group.
    pub managed_by_organization_group_id: String,
    /// Organization groups in scope.
    pub organization_groups: Vec<Value>,
    /// User groups in scope.
    pub user_groups: Vec<Value>,
    /// Ownership classifications in scope.
    pub ownerships: Vec<String>,
    /// Platforms in scope.
    pub platforms: Vec<String>,
    /// Device models in scope.
    pub models: Vec<String>,
    /// Operating system constraints.
    pub operating_systems: Vec<Value>,
    /// Individually added users.
    pub user_additions: Vec<Value>,
    /// Individually added devices.
    pub device_additions: Vec<Value>,
    /// Individually excluded users.
    pub user_exclusions: Vec<Value>,
    /// Individually excluded devices.
    pub device_exclusions: Vec<Value>,
    /// Excluded user groups.
    pub user_groups_exclusions: Vec<Value>,
    /// Management types in scope.
    pub management_types: Vec<String>,
    /// Enrollment categories in scope.
    pub enrollment_categories: Vec<String>,
    /// OEM and model pairs in scope.
    pub oem_and_models: Vec<Value>,
    /// CPU architectures in scope.
    pub cpu_architectures: Vec<String>,
}

impl SmartGroupDefinition {
    /// Creates a definition with the given name, `"All"` criteria, managed
    /// by the root organization group, and no further criteria.
    pub fn new(name: impl Into<String>) -> Self {
        SmartGroupDefinition {
            name: name.into(),
            tags: Vec::new(),
            criteria_type: "All".to_string(),
            managed_by_organization_group_id: "1".to_string(),
            organization_groups: Vec::new(),
            user_groups: Vec::new(),
            ownerships: Vec::new(),
            platforms: Vec::new(),
            models: Vec::new(),
            operating_systems: Vec::new(),
            user_additions: Vec::new(),
            device_additions: Vec::new(),
            user_exclusions: Vec::new(),
            device_exclusions: Vec::new(),
            user_groups_exclusions: Vec::new(),
            management_types: Vec::new(),
            enrollment_categories: Vec::new(),
            oem_and_models: Vec::new(),
            cpu_architectures: Vec::new(),
        }
    }
}

// ── Endpoints ──────────────────────────────────────────────────────────

/// Smartgroup endpoints, bound to the `mdm` module.
#[derive(Clone)]
pub struct Smartgroups {
    mdm: ModuleClient,
}

impl Smartgroups {
    /// Creates the smartgroup endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Smartgroups {
            mdm: ModuleClient::new(client, "mdm"),
        }
    }

    /// Fetches a smartgroup by ID.
    pub fn get(&self, smartgroup_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get(&format!("/smartgroups/{smartgroup_id}"), RequestOptions::new())
    }

    /// Creates a smartgroup from a definition.
    pub fn add(&self, definition: &SmartGroupDefinition) -> Result<ResponseValue> {
        self.mdm.post(
            "/smartgroups",
            RequestOptions::new().json(serde_json::to_value(definition)?),
        )
    }

    /// Replaces a smartgroup's definition.
    pub fn update(
        &self,
        smartgroup_id: i64,
        definition: &SmartGroupDefinition,
    ) -> Result<ResponseValue> {
        self.mdm.put(
            &format!("/smartgroups/{smartgroup_id}"),
            RequestOptions::new().json(serde_json::to_value(definition)?),
        )
    }

    /// Deletes a smartgroup.
    pub fn delete(&self, smartgroup_id: i64) -> Result<ResponseValue> {
        self.mdm
            .delete(&format!("/smartgroups/{smartgroup_id}"), RequestOptions::new())
    }

    /// Lists the devices currently resolved into a smartgroup.
    pub fn devices(&self, smartgroup_id: i64) -> Result<ResponseValue> {
        self.mdm.get(
            &format!("/smartgroups/{smartgroup_id}/devices"),
            RequestOptions::new(),
        )
    }

    /// Lists the apps assigned through a smartgroup.
    pub fn apps(&self, smartgroup_id: i64) -> Result<ResponseValue> {
        self.mdm.get(
            &format!("/smartgroups/{smartgroup_id}/apps"),
            RequestOptions::new(),
        )
    }
}
