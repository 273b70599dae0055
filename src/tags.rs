//! Device tag assignment endpoints of the `mdm` module.
//!
//! Tags drive dependent console actions (profile installs, app pushes,
//! compliance triggers), so the operations here are assignment-centric:
//! add a device to a tag, remove it, and check membership.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::UemClient;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;
use crate::response::ResponseValue;

// ── Response types ─────────────────────────────────────────────────────

/// A device entry in a tag's device listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaggedDevice {
    /// Numeric UEM device ID.
    #[serde(default)]
    pub device_id: Option<i64>,
    /// Console-assigned device UUID.
    #[serde(default)]
    pub device_uuid: Option<String>,
}

/// Device listing of a tag: `{"Device": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaggedDevices {
    /// The devices currently carrying the tag.
    #[serde(default)]
    pub device: Vec<TaggedDevice>,
}

fn bulk_values(device_id: i64) -> Value {
    json!({"BulkValues": {"Value": [device_id]}})
}

// ── Endpoints ──────────────────────────────────────────────────────────

/// Tag endpoints, bound to the `mdm` module.
#[derive(Clone)]
pub struct Tags {
    mdm: ModuleClient,
}

impl Tags {
    /// Creates the tag endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Tags {
            mdm: ModuleClient::new(client, "mdm"),
        }
    }

    /// Adds a device to a tag. The console answers with a bulk status
    /// document (accepted/failed counts) or a bare status.
    pub fn add_device(&self, tag_id: i64, device_id: i64) -> Result<ResponseValue> {
        self.mdm.post(
            &format!("/tags/{tag_id}/adddevices"),
            RequestOptions::new().json(bulk_values(device_id)),
        )
    }

    /// Async variant of [`Tags::add_device`].
    pub async fn add_device_async(&self, tag_id: i64, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .post_async(
                &format!("/tags/{tag_id}/adddevices"),
                RequestOptions::new().json(bulk_values(device_id)),
            )
            .await
    }

    /// Removes a device from a tag.
    pub fn remove_device(&self, tag_id: i64, device_id: i64) -> Result<ResponseValue> {
        self.mdm.post(
            &format!("/tags/{tag_id}/removedevices"),
            RequestOptions::new().json(bulk_values(device_id)),
        )
    }

    /// Async variant of [`Tags::remove_device`].
    pub async fn remove_device_async(&self, tag_id: i64, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .post_async(
                &format!("/tags/{tag_id}/removedevices"),
                RequestOptions::new().json(bulk_values(device_id)),
            )
            .await
    }

    /// Lists the devices carrying a tag.
    pub fn devices(&self, tag_id: i64) -> Result<TaggedDevices> {
        self.mdm
            .get(&format!("tags/{tag_id}/devices"), RequestOptions::new())?
            .decode()
    }

    /// Async variant of [`Tags::devices`].
    pub async fn devices_async(&self, tag_id: i64) -> Result<TaggedDevices> {
        self.mdm
            .get_async(&format!("tags/{tag_id}/devices"), RequestOptions::new())
            .await?
            .decode()
    }

    /// Checks whether a device carries a tag, matching on the numeric
    /// device ID, the device UUID, or both.
    pub fn device_has_tag(
        &self,
        tag_id: i64,
        device_id: Option<i64>,
        device_uuid: Option<&str>,
    ) -> Result<bool> {
        Ok(matches_device(&self.devices(tag_id)?, device_id, device_uuid))
    }

    /// Async variant of [`Tags::device_has_tag`].
    pub async fn device_has_tag_async(
        &self,
        tag_id: i64,
        device_id: Option<i64>,
        device_uuid: Option<&str>,
    ) -> Result<bool> {
        Ok(matches_device(
            &self.devices_async(tag_id).await?,
            device_id,
            device_uuid,
        ))
    }
}

fn matches_device(
    listing: &TaggedDevices,
    device_id: Option<i64>,
    device_uuid: Option<&str>,
) -> bool {
    listing.device.iter().any(|device| {
        let id_matches = device_id.is_some() && device.device_id == device_id;
        let uuid_matches =
            device_uuid.is_some() && device.device_uuid.as_deref() == device_uuid;
        id_matches || uuid_matches
    })
}
