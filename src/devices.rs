//! Device management endpoints of the `mdm` module.
//!
//! Covers the `/api/mdm/devices` family: lookup by UEM device ID or by an
//! alternate identifier (serial number, MAC, UDID, IMEI, EAS ID), paged
//! searches, device commands, security samples, custom attributes,
//! enrollment tokens, and the per-device smartgroup/app/profile listings.
//!
//! Lookup methods return typed entities; command and action endpoints
//! answer polymorphically (a JSON status document or a bare HTTP status),
//! so those return [`ResponseValue`] for the caller to interpret.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::UemClient;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;
use crate::response::ResponseValue;

/// `Accept` value selecting the v2 search response shape.
const ACCEPT_V2: &str = "application/json;version=2";
/// `Accept` value selecting the v3 search response shape.
const ACCEPT_V3: &str = "application/json;version=3";

// ── Response types ─────────────────────────────────────────────────────

/// Wrapper the UEM API uses for entity identifiers: `{"Value": 123}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EntityId {
    /// The numeric identifier.
    #[serde(rename = "Value")]
    pub value: i64,
}

/// A managed device as returned by the v1 device endpoints.
///
/// Field names are PascalCase on the wire. Everything except the wrapper
/// is optional: the console omits fields depending on platform, enrollment
/// state, and console version, and new console releases add fields that
/// are ignored here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Device {
    /// UEM device ID, wrapped in the `{"Value": n}` envelope.
    #[serde(default)]
    pub id: Option<EntityId>,
    /// Console-assigned device UUID.
    #[serde(default)]
    pub uuid: Option<String>,
    /// Platform-reported unique device identifier.
    #[serde(default)]
    pub udid: Option<String>,
    /// Hardware serial number.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Primary MAC address.
    #[serde(default)]
    pub mac_address: Option<String>,
    /// IMEI for cellular devices.
    #[serde(default)]
    pub imei: Option<String>,
    /// Exchange ActiveSync identifier.
    #[serde(default)]
    pub eas_id: Option<String>,
    /// Friendly name shown in the console.
    #[serde(default)]
    pub device_friendly_name: Option<String>,
    /// Enrollment user's name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Platform string (e.g. `"Apple"`, `"Android"`).
    #[serde(default)]
    pub platform: Option<String>,
    /// Hardware model.
    #[serde(default)]
    pub model: Option<String>,
    /// Operating system version string.
    #[serde(default)]
    pub operating_system: Option<String>,
    /// Ownership classification (`"C"`, `"E"`, `"S"`).
    #[serde(default)]
    pub ownership: Option<String>,
    /// Timestamp of the last console check-in.
    #[serde(default)]
    pub last_seen: Option<String>,
    /// Enrollment status (`"Enrolled"`, `"Unenrolled"`, ...).
    #[serde(default)]
    pub enrollment_status: Option<String>,
    /// Compliance status as evaluated by the console.
    #[serde(default)]
    pub compliance_status: Option<String>,
    /// Name of the organization group the device is enrolled in.
    #[serde(default)]
    pub location_group_name: Option<String>,
}

/// One page of a `/devices/search` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DevicesPage {
    /// The devices on this page.
    #[serde(default)]
    pub devices: Vec<Device>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size used by the server.
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Total number of matching devices across all pages.
    #[serde(default)]
    pub total: Option<i64>,
}

// ── Request types ──────────────────────────────────────────────────────

/// Alternate identifier for looking up a device when the UEM device ID is
/// unknown. Maps to the `searchby`/`id` query parameter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltId<'a> {
    /// Hardware serial number.
    SerialNumber(&'a str),
    /// Primary MAC address.
    MacAddress(&'a str),
    /// Platform device UDID.
    Udid(&'a str),
    /// IMEI number.
    Imei(&'a str),
    /// Exchange ActiveSync ID.
    EasId(&'a str),
}

impl AltId<'_> {
    fn search_by(&self) -> &'static str {
        match self {
            AltId::SerialNumber(_) => "Serialnumber",
            AltId::MacAddress(_) => "Macaddress",
            AltId::Udid(_) => "Udid",
            AltId::Imei(_) => "ImeiNumber",
            AltId::EasId(_) => "EasId",
        }
    }

    fn value(&self) -> &str {
        match self {
            AltId::SerialNumber(v)
            | AltId::MacAddress(v)
            | AltId::Udid(v)
            | AltId::Imei(v)
            | AltId::EasId(v) => v,
        }
    }
}

fn custom_attributes_body(names: &[&str]) -> Value {
    json!({
        "CustomAttributes": names
            .iter()
            .map(|name| json!({"Name": name}))
            .collect::<Vec<_>>(),
    })
}

// ── Endpoints ──────────────────────────────────────────────────────────

/// Device endpoints, bound to the `mdm` module.
#[derive(Clone)]
pub struct Devices {
    mdm: ModuleClient,
}

impl Devices {
    /// Creates the device endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Devices {
            mdm: ModuleClient::new(client, "mdm"),
        }
    }

    /// Searches `/devices` with arbitrary query parameters.
    pub fn search(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm.get("/devices", RequestOptions::new().query(params))
    }

    /// Async variant of [`Devices::search`].
    pub async fn search_async(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm
            .get_async("/devices", RequestOptions::new().query(params))
            .await
    }

    /// Searches `/devices/search` and decodes the paged result.
    pub fn search_all(&self, params: &[(&str, &str)]) -> Result<DevicesPage> {
        self.mdm
            .get("/devices/search", RequestOptions::new().query(params))?
            .decode()
    }

    /// Async variant of [`Devices::search_all`].
    pub async fn search_all_async(&self, params: &[(&str, &str)]) -> Result<DevicesPage> {
        self.mdm
            .get_async("/devices/search", RequestOptions::new().query(params))
            .await?
            .decode()
    }

    /// Searches `/devices/search` with the v2 response shape, selected via
    /// the `Accept` header. The shape differs per console version, so the
    /// raw outcome is returned.
    pub fn search_v2(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm.get(
            "/devices/search",
            RequestOptions::new().header("Accept", ACCEPT_V2).query(params),
        )
    }

    /// Async variant of [`Devices::search_v2`].
    pub async fn search_v2_async(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm
            .get_async(
                "/devices/search",
                RequestOptions::new().header("Accept", ACCEPT_V2).query(params),
            )
            .await
    }

    /// Searches `/devices/search` with the v3 response shape.
    pub fn search_v3(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm.get(
            "/devices/search",
            RequestOptions::new().header("Accept", ACCEPT_V3).query(params),
        )
    }

    /// Async variant of [`Devices::search_v3`].
    pub async fn search_v3_async(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm
            .get_async(
                "/devices/search",
                RequestOptions::new().header("Accept", ACCEPT_V3).query(params),
            )
            .await
    }

    /// Full device details search (`/devices/extensivesearch`) with many
    /// attributes included. Accepts the endpoint's filter parameters
    /// (`organizationgroupid`, `platform`, `startdatetime`, `enddatetime`,
    /// `enrollmentstatus`, `page`, `pagesize`, `macaddress`, ...).
    pub fn extensive_search(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm
            .get("/devices/extensivesearch", RequestOptions::new().query(params))
    }

    /// Async variant of [`Devices::extensive_search`].
    pub async fn extensive_search_async(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm
            .get_async("/devices/extensivesearch", RequestOptions::new().query(params))
            .await
    }

    /// Looks a device up by an alternate identifier and decodes it.
    pub fn details_by_alt_id(&self, id: AltId<'_>) -> Result<Device> {
        self.search(&[("searchby", id.search_by()), ("id", id.value())])?
            .decode()
    }

    /// Async variant of [`Devices::details_by_alt_id`].
    pub async fn details_by_alt_id_async(&self, id: AltId<'_>) -> Result<Device> {
        self.search_async(&[("searchby", id.search_by()), ("id", id.value())])
            .await?
            .decode()
    }

    /// Resolves an alternate identifier to the numeric UEM device ID.
    pub fn id_by_alt_id(&self, id: AltId<'_>) -> Result<Option<i64>> {
        Ok(self.details_by_alt_id(id)?.id.map(|entity| entity.value))
    }

    /// Async variant of [`Devices::id_by_alt_id`].
    pub async fn id_by_alt_id_async(&self, id: AltId<'_>) -> Result<Option<i64>> {
        Ok(self
            .details_by_alt_id_async(id)
            .await?
            .id
            .map(|entity| entity.value))
    }

    /// Fetches a device by its numeric UEM device ID.
    pub fn details_by_device_id(&self, device_id: i64) -> Result<Device> {
        self.mdm
            .get(&format!("/devices/{device_id}"), RequestOptions::new())?
            .decode()
    }

    /// Async variant of [`Devices::details_by_device_id`].
    pub async fn details_by_device_id_async(&self, device_id: i64) -> Result<Device> {
        self.mdm
            .get_async(&format!("/devices/{device_id}"), RequestOptions::new())
            .await?
            .decode()
    }

    /// Clears the device passcode. The console answers with a status
    /// document or a bare 202.
    pub fn clear_passcode(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm.post(
            &format!("/devices/{device_id}/clearpasscode"),
            RequestOptions::new(),
        )
    }

    /// Async variant of [`Devices::clear_passcode`].
    pub async fn clear_passcode_async(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .post_async(
                &format!("/devices/{device_id}/clearpasscode"),
                RequestOptions::new(),
            )
            .await
    }

    /// Sends a device command (`DeviceLock`, `DeviceWipe`,
    /// `EnterpriseWipe`, `DeviceQuery`, ...) to a device by its UEM ID.
    /// The command rides in the query string, as the endpoint expects.
    pub fn send_command(&self, device_id: i64, command: &str) -> Result<ResponseValue> {
        self.mdm.post(
            &format!("/devices/{device_id}/commands"),
            RequestOptions::new().raw_query(format!("command={command}")),
        )
    }

    /// Async variant of [`Devices::send_command`].
    pub async fn send_command_async(&self, device_id: i64, command: &str) -> Result<ResponseValue> {
        self.mdm
            .post_async(
                &format!("/devices/{device_id}/commands"),
                RequestOptions::new().raw_query(format!("command={command}")),
            )
            .await
    }

    /// Sends a device command addressing the device by an alternate
    /// identifier.
    pub fn send_command_by_alt_id(&self, command: &str, id: AltId<'_>) -> Result<ResponseValue> {
        self.mdm.post(
            "/devices/commands",
            RequestOptions::new().raw_query(format!(
                "command={command}&searchBy={}&id={}",
                id.search_by(),
                id.value()
            )),
        )
    }

    /// Async variant of [`Devices::send_command_by_alt_id`].
    pub async fn send_command_by_alt_id_async(
        &self,
        command: &str,
        id: AltId<'_>,
    ) -> Result<ResponseValue> {
        self.mdm
            .post_async(
                "/devices/commands",
                RequestOptions::new().raw_query(format!(
                    "command={command}&searchBy={}&id={}",
                    id.search_by(),
                    id.value()
                )),
            )
            .await
    }

    /// Security information sample for a device by UEM ID.
    pub fn security_info_by_id(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get(&format!("/devices/{device_id}/security"), RequestOptions::new())
    }

    /// Async variant of [`Devices::security_info_by_id`].
    pub async fn security_info_by_id_async(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get_async(&format!("/devices/{device_id}/security"), RequestOptions::new())
            .await
    }

    /// Security information sample addressed by an alternate identifier.
    pub fn security_info_by_alt_id(&self, id: AltId<'_>) -> Result<ResponseValue> {
        self.mdm.get(
            "/devices/security",
            RequestOptions::new()
                .raw_query(format!("searchby={}&id={}", id.search_by(), id.value())),
        )
    }

    /// Async variant of [`Devices::security_info_by_alt_id`].
    pub async fn security_info_by_alt_id_async(&self, id: AltId<'_>) -> Result<ResponseValue> {
        self.mdm
            .get_async(
                "/devices/security",
                RequestOptions::new()
                    .raw_query(format!("searchby={}&id={}", id.search_by(), id.value())),
            )
            .await
    }

    /// Bulk security information for all devices of an organization group
    /// and user.
    pub fn bulk_security_info(
        &self,
        organization_group_id: &str,
        user_name: &str,
    ) -> Result<ResponseValue> {
        self.mdm.get(
            "/devices/securityinfosearch",
            RequestOptions::new().raw_query(format!(
                "organizationgroupid={organization_group_id}&user={user_name}"
            )),
        )
    }

    /// Async variant of [`Devices::bulk_security_info`].
    pub async fn bulk_security_info_async(
        &self,
        organization_group_id: &str,
        user_name: &str,
    ) -> Result<ResponseValue> {
        self.mdm
            .get_async(
                "/devices/securityinfosearch",
                RequestOptions::new().raw_query(format!(
                    "organizationgroupid={organization_group_id}&user={user_name}"
                )),
            )
            .await
    }

    /// FileVault recovery key for a macOS device, by device UUID.
    pub fn filevault_recovery_key(&self, device_uuid: &str) -> Result<ResponseValue> {
        self.mdm.get(
            &format!("/devices/{device_uuid}/security/recovery-key"),
            RequestOptions::new(),
        )
    }

    /// Async variant of [`Devices::filevault_recovery_key`].
    pub async fn filevault_recovery_key_async(&self, device_uuid: &str) -> Result<ResponseValue> {
        self.mdm
            .get_async(
                &format!("/devices/{device_uuid}/security/recovery-key"),
                RequestOptions::new(),
            )
            .await
    }

    /// Switches a staged device to its directory or basic enrollment user.
    pub fn switch_enrollment_user(&self, device_id: i64, user_id: i64) -> Result<ResponseValue> {
        self.mdm.patch(
            &format!("/devices/{device_id}/enrollmentuser/{user_id}"),
            RequestOptions::new(),
        )
    }

    /// Async variant of [`Devices::switch_enrollment_user`].
    pub async fn switch_enrollment_user_async(
        &self,
        device_id: i64,
        user_id: i64,
    ) -> Result<ResponseValue> {
        self.mdm
            .patch_async(
                &format!("/devices/{device_id}/enrollmentuser/{user_id}"),
                RequestOptions::new(),
            )
            .await
    }

    /// DEP managed administrator account information for a macOS device.
    pub fn managed_admin_account(&self, device_uuid: &str) -> Result<ResponseValue> {
        self.mdm.get(
            &format!("/devices/{device_uuid}/security/managed-admin-information"),
            RequestOptions::new(),
        )
    }

    /// Async variant of [`Devices::managed_admin_account`].
    pub async fn managed_admin_account_async(&self, device_uuid: &str) -> Result<ResponseValue> {
        self.mdm
            .get_async(
                &format!("/devices/{device_uuid}/security/managed-admin-information"),
                RequestOptions::new(),
            )
            .await
    }

    /// Removes a device from management.
    pub fn delete_device(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .delete(&format!("/devices/{device_id}"), RequestOptions::new())
    }

    /// Async variant of [`Devices::delete_device`].
    pub async fn delete_device_async(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .delete_async(&format!("/devices/{device_id}"), RequestOptions::new())
            .await
    }

    /// Removes custom attributes from a device by UEM ID.
    pub fn delete_custom_attributes(
        &self,
        device_id: i64,
        names: &[&str],
    ) -> Result<ResponseValue> {
        self.mdm.delete(
            &format!("/devices/{device_id}/customattributes"),
            RequestOptions::new().json(custom_attributes_body(names)),
        )
    }

    /// Async variant of [`Devices::delete_custom_attributes`].
    pub async fn delete_custom_attributes_async(
        &self,
        device_id: i64,
        names: &[&str],
    ) -> Result<ResponseValue> {
        self.mdm
            .delete_async(
                &format!("/devices/{device_id}/customattributes"),
                RequestOptions::new().json(custom_attributes_body(names)),
            )
            .await
    }

    /// Removes custom attributes from a device addressed by serial number.
    pub fn delete_custom_attributes_by_serial(
        &self,
        serial_number: &str,
        names: &[&str],
    ) -> Result<ResponseValue> {
        self.mdm.delete(
            &format!("/devices/serialnumber/{serial_number}/customattributes"),
            RequestOptions::new().json(custom_attributes_body(names)),
        )
    }

    /// Async variant of [`Devices::delete_custom_attributes_by_serial`].
    pub async fn delete_custom_attributes_by_serial_async(
        &self,
        serial_number: &str,
        names: &[&str],
    ) -> Result<ResponseValue> {
        self.mdm
            .delete_async(
                &format!("/devices/serialnumber/{serial_number}/customattributes"),
                RequestOptions::new().json(custom_attributes_body(names)),
            )
            .await
    }

    /// Lists enrollment tokens of an organization group.
    pub fn search_enrollment_tokens(
        &self,
        organization_group_uuid: &str,
        params: &[(&str, &str)],
    ) -> Result<ResponseValue> {
        self.mdm.get(
            &format!("/groups/{organization_group_uuid}/enrollment-tokens"),
            RequestOptions::new().query(params),
        )
    }

    /// Async variant of [`Devices::search_enrollment_tokens`].
    pub async fn search_enrollment_tokens_async(
        &self,
        organization_group_uuid: &str,
        params: &[(&str, &str)],
    ) -> Result<ResponseValue> {
        self.mdm
            .get_async(
                &format!("/groups/{organization_group_uuid}/enrollment-tokens"),
                RequestOptions::new().query(params),
            )
            .await
    }

    /// Creates an enrollment token in an organization group from a
    /// registration record.
    pub fn create_enrollment_token(
        &self,
        organization_group_uuid: &str,
        registration_record: Value,
    ) -> Result<ResponseValue> {
        self.mdm.post(
            &format!("/groups/{organization_group_uuid}/enrollment-tokens"),
            RequestOptions::new().json(registration_record),
        )
    }

    /// Async variant of [`Devices::create_enrollment_token`].
    pub async fn create_enrollment_token_async(
        &self,
        organization_group_uuid: &str,
        registration_record: Value,
    ) -> Result<ResponseValue> {
        self.mdm
            .post_async(
                &format!("/groups/{organization_group_uuid}/enrollment-tokens"),
                RequestOptions::new().json(registration_record),
            )
            .await
    }

    /// Deletes an enrollment token from an organization group.
    pub fn delete_enrollment_token(
        &self,
        organization_group_uuid: &str,
        token_uuid: &str,
    ) -> Result<ResponseValue> {
        self.mdm.delete(
            &format!("/groups/{organization_group_uuid}/enrollment-tokens/{token_uuid}"),
            RequestOptions::new(),
        )
    }

    /// Async variant of [`Devices::delete_enrollment_token`].
    pub async fn delete_enrollment_token_async(
        &self,
        organization_group_uuid: &str,
        token_uuid: &str,
    ) -> Result<ResponseValue> {
        self.mdm
            .delete_async(
                &format!("/groups/{organization_group_uuid}/enrollment-tokens/{token_uuid}"),
                RequestOptions::new(),
            )
            .await
    }

    /// Smartgroups a device belongs to.
    pub fn smartgroups(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get(&format!("/devices/{device_id}/smartgroups"), RequestOptions::new())
    }

    /// Async variant of [`Devices::smartgroups`].
    pub async fn smartgroups_async(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get_async(&format!("/devices/{device_id}/smartgroups"), RequestOptions::new())
            .await
    }

    /// Apps installed on a device.
    pub fn apps(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get(&format!("/devices/{device_id}/apps"), RequestOptions::new())
    }

    /// Async variant of [`Devices::apps`].
    pub async fn apps_async(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get_async(&format!("/devices/{device_id}/apps"), RequestOptions::new())
            .await
    }

    /// Profiles assigned to a device.
    pub fn profiles(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get(&format!("/devices/{device_id}/profiles"), RequestOptions::new())
    }

    /// Async variant of [`Devices::profiles`].
    pub async fn profiles_async(&self, device_id: i64) -> Result<ResponseValue> {
        self.mdm
            .get_async(&format!("/devices/{device_id}/profiles"), RequestOptions::new())
            .await
    }
}
