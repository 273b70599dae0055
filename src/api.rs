//! Top-level aggregator wiring one connection into every endpoint group.

use crate::apps::Apps;
use crate::client::UemClient;
use crate::devices::Devices;
use crate::groups::Groups;
use crate::info::Info;
use crate::profiles::Profiles;
use crate::smartgroups::Smartgroups;
use crate::tags::Tags;
use crate::users::Users;

/// The assembled Workspace ONE UEM API: one [`UemClient`] shared by every
/// endpoint group.
///
/// ```ignore
/// use ws1uem::api::WorkspaceOneApi;
/// use ws1uem::client::UemClient;
///
/// let client = UemClient::new("uem.example.com", "APIKEY", "admin", "secret");
/// let api = WorkspaceOneApi::new(client);
/// let device = api.devices.details_by_device_id(12345)?;
/// # Ok::<(), ws1uem::error::UemError>(())
/// ```
pub struct WorkspaceOneApi {
    /// Device endpoints (`mdm`).
    pub devices: Devices,
    /// Enrollment user endpoints (`system`).
    pub users: Users,
    /// Organization group endpoints (`system`).
    pub groups: Groups,
    /// Device tag endpoints (`mdm`).
    pub tags: Tags,
    /// Smartgroup endpoints (`mdm`).
    pub smartgroups: Smartgroups,
    /// Application endpoints (`mam`).
    pub apps: Apps,
    /// Profile endpoints (`mdm`).
    pub profiles: Profiles,
    /// Environment information (`system`).
    pub info: Info,
}

impl WorkspaceOneApi {
    /// Wires `client` into every endpoint group.
    pub fn new(client: UemClient) -> Self {
        WorkspaceOneApi {
            devices: Devices::new(client.clone()),
            users: Users::new(client.clone()),
            groups: Groups::new(client.clone()),
            tags: Tags::new(client.clone()),
            smartgroups: Smartgroups::new(client.clone()),
            apps: Apps::new(client.clone()),
            profiles: Profiles::new(client.clone()),
            info: Info::new(client),
        }
    }
}
