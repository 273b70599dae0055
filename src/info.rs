//! Environment information endpoint of the `system` module.

use serde::Deserialize;

use crate::client::UemClient;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;

/// General information about the UEM environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentInfo {
    /// Console version string, e.g. `"24.2.0.1"`.
    #[serde(default)]
    pub version: Option<String>,
}

/// Environment information endpoint, bound to the `system` module.
#[derive(Clone)]
pub struct Info {
    system: ModuleClient,
}

impl Info {
    /// Creates the info endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Info {
            system: ModuleClient::new(client, "system"),
        }
    }

    /// Fetches the environment's system information (console version).
    pub fn environment_info(&self) -> Result<EnvironmentInfo> {
        self.system.get("/info", RequestOptions::new())?.decode()
    }

    /// Async variant of [`Info::environment_info`].
    pub async fn environment_info_async(&self) -> Result<EnvironmentInfo> {
        self.system
            .get_async("/info", RequestOptions::new())
            .await?
            .decode()
    }
}
