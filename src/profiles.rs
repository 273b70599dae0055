//! Device profile endpoints of the `mdm` module.

use crate::client::UemClient;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;
use crate::response::ResponseValue;

/// `Accept` value selecting the v2 profile endpoints.
const ACCEPT_V2: &str = "application/json;version=2";

/// Profile endpoints, bound to the `mdm` module.
#[derive(Clone)]
pub struct Profiles {
    mdm: ModuleClient,
}

impl Profiles {
    /// Creates the profile endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Profiles {
            mdm: ModuleClient::new(client, "mdm"),
        }
    }

    /// Searches `/profiles/search` with the v2 response shape.
    pub fn search_v2(&self, params: &[(&str, &str)]) -> Result<ResponseValue> {
        self.mdm.get(
            "/profiles/search",
            RequestOptions::new().header("Accept", ACCEPT_V2).query(params),
        )
    }

    /// All active, corporate-owned Windows 10 auto-deployment profiles.
    pub fn active_windows10_profiles(&self) -> Result<ResponseValue> {
        self.search_v2(&[
            ("type", "Auto"),
            ("platform", "WinRT"),
            ("status", "Active"),
            ("ownership", "C"),
            ("orderby", "ASC"),
            ("pagesize", "1000"),
        ])
    }

    /// Fetches a profile by ID via the v2 endpoint.
    pub fn get(&self, profile_id: i64) -> Result<ResponseValue> {
        self.mdm.get(
            &format!("/profiles/{profile_id}"),
            RequestOptions::new().header("Accept", ACCEPT_V2),
        )
    }
}
