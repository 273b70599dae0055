//! Application endpoints of the `mam` module.

use crate::client::UemClient;
use crate::error::Result;
use crate::module::ModuleClient;
use crate::request::RequestOptions;
use crate::response::ResponseValue;

/// Application endpoints, bound to the `mam` module.
#[derive(Clone)]
pub struct Apps {
    mam: ModuleClient,
}

impl Apps {
    /// Creates the app endpoint group on `client`.
    pub fn new(client: UemClient) -> Self {
        Apps {
            mam: ModuleClient::new(client, "mam"),
        }
    }

    /// Fetches an internal application by ID.
    pub fn get_internal(&self, app_id: i64) -> Result<ResponseValue> {
        self.mam
            .get(&format!("/apps/internal/{app_id}"), RequestOptions::new())
    }
}
