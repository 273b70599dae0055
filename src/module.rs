//! Module binding: fixes an API family's path segment for all calls.
//!
//! The UEM API groups endpoints under top-level modules (`system`, `mdm`,
//! `mam`, `mem`). A [`ModuleClient`] pairs a [`UemClient`] with one module
//! name so resource code only supplies the relative path — no algorithm
//! beyond forwarding, no state beyond the pair.

use crate::client::UemClient;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::response::{RawResponse, ResponseValue};

/// Module used by [`ModuleClient::post_no_error_check`] when no override is
/// given. The endpoints that skip error checking live under `system`
/// regardless of the bound module.
const NO_CHECK_DEFAULT_MODULE: &str = "system";

/// A [`UemClient`] bound to one API module.
#[derive(Clone)]
pub struct ModuleClient {
    client: UemClient,
    module: String,
}

impl ModuleClient {
    /// Binds `client` to `module` (e.g. `"mdm"`).
    pub fn new(client: UemClient, module: impl Into<String>) -> Self {
        ModuleClient {
            client,
            module: module.into(),
        }
    }

    /// The bound module name.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// GET under the bound module.
    pub fn get(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.get(&self.module, path, opts)
    }

    /// Async variant of [`ModuleClient::get`].
    pub async fn get_async(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.get_async(&self.module, path, opts).await
    }

    /// POST under the bound module.
    pub fn post(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.post(&self.module, path, opts)
    }

    /// Async variant of [`ModuleClient::post`].
    pub async fn post_async(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.post_async(&self.module, path, opts).await
    }

    /// POST without response classification.
    ///
    /// Unlike the other verbs this one is not tied to the bound module:
    /// `module` overrides it per call and defaults to `"system"`. An escape
    /// hatch for endpoints that do not follow the binding's convention.
    pub fn post_no_error_check(
        &self,
        module: Option<&str>,
        path: &str,
        opts: RequestOptions,
    ) -> Result<RawResponse> {
        self.client
            .post_no_error_check(module.unwrap_or(NO_CHECK_DEFAULT_MODULE), path, opts)
    }

    /// Async variant of [`ModuleClient::post_no_error_check`].
    pub async fn post_no_error_check_async(
        &self,
        module: Option<&str>,
        path: &str,
        opts: RequestOptions,
    ) -> Result<RawResponse> {
        self.client
            .post_no_error_check_async(module.unwrap_or(NO_CHECK_DEFAULT_MODULE), path, opts)
            .await
    }

    /// PUT under the bound module.
    pub fn put(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.put(&self.module, path, opts)
    }

    /// Async variant of [`ModuleClient::put`].
    pub async fn put_async(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.put_async(&self.module, path, opts).await
    }

    /// PATCH under the bound module.
    pub fn patch(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.patch(&self.module, path, opts)
    }

    /// Async variant of [`ModuleClient::patch`].
    pub async fn patch_async(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.patch_async(&self.module, path, opts).await
    }

    /// DELETE under the bound module.
    pub fn delete(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.delete(&self.module, path, opts)
    }

    /// Async variant of [`ModuleClient::delete`].
    pub async fn delete_async(&self, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        self.client.delete_async(&self.module, path, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_holds_the_module_name() {
        let client = UemClient::new("example.com", "KEY", "user", "pass");
        let mdm = ModuleClient::new(client.clone(), "mdm");
        let system = ModuleClient::new(client, "system");
        assert_eq!(mdm.module(), "mdm");
        assert_eq!(system.module(), "system");
    }
}
