//! Rust client library for the VMware Workspace ONE UEM REST API.
//!
//! Wraps the console's `system`, `mdm`, and `mam` endpoint groups behind
//! typed sync/async methods. Every call flows through one request pipeline:
//! endpoint URL construction, Basic-auth plus tenant-code header assembly,
//! a single HTTP exchange, and a three-way classification of the response
//! into a JSON payload, a bare status code, or a structured remote error.
//!
//! # Modules
//!
//! - [`client`] — The transport: connection configuration and the six HTTP
//!   verbs in blocking and async form.
//! - [`module`] — Binds a transport to one API module (`system`, `mdm`,
//!   `mam`) so resource code only supplies relative paths.
//! - [`request`] — Per-call request descriptors (query, headers, body,
//!   timeout override).
//! - [`response`] — The three-way response classification and the raw
//!   response shape.
//! - [`error`] — Typed error hierarchy (`UemError`).
//! - [`api`] — Aggregator exposing one endpoint group per resource family.
//! - [`devices`], [`users`], [`groups`], [`tags`], [`smartgroups`],
//!   [`profiles`], [`apps`], [`info`] — The per-resource endpoint groups.
//!
//! # Quick start
//!
//! ```ignore
//! use ws1uem::api::WorkspaceOneApi;
//! use ws1uem::client::UemClient;
//! use ws1uem::devices::AltId;
//!
//! let client = UemClient::new("uem.example.com", "APIKEY", "admin", "secret");
//! let api = WorkspaceOneApi::new(client);
//!
//! let device_id = api.devices.id_by_alt_id(AltId::SerialNumber("C02TX1ZAHX87"))?;
//! if let Some(id) = device_id {
//!     api.tags.add_device(42, id)?;
//! }
//! # Ok::<(), ws1uem::error::UemError>(())
//! ```
//!
//! Async callers use the `_async` twins of every method; the contract is
//! identical.

#![warn(missing_docs)]

pub mod api;
pub mod apps;
pub mod client;
pub mod devices;
pub mod error;
pub mod groups;
pub mod info;
pub mod module;
pub mod profiles;
pub mod request;
pub mod response;
pub mod smartgroups;
pub mod tags;
pub mod users;
