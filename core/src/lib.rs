//! Synchronous client for the WebODM projects API.
//!
//! # Overview
//! `ProjectsService` offers create / get / update / delete / list over
//! `/api/projects/`. Each call builds a plain-data `HttpRequest`, hands it to
//! a `Transport`, and classifies the `HttpResponse`: the expected status
//! yields a `Project` (or `true` for delete), 404 yields
//! `ApiError::NotFound`, anything else `ApiError::UnexpectedStatus`.
//!
//! ```no_run
//! use webodm_core::{ProjectsService, ServiceConfig};
//!
//! # fn main() -> webodm_core::Result<()> {
//! let config = ServiceConfig::new("http://localhost:8000", "my-token")?;
//! let projects = ProjectsService::connect(&config);
//! let created = projects.create("Survey", "North field")?;
//! assert_eq!(projects.get(created.id())?, created);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `ProjectsClient` is the I/O-free half: `build_*` produces requests,
//!   `parse_*` consumes responses. It can be driven by hand when the caller
//!   owns the HTTP stack.
//! - `Transport` is the only seam to the network. `UreqTransport` (feature
//!   `ureq`, on by default) is the stock implementation; any
//!   `Fn(&HttpRequest) -> Result<HttpResponse, TransportError>` also works.
//! - `Project` is an immutable snapshot, only constructed from a payload
//!   with every field present.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::ProjectsClient;
pub use config::ServiceConfig;
pub use error::{ApiError, ConfigError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::ProjectsService;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::{Transport, TransportError};
pub use types::{Page, Permission, Project};
