//! Blocking CRUD façade over the projects API.
//!
//! Every method is one round-trip: `ProjectsClient::build_*`, then
//! `Transport::send`, then `ProjectsClient::parse_*`. Nothing is retried or
//! cached and no state survives a call.

use tracing::{debug, trace};

use crate::client::ProjectsClient;
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::Project;

#[derive(Debug, Clone)]
pub struct ProjectsService<T> {
    client: ProjectsClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl ProjectsService<crate::transport::UreqTransport> {
    /// Service using a default `UreqTransport`.
    pub fn connect(config: &ServiceConfig) -> Self {
        Self::new(config, crate::transport::UreqTransport::new())
    }

    /// `connect` with settings read from `WEBODM_HOST` / `WEBODM_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::connect(&ServiceConfig::from_env()?))
    }
}

impl<T: Transport> ProjectsService<T> {
    pub fn new(config: &ServiceConfig, transport: T) -> Self {
        Self {
            client: ProjectsClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &ProjectsClient {
        &self.client
    }

    pub fn create(&self, name: &str, description: &str) -> Result<Project> {
        let response = self.dispatch(self.client.build_create(name, description))?;
        self.client.parse_create(response)
    }

    pub fn get(&self, id: u64) -> Result<Project> {
        let response = self.dispatch(self.client.build_get(id))?;
        self.client.parse_get(response)
    }

    /// Returns the project as the server stored it, not a local merge.
    pub fn update(&self, id: u64, name: &str, description: &str) -> Result<Project> {
        let response = self.dispatch(self.client.build_update(id, name, description))?;
        self.client.parse_update(response)
    }

    pub fn delete(&self, id: u64) -> Result<bool> {
        let response = self.dispatch(self.client.build_delete(id))?;
        self.client.parse_delete(response)
    }

    /// Projects on the first page, in server order.
    pub fn list(&self) -> Result<Vec<Project>> {
        let response = self.dispatch(self.client.build_list())?;
        let projects = self.client.parse_list(response)?;
        trace!(count = projects.len(), "parsed project list");
        Ok(projects)
    }

    fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(&request)?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "received response"
        );
        Ok(response)
    }
}
