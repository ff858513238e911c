//! Domain types for the projects API.
//!
//! # Design
//! `Project` is a snapshot of a server-side record. It is only ever built by
//! deserializing a response payload, every key is required, and there are no
//! setters: an updated project is a new value parsed from the server's reply.
//! These types are defined independently of the mock-server crate;
//! integration tests catch schema drift between the two.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Permission tag granted to the API user on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    View,
    Add,
    Change,
    Delete,
}

/// A project as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: u64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    tasks: Vec<u64>,
    permissions: BTreeSet<Permission>,
}

impl Project {
    /// Build a project from a decoded JSON payload.
    pub fn from_value(payload: serde_json::Value) -> Result<Self> {
        serde_json::from_value(payload).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Build a project from raw JSON text.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Task ids in the order the server listed them.
    pub fn tasks(&self) -> &[u64] {
        &self.tasks
    }

    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// One page of a list response. Only `results` is required; the pagination
/// metadata may be absent or null and `next`/`previous` are never followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}
