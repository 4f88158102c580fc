//! In-memory registry for tests: canned resolutions, injectable transport
//! failures, and a lookup counter.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Resolution, SchemaRegistry};
use crate::error::{ForgeError, ForgeResult};
use crate::types::{OperationPermissions, ResourceType};

#[derive(Debug, Default)]
pub struct FakeRegistry {
    entries: HashMap<String, Resolution>,
    transport_failures: HashSet<String>,
    lookups: AtomicUsize,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type that resolves successfully.
    pub fn with_schema(mut self, type_name: &str, permissions: OperationPermissions) -> Self {
        self.entries
            .insert(type_name.to_string(), Resolution::Found(permissions));
        self
    }

    /// Register a type whose schema cannot be parsed.
    pub fn with_malformed(mut self, type_name: &str, reason: &str) -> Self {
        self.entries.insert(
            type_name.to_string(),
            Resolution::Malformed(reason.to_string()),
        );
        self
    }

    /// Make lookups for a type fail at the transport level.
    pub fn with_transport_failure(mut self, type_name: &str) -> Self {
        self.transport_failures.insert(type_name.to_string());
        self
    }

    /// Number of resolve calls received so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaRegistry for FakeRegistry {
    async fn resolve(&self, resource_type: &ResourceType) -> ForgeResult<Resolution> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.transport_failures.contains(resource_type.as_str()) {
            return Err(ForgeError::Registry {
                type_name: resource_type.to_string(),
                reason: "connection reset".to_string(),
            });
        }

        Ok(self
            .entries
            .get(resource_type.as_str())
            .cloned()
            .unwrap_or(Resolution::NotFound))
    }
}
