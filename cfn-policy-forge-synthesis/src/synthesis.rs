//! Policy synthesis: one Allow statement per successfully resolved
//! resource type.

use std::collections::BTreeSet;

use crate::events::{EventSink, SynthEvent};
use crate::registry::{Resolution, SchemaRegistry};
use crate::types::{PolicyDocument, PolicyStatement, ResourceType};

pub struct PolicySynthesizer<'a> {
    registry: &'a dyn SchemaRegistry,
    events: &'a dyn EventSink,
}

impl<'a> PolicySynthesizer<'a> {
    pub fn new(registry: &'a dyn SchemaRegistry, events: &'a dyn EventSink) -> Self {
        Self { registry, events }
    }

    /// Build one policy document for a set of resource types.
    ///
    /// Each type is resolved through the registry. Types that come back
    /// not-found or malformed, and types whose lookup fails outright, are
    /// skipped with a warning event; a document with an empty statement
    /// list is a valid result. Actions concatenate the create, update,
    /// and delete permission lists in that order, verbatim.
    pub async fn synthesize(&self, types: &BTreeSet<ResourceType>) -> PolicyDocument {
        let mut document = PolicyDocument::new();

        for resource_type in types {
            match self.registry.resolve(resource_type).await {
                Ok(Resolution::Found(permissions)) => {
                    document.add_statement(PolicyStatement::allow(
                        resource_type.statement_id(),
                        permissions.into_actions(),
                    ));
                }
                Ok(Resolution::NotFound) => {
                    self.events.emit(SynthEvent::TypeNotFound {
                        type_name: resource_type.to_string(),
                    });
                }
                Ok(Resolution::Malformed(reason)) => {
                    self.events.emit(SynthEvent::MalformedSchema {
                        type_name: resource_type.to_string(),
                        reason,
                    });
                }
                Err(err) => {
                    self.events.emit(SynthEvent::RegistryUnavailable {
                        type_name: resource_type.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        document
    }
}
