//! Conversion service: holds the schema registry and event sink and
//! exposes the high-level convert operations used by the CLI.

use std::sync::Arc;

use crate::events::{EventSink, LogSink};
use crate::registry::{CloudFormationRegistry, MemoizingRegistry, SchemaRegistry};
use crate::synthesis::PolicySynthesizer;

pub struct ConvertService {
    pub(crate) registry: Arc<dyn SchemaRegistry>,
    pub(crate) events: Arc<dyn EventSink>,
}

impl ConvertService {
    /// Service backed by the real CloudFormation registry and warn-level
    /// logging. `reuse_lookups` wraps the registry in a per-run memoizer;
    /// the default is one fresh lookup per type occurrence.
    pub async fn new(reuse_lookups: bool) -> Self {
        let registry: Arc<dyn SchemaRegistry> = if reuse_lookups {
            Arc::new(MemoizingRegistry::new(CloudFormationRegistry::new().await))
        } else {
            Arc::new(CloudFormationRegistry::new().await)
        };

        Self {
            registry,
            events: Arc::new(LogSink),
        }
    }

    /// Service with explicit collaborators. Tests pass an in-memory
    /// registry and a recording sink.
    pub fn with_registry(registry: Arc<dyn SchemaRegistry>, events: Arc<dyn EventSink>) -> Self {
        Self { registry, events }
    }

    pub(crate) fn synthesizer(&self) -> PolicySynthesizer<'_> {
        PolicySynthesizer::new(self.registry.as_ref(), self.events.as_ref())
    }
}
