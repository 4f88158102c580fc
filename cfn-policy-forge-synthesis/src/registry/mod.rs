//! Schema registry capability: resolving a resource type to the
//! permissions its lifecycle handlers require.

pub(crate) mod cloudformation;
#[cfg(any(test, feature = "integ-test"))]
pub mod fake;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::ForgeResult;
use crate::types::{OperationPermissions, ResourceType};

pub use cloudformation::CloudFormationRegistry;

/// Outcome of one registry lookup.
///
/// Transport-level failures are not a `Resolution`; they surface as the
/// `Err` arm of [`SchemaRegistry::resolve`] so callers can tell a
/// possibly-retryable condition apart from a definitive "no such type".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The registry returned a parseable schema.
    Found(OperationPermissions),
    /// The registry has no entry for this identifier.
    NotFound,
    /// The entry exists but its schema cannot be parsed into the expected
    /// shape.
    Malformed(String),
}

/// Capability for looking up the operation-permission schema of a
/// resource type. One remote lookup per call; implementations do not
/// cache across calls.
#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    async fn resolve(&self, resource_type: &ResourceType) -> ForgeResult<Resolution>;
}

/// Caching wrapper around any [`SchemaRegistry`].
///
/// The same identifier commonly repeats across the files of a template
/// tree, so a whole-tree conversion can opt in to reusing lookups for the
/// duration of one run. Transport errors are not cached.
pub struct MemoizingRegistry<R> {
    inner: R,
    cache: Mutex<HashMap<ResourceType, Resolution>>,
}

impl<R: SchemaRegistry> MemoizingRegistry<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<R: SchemaRegistry> SchemaRegistry for MemoizingRegistry<R> {
    async fn resolve(&self, resource_type: &ResourceType) -> ForgeResult<Resolution> {
        if let Some(hit) = self.cache.lock().await.get(resource_type) {
            return Ok(hit.clone());
        }

        let resolution = self.inner.resolve(resource_type).await?;
        self.cache
            .lock()
            .await
            .insert(resource_type.clone(), resolution.clone());
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeRegistry;
    use super::*;

    fn role_permissions() -> OperationPermissions {
        OperationPermissions {
            create: vec!["iam:CreateRole".to_string()],
            update: vec![],
            delete: vec!["iam:DeleteRole".to_string()],
        }
    }

    #[tokio::test]
    async fn test_memoizing_registry_resolves_once_per_type() {
        let inner = FakeRegistry::new().with_schema("AWS::IAM::Role", role_permissions());
        let registry = MemoizingRegistry::new(inner);
        let role = ResourceType::new("AWS::IAM::Role");

        let first = registry.resolve(&role).await.expect("resolves");
        let second = registry.resolve(&role).await.expect("resolves");

        assert_eq!(first, second);
        assert_eq!(registry.inner.lookups(), 1);
    }

    #[tokio::test]
    async fn test_memoizing_registry_caches_not_found() {
        let registry = MemoizingRegistry::new(FakeRegistry::new());
        let missing = ResourceType::new("AWS::Missing::Type");

        assert_eq!(
            registry.resolve(&missing).await.expect("resolves"),
            Resolution::NotFound
        );
        assert_eq!(
            registry.resolve(&missing).await.expect("resolves"),
            Resolution::NotFound
        );
        assert_eq!(registry.inner.lookups(), 1);
    }

    #[tokio::test]
    async fn test_memoizing_registry_retries_after_transport_error() {
        let inner = FakeRegistry::new().with_transport_failure("AWS::Flaky::Type");
        let registry = MemoizingRegistry::new(inner);
        let flaky = ResourceType::new("AWS::Flaky::Type");

        assert!(registry.resolve(&flaky).await.is_err());
        assert!(registry.resolve(&flaky).await.is_err());
        // Failures were not cached; the inner registry saw both calls.
        assert_eq!(registry.inner.lookups(), 2);
    }
}
