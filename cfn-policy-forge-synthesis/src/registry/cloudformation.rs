//! CloudFormation type registry adapter over `aws-sdk-cloudformation`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::operation::describe_type::DescribeTypeError;
use aws_sdk_cloudformation::types::RegistryType;
use aws_sdk_cloudformation::Client as CloudFormationClient;
use serde::Deserialize;

use super::{Resolution, SchemaRegistry};
use crate::error::{ForgeError, ForgeResult};
use crate::types::{OperationPermissions, ResourceType};

/// Wire shape of the parts of a registry type schema we consume.
#[derive(Debug, Deserialize)]
struct TypeSchema {
    handlers: Option<HashMap<String, Handler>>,
}

#[derive(Debug, Deserialize)]
struct Handler {
    #[serde(default)]
    permissions: Vec<String>,
}

/// Registry backed by the CloudFormation `DescribeType` API. Issues one
/// lookup per call and holds no cache.
pub struct CloudFormationRegistry {
    client: CloudFormationClient,
}

impl CloudFormationRegistry {
    /// Create a registry using the default AWS credential provider chain.
    pub async fn new() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self {
            client: CloudFormationClient::new(&config),
        }
    }

    pub fn with_client(client: CloudFormationClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SchemaRegistry for CloudFormationRegistry {
    async fn resolve(&self, resource_type: &ResourceType) -> ForgeResult<Resolution> {
        let response = match self
            .client
            .describe_type()
            .r#type(RegistryType::Resource)
            .type_name(resource_type.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(DescribeTypeError::is_type_not_found_exception)
                {
                    return Ok(Resolution::NotFound);
                }
                return Err(ForgeError::Registry {
                    type_name: resource_type.to_string(),
                    reason: DisplayErrorContext(&err).to_string(),
                });
            }
        };

        match response.schema() {
            Some(schema) => Ok(parse_schema(schema)),
            None => Ok(Resolution::Malformed(
                "response carries no schema body".to_string(),
            )),
        }
    }
}

/// Parse a registry schema body into per-operation permission lists.
/// Handlers other than create/update/delete are ignored.
fn parse_schema(schema: &str) -> Resolution {
    let parsed: TypeSchema = match serde_json::from_str(schema) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Resolution::Malformed(format!("schema body is not valid JSON: {err}"))
        }
    };

    let Some(mut handlers) = parsed.handlers else {
        return Resolution::Malformed("schema has no handlers section".to_string());
    };

    let mut permissions_for = |operation: &str| {
        handlers
            .remove(operation)
            .map(|handler| handler.permissions)
            .unwrap_or_default()
    };

    Resolution::Found(OperationPermissions {
        create: permissions_for("create"),
        update: permissions_for("update"),
        delete: permissions_for("delete"),
    })
}
