//! Core data types: resource type identifiers, lifecycle permission sets,
//! and IAM policy documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// IAM policy language version used for every generated document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// A CloudFormation resource type identifier of the form `AWS::Service::Type`.
///
/// Identifiers are compared by exact string equality. Ordering is lexical,
/// which gives extracted type sets a deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceType(String);

impl ResourceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the statement ID for this type: the identifier with every
    /// `:` stripped, suffixed with `Access` (`AWS::IAM::Role` ->
    /// `AWSIAMRoleAccess`). Injective over distinct identifiers since
    /// `::` is the only separator removed.
    pub fn statement_id(&self) -> String {
        format!("{}Access", self.0.replace(':', ""))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Permissions required by the lifecycle handlers of one resource type,
/// carried verbatim from the registry schema. Handlers other than
/// create/update/delete (read, list) are not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationPermissions {
    pub create: Vec<String>,
    pub update: Vec<String>,
    pub delete: Vec<String>,
}

impl OperationPermissions {
    /// Concatenate the create, update, and delete permission lists, in that
    /// fixed order. Duplicates across operations are preserved verbatim.
    pub fn into_actions(self) -> Vec<String> {
        let mut actions = self.create;
        actions.extend(self.update);
        actions.extend(self.delete);
        actions
    }
}

/// One permission grant within a policy document. Sid is unique per
/// document; Resource is always the type-wide wildcard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyStatement {
    #[serde(rename = "Sid")]
    pub sid: String,
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Action")]
    pub action: Vec<String>,
    #[serde(rename = "Resource")]
    pub resource: String,
}

impl PolicyStatement {
    /// Build an Allow statement scoped to all resources.
    pub fn allow(sid: impl Into<String>, action: Vec<String>) -> Self {
        Self {
            sid: sid.into(),
            effect: "Allow".to_string(),
            action,
            resource: "*".to_string(),
        }
    }
}

/// An IAM policy document. Statements appear in the order they were
/// appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    pub fn new() -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: Vec::new(),
        }
    }

    pub fn add_statement(&mut self, statement: PolicyStatement) {
        self.statement.push(statement);
    }

    pub fn contains_sid(&self, sid: &str) -> bool {
        self.statement.iter().any(|s| s.sid == sid)
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}
