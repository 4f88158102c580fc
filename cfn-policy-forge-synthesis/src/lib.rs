//! This crate provides the core business logic for cfn-policy-forge:
//! - resource type extraction from CloudFormation template text
//! - schema resolution through the CloudFormation type registry
//! - least-privilege policy synthesis per template
//! - master-policy aggregation across a template tree
//!

pub mod commands;
mod error;
mod events;
mod extraction;
mod merge;
mod output;
mod pathmap;
pub mod registry;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use commands::{ConvertService, LIST_POLICY_FILENAME};
pub use error::{ForgeError, ForgeResult};
pub use events::{EventSink, LogSink, RecordingSink, SynthEvent};
pub use extraction::{extract, parse_type_list};
pub use merge::{bootstrap_statement, build_master_policy, merge_documents, MASTER_POLICY_FILENAME};
pub use output::{read_policy, write_policy};
pub use pathmap::{map_output_path, POLICY_EXTENSION};
pub use registry::{CloudFormationRegistry, MemoizingRegistry, Resolution, SchemaRegistry};
pub use synthesis::PolicySynthesizer;
pub use types::{
    OperationPermissions, PolicyDocument, PolicyStatement, ResourceType, POLICY_VERSION,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sample_template() {
        let template = "Resources:\n  Role:\n    Type: AWS::IAM::Role\n";
        let types = extract(template);
        assert_eq!(types.len(), 1);
        assert!(types.contains(&ResourceType::new("AWS::IAM::Role")));
    }
}
