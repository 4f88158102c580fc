//! Master policy aggregation across per-template policy documents.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::ForgeResult;
use crate::events::{EventSink, SynthEvent};
use crate::output::write_policy;
use crate::types::{PolicyDocument, PolicyStatement};

/// File name of the aggregate policy written at the output root.
pub const MASTER_POLICY_FILENAME: &str = "MasterPolicy.json";

const BOOTSTRAP_SID: &str = "CloudformationFullAccess";

/// Fixed grant for the CloudFormation service itself; every master policy
/// starts with it.
pub fn bootstrap_statement() -> PolicyStatement {
    PolicyStatement::allow(BOOTSTRAP_SID, vec!["cloudformation:*".to_string()])
}

/// Merge per-template documents into one master document.
///
/// The accumulator is seeded with the bootstrap statement. Statements are
/// appended in document order; the first statement seen for a Sid wins and
/// later statements with the same Sid are dropped without merging their
/// actions.
pub fn merge_documents<I>(documents: I) -> PolicyDocument
where
    I: IntoIterator<Item = PolicyDocument>,
{
    let mut master = PolicyDocument::new();
    master.add_statement(bootstrap_statement());

    for document in documents {
        for statement in document.statement {
            if !master.contains_sid(&statement.sid) {
                master.add_statement(statement);
            }
        }
    }

    master
}

/// Rebuild the master policy from every `.json` document under
/// `output_root` and write it to `MasterPolicy.json` at the root.
///
/// Discovery is recursive in sorted path order, which fixes the winner of
/// any Sid collision. Files that cannot be read or do not parse as policy
/// documents are skipped with a warning event.
pub async fn build_master_policy(
    output_root: &Path,
    events: &dyn EventSink,
) -> ForgeResult<PolicyDocument> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(output_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }

        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(_) => {
                events.emit(SynthEvent::UnreadablePolicyFile {
                    path: path.to_path_buf(),
                });
                continue;
            }
        };

        match serde_json::from_str::<PolicyDocument>(&raw) {
            Ok(document) => documents.push(document),
            Err(_) => events.emit(SynthEvent::UnrecognizedPolicyFile {
                path: path.to_path_buf(),
            }),
        }
    }

    let master = merge_documents(documents);
    write_policy(&output_root.join(MASTER_POLICY_FILENAME), &master).await?;
    Ok(master)
}
