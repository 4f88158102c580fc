//! Resource type extraction from raw template text.
//!
//! The surrounding document format (YAML, JSON, anything else) is
//! irrelevant: any substring matching the three-segment `::` pattern is
//! treated as a resource type reference.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::ResourceType;

/// Three word-character segments joined by `::`, e.g. `AWS::IAM::Role`.
const TYPE_PATTERN: &str = r"\w+::\w+::\w+";

fn type_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TYPE_PATTERN).expect("type pattern is valid"))
}

/// Extract the unique set of resource type identifiers referenced in
/// template text. No matches is success with an empty set.
pub fn extract(text: &str) -> BTreeSet<ResourceType> {
    type_regex()
        .find_iter(text)
        .map(|m| ResourceType::new(m.as_str()))
        .collect()
}

/// Parse a comma-separated list of resource type identifiers supplied
/// directly on the command line, bypassing extraction. Items are
/// whitespace-trimmed; empty items are dropped.
pub fn parse_type_list(list: &str) -> BTreeSet<ResourceType> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ResourceType::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_empty_text() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_extract_no_matches_is_empty_set() {
        assert!(extract("Resources: {}\nDescription: nothing here").is_empty());
    }

    #[test]
    fn test_extract_deduplicates_repeated_types() {
        let template = r"
Resources:
  Role:
    Type: AWS::IAM::Role
  Bucket:
    Type: AWS::S3::Bucket
  OtherRole:
    Type: AWS::IAM::Role
";
        let types = extract(template);
        assert_eq!(types.len(), 2);
        assert!(types.contains(&ResourceType::new("AWS::IAM::Role")));
        assert!(types.contains(&ResourceType::new("AWS::S3::Bucket")));
    }

    #[test]
    fn test_extract_matches_embedded_in_json() {
        let template = r#"{"Resources":{"Fn":{"Type":"AWS::Lambda::Function"}}}"#;
        let types = extract(template);
        assert_eq!(types.len(), 1);
        assert!(types.contains(&ResourceType::new("AWS::Lambda::Function")));
    }

    #[test]
    fn test_extract_ignores_two_segment_names() {
        assert!(extract("AWS::IAM is not a full type name").is_empty());
    }

    #[test]
    fn test_parse_type_list_trims_and_drops_empty_items() {
        let types = parse_type_list(" AWS::IAM::Role , AWS::S3::Bucket ,, ");
        assert_eq!(types.len(), 2);
        assert!(types.contains(&ResourceType::new("AWS::IAM::Role")));
        assert!(types.contains(&ResourceType::new("AWS::S3::Bucket")));
    }
}
