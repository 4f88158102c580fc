//! Output path mapping: mirror a template's location under the output
//! root, with the extension normalized to the policy document extension.

use std::path::{Path, PathBuf};

use crate::error::{ForgeError, ForgeResult};

/// Extension of generated policy documents.
pub const POLICY_EXTENSION: &str = "json";

/// Compute the output path for `source`: its path relative to
/// `input_root`, re-rooted under `output_root`, extension set to `.json`.
///
/// `input_root` must be an ancestor directory of `source`; anything else
/// is a path mapping error.
pub fn map_output_path(
    source: &Path,
    input_root: &Path,
    output_root: &Path,
) -> ForgeResult<PathBuf> {
    let relative = source
        .strip_prefix(input_root)
        .map_err(|_| ForgeError::PathMapping {
            path: source.to_path_buf(),
            root: input_root.to_path_buf(),
        })?;

    if relative.as_os_str().is_empty() {
        return Err(ForgeError::PathMapping {
            path: source.to_path_buf(),
            root: input_root.to_path_buf(),
        });
    }

    let mut target = output_root.join(relative);
    target.set_extension(POLICY_EXTENSION);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_nested_template_under_output_root() {
        let target = map_output_path(
            Path::new("/in/templates/app/network.yaml"),
            Path::new("/in/templates"),
            Path::new("/out"),
        )
        .expect("maps");
        assert_eq!(target, PathBuf::from("/out/app/network.json"));
    }

    #[test]
    fn test_normalizes_template_extensions() {
        for name in ["stack.yml", "stack.template", "stack.json", "stack.txt"] {
            let target = map_output_path(
                &Path::new("/in").join(name),
                Path::new("/in"),
                Path::new("/out"),
            )
            .expect("maps");
            assert_eq!(target, PathBuf::from("/out/stack.json"));
        }
    }

    #[test]
    fn test_source_outside_input_root_is_error() {
        let result = map_output_path(
            Path::new("/elsewhere/stack.yaml"),
            Path::new("/in"),
            Path::new("/out"),
        );
        assert!(matches!(result, Err(ForgeError::PathMapping { .. })));
    }

    #[test]
    fn test_source_equal_to_input_root_is_error() {
        let result = map_output_path(Path::new("/in"), Path::new("/in"), Path::new("/out"));
        assert!(matches!(result, Err(ForgeError::PathMapping { .. })));
    }
}
