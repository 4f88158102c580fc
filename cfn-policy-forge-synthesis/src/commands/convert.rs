//! Conversion operations: single file, directory tree, remote URL, and
//! literal resource type lists.

use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;
use walkdir::WalkDir;

use crate::error::{ForgeError, ForgeResult};
use crate::events::SynthEvent;
use crate::extraction::{extract, parse_type_list};
use crate::merge::build_master_policy;
use crate::output::write_policy;
use crate::pathmap::{map_output_path, POLICY_EXTENSION};
use crate::types::PolicyDocument;

/// File name used when synthesizing from a literal type list.
pub const LIST_POLICY_FILENAME: &str = "IAMPolicy.json";

/// Derive an output file name from a template URL: the final path
/// segment with any query string or fragment stripped. URLs ending in
/// `/` (or with no path at all) fall back to `template`.
fn url_file_name(url: &str) -> &str {
    url.split(['?', '#'])
        .next()
        .unwrap_or(url)
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("template")
}

impl super::service::ConvertService {
    /// Convert one template file. The output mirrors the file's location
    /// relative to `input_root` under `output_root`.
    pub async fn convert_file(
        &self,
        path: &Path,
        input_root: &Path,
        output_root: &Path,
    ) -> ForgeResult<PathBuf> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ForgeError::TemplateRead {
                path: path.to_path_buf(),
                source,
            })?;

        let types = extract(&content);
        info!(
            "{}: {} resource types referenced",
            path.display(),
            types.len()
        );

        let target = map_output_path(path, input_root, output_root)?;
        // In-place output roots map `stack.json` onto itself; never let a
        // generated policy replace its own source template.
        if target == path {
            return Err(ForgeError::OutputCollision {
                path: path.to_path_buf(),
            });
        }

        let document = self.synthesizer().synthesize(&types).await;
        write_policy(&target, &document).await?;
        info!("Wrote {}", target.display());
        Ok(target)
    }

    /// Convert every file under `input_dir` recursively, then rebuild the
    /// master policy at `output_root`.
    ///
    /// A file that fails conversion is reported through the event sink and
    /// skipped; the batch continues. Returns the merged master document.
    pub async fn convert_tree(
        &self,
        input_dir: &Path,
        output_root: &Path,
    ) -> ForgeResult<PolicyDocument> {
        // Snapshot the tree before converting so freshly written policy
        // files are not picked up as templates mid-walk.
        let templates: Vec<PathBuf> = WalkDir::new(input_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect();

        for path in &templates {
            if let Err(err) = self.convert_file(path, input_dir, output_root).await {
                self.events.emit(SynthEvent::FileConversionFailed {
                    path: path.clone(),
                    reason: err.to_string(),
                });
            }
        }

        build_master_policy(output_root, self.events.as_ref()).await
    }

    /// Fetch template text from `url` and convert it. The output file is
    /// named after the final URL path segment.
    pub async fn convert_url(&self, url: &str, output_root: &Path) -> ForgeResult<PathBuf> {
        let fetch_error = |err: reqwest::Error| ForgeError::Fetch {
            url: url.to_string(),
            reason: err.to_string(),
        };

        let response = reqwest::get(url)
            .await
            .map_err(fetch_error)?
            .error_for_status()
            .map_err(fetch_error)?;
        let content = response.text().await.map_err(fetch_error)?;

        let types = extract(&content);
        info!("{url}: {} resource types referenced", types.len());
        let document = self.synthesizer().synthesize(&types).await;

        let mut target = output_root.join(url_file_name(url));
        target.set_extension(POLICY_EXTENSION);

        write_policy(&target, &document).await?;
        Ok(target)
    }

    /// Synthesize directly from a comma-separated resource type list and
    /// write `IAMPolicy.json` under `output_root`.
    pub async fn convert_type_list(&self, list: &str, output_root: &Path) -> ForgeResult<PathBuf> {
        let types = parse_type_list(list);
        let document = self.synthesizer().synthesize(&types).await;

        let target = output_root.join(LIST_POLICY_FILENAME);
        write_policy(&target, &document).await?;
        Ok(target)
    }
}
