//! cfn-policy-forge: generate least-privilege IAM policies from
//! CloudFormation templates via the CloudFormation type registry.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use log::{info, LevelFilter};

use cfn_policy_forge_synthesis::ConvertService;

#[derive(Debug, Parser)]
#[command(
    name = "cfn-policy-forge",
    version,
    disable_version_flag = true,
    about = "Generate least-privilege IAM policies from CloudFormation templates",
    group(ArgGroup::new("input").required(true).args(["input_path", "input_list"]))
)]
struct Cli {
    /// CloudFormation file, folder, or URL. Folders are processed
    /// recursively.
    #[arg(short = 'i', long = "input-path")]
    input_path: Option<String>,

    /// Comma-separated resource type names, e.g.
    /// "AWS::IAM::Role,AWS::S3::Bucket".
    #[arg(short = 'l', long = "input-resource-type-list")]
    input_list: Option<String>,

    /// Output root folder for generated policy files. Defaults to the
    /// input location (current directory for URL and list input).
    #[arg(short = 'o', long = "output-folderpath")]
    output_folder: Option<PathBuf>,

    /// Print version information.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Give more detailed output.
    #[arg(short = 'V', long = "verbose")]
    verbose: bool,

    /// Reuse registry lookups for the duration of the run instead of
    /// resolving every type occurrence freshly.
    #[arg(long = "reuse-lookups")]
    reuse_lookups: bool,
}

/// How the input path should be processed.
enum InputKind {
    Url,
    Directory,
    File,
}

fn classify_input(input: &str) -> Result<InputKind> {
    if url::Url::parse(input).is_ok_and(|u| matches!(u.scheme(), "http" | "https")) {
        return Ok(InputKind::Url);
    }

    let path = Path::new(input);
    if path.is_dir() {
        Ok(InputKind::Directory)
    } else if path.is_file() {
        Ok(InputKind::File)
    } else {
        bail!("Input path does not exist: {input}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .init();

    if let Some(list) = &cli.input_list {
        let output_root = cli.output_folder.unwrap_or_else(|| PathBuf::from("."));
        let service = ConvertService::new(cli.reuse_lookups).await;
        let target = service
            .convert_type_list(list, &output_root)
            .await
            .with_context(|| format!("Failed to generate policy for list: {list}"))?;
        info!("Wrote {}", target.display());
        return Ok(());
    }

    // The clap group guarantees exactly one input flag is present.
    let Some(input) = cli.input_path.as_deref() else {
        bail!("Either --input-path or --input-resource-type-list is required");
    };

    // Validate the input before touching AWS configuration.
    let kind = classify_input(input)?;
    let service = ConvertService::new(cli.reuse_lookups).await;

    match kind {
        InputKind::Url => {
            let output_root = cli.output_folder.unwrap_or_else(|| PathBuf::from("."));
            let target = service
                .convert_url(input, &output_root)
                .await
                .with_context(|| format!("Failed to convert {input}"))?;
            info!("Wrote {}", target.display());
        }
        InputKind::Directory => {
            let path = Path::new(input);
            let output_root = cli.output_folder.unwrap_or_else(|| path.to_path_buf());
            let master = service
                .convert_tree(path, &output_root)
                .await
                .with_context(|| format!("Failed to convert folder {input}"))?;
            info!(
                "Master policy holds {} statements",
                master.statement.len()
            );
        }
        InputKind::File => {
            let path = Path::new(input);
            // A bare file name has an empty parent; stripping an empty
            // prefix in the path mapper leaves the name untouched.
            let input_root = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
            let output_root = cli.output_folder.unwrap_or_else(|| {
                if input_root.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    input_root.clone()
                }
            });
            let target = service
                .convert_file(path, &input_root, &output_root)
                .await
                .with_context(|| format!("Failed to convert {input}"))?;
            info!("Wrote {}", target.display());
        }
    }

    Ok(())
}
