//! Main workflow orchestration logic
//!
//! Runs describe, version derivation and template rendering in order. Kept
//! apart from `main.rs` so the workflow can be driven programmatically with
//! any [DescribeProvider].

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::{Config, DescribeBackend};
use crate::domain::VersionTuple;
use crate::error::Result;
use crate::git::{CommandDescriber, DescribeProvider, Git2Describer};
use crate::template::{write_output, TemplateContext, TemplateJob, TemplateRenderer};
use crate::ui;

/// Arguments for the generate workflow
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Repository root, resolved once at startup
    pub repo_root: PathBuf,

    /// Render without writing any file
    pub dry_run: bool,
}

/// Result of a successful generate workflow
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    /// The version stamped into the files
    pub version: VersionTuple,

    /// Files written, in job order (empty on a dry run)
    pub written: Vec<PathBuf>,
}

/// Pick the describer configured for this repository
pub fn build_describer(config: &Config, repo_root: &Path) -> Result<Box<dyn DescribeProvider>> {
    let settings = config.describe.clone();
    let describer: Box<dyn DescribeProvider> = match settings.backend {
        DescribeBackend::Git2 => Box::new(Git2Describer::open(repo_root, settings)?),
        DescribeBackend::Command => Box::new(CommandDescriber::new(repo_root, settings)),
    };
    Ok(describer)
}

/// Main generate workflow
///
/// 1. Describe the checkout
/// 2. Derive the version tuple
/// 3. Render every template
/// 4. Write the rendered files in order
///
/// Every template is rendered before the first write, so a describe,
/// version or template error leaves all outputs untouched. A failing write
/// does not roll back files written before it.
pub fn run_generate<D: DescribeProvider + ?Sized>(
    describer: &D,
    config: &Config,
    args: &GenerateArgs,
) -> Result<GenerateReport> {
    let describe = describer.describe()?;
    debug!("Describe result: {}", describe);

    let version = VersionTuple::derive_with(&describe, config.bump_position)?;
    info!("Derived version {} from tag {}", version, describe.tag);
    ui::display_version(&version);

    let context = TemplateContext::from(&version);
    let renderer = TemplateRenderer::new(config.template_root(&args.repo_root))?;
    let jobs = TemplateJob::from_config(config, &args.repo_root);

    let mut rendered = Vec::with_capacity(jobs.len());
    for job in &jobs {
        ui::display_generating(&job.template);
        rendered.push(renderer.render(job, &context)?);
    }

    let mut written = Vec::new();
    for (job, content) in jobs.iter().zip(&rendered) {
        if args.dry_run {
            ui::display_preview(&job.output, content);
            continue;
        }
        write_output(job, content)?;
        debug!("Wrote {}", job.output.display());
        written.push(job.output.clone());
    }

    ui::display_success("Done!");

    Ok(GenerateReport { version, written })
}
