use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use verstamp::cli::{build_describer, run_generate, GenerateArgs};
use verstamp::config;
use verstamp::git::resolve_repo_root;
use verstamp::ui;

#[derive(clap::Parser)]
#[command(
    name = "verstamp",
    version,
    about = "Stamp git describe version metadata into templated build files"
)]
struct Args {
    #[arg(short, long, help = "Repository to stamp (default: discovered from the current directory)")]
    repo: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Render templates and print them without writing files")]
    dry_run: bool,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<()> {
    let start = match args.repo {
        Some(path) => path,
        None => std::env::current_dir().context("Cannot read current directory")?,
    };
    let repo_root = resolve_repo_root(&start)?;
    log::debug!("Repository root: {}", repo_root.display());

    let config = config::load_config(args.config.as_deref(), &repo_root)?;
    let describer = build_describer(&config, &repo_root)?;

    let generate_args = GenerateArgs {
        repo_root,
        dry_run: args.dry_run,
    };
    run_generate(describer.as_ref(), &config, &generate_args)?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
