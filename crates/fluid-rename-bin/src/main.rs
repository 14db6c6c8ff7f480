mod cli;
mod prompt;

use anyhow::Result;
use cli::{Cli, Commands};
use fluid_rename_core::{
    parse_extensions, DefaultsPrompter, PackageRegistry, Prompter, RenameSession, ScanOptions,
    SessionOptions,
};
use prompt::InquirePrompter;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    setup_logging(&cli)?;

    info!("Starting fluid-rename");

    match cli.command {
        Commands::Templates {
            package,
            include_tests,
            tree,
            extensions,
            project_root,
            dry_run,
            no_interaction,
        } => {
            let scan = ScanOptions {
                extensions: parse_extensions(&extensions)?,
                include_tests,
            };
            let options = SessionOptions { tree, dry_run };
            handle_templates_command(package, scan, options, project_root, no_interaction)?;
        }
    }

    info!("fluid-rename completed successfully");
    Ok(())
}

fn handle_templates_command(
    package_name: String,
    scan: ScanOptions,
    options: SessionOptions,
    project_root: Option<PathBuf>,
    no_interaction: bool,
) -> Result<()> {
    let project_root = match project_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    info!("Project root: {:?}", project_root);
    debug!("Extensions: {:?}", scan.extensions);
    debug!("Include tests: {}", scan.include_tests);

    let registry = PackageRegistry::discover(&project_root)?;
    let package = registry.get(&package_name)?;
    info!("Package '{}' found at {:?}", package.key, package.path);

    let files = scan.finder(&package.path).find()?;

    let mut prompter: Box<dyn Prompter> = if no_interaction {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(InquirePrompter)
    };
    let mut stdout = std::io::stdout();

    let summary = RenameSession::new(&package, options, prompter.as_mut(), &mut stdout)
        .named(&package_name)
        .run(files)?;

    if summary.detected + summary.unconfirmed > 0 {
        println!();
        println!("Renaming complete!");
        println!("  Files renamed: {}", summary.renamed);
        println!("  Files skipped: {}", summary.skipped);
        if summary.failed > 0 {
            println!("  Files failed: {}", summary.failed);
        }
    }

    if summary.failed > 0 {
        anyhow::bail!("{} file(s) could not be renamed", summary.failed);
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact()
                .with_writer(std::io::stderr)
        )
        .with(filter)
        .init();

    Ok(())
}
