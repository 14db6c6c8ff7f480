use clap::{Parser, Subcommand};
use fluid_rename_core::finder::DEFAULT_EXTENSIONS;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fluid-rename")]
#[command(version)]
#[command(about = "Add the *.fluid.* file extension to Fluid template files")]
#[command(long_about = "Scans a TYPO3 package for template files, detects which of them are Fluid templates and renames them to carry the .fluid. marker in their file extension, e.g. Default.html -> Default.fluid.html.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Rename Fluid template files of a package")]
    Templates {
        #[arg(help = "TYPO3 package name (either extension name or composer package name)")]
        package: String,

        #[arg(long, help = "Include Tests/ directory")]
        include_tests: bool,

        #[arg(long, help = "Show detected template files in a tree instead of a list")]
        tree: bool,

        #[arg(
            long,
            default_value = DEFAULT_EXTENSIONS,
            help = "Comma-separated list of file extensions that should be considered potential Fluid templates"
        )]
        extensions: String,

        #[arg(long, help = "Project directory to search for packages (defaults to current directory)")]
        project_root: Option<PathBuf>,

        #[arg(long, help = "Perform a dry run without renaming files")]
        dry_run: bool,

        #[arg(short = 'n', long, help = "Do not ask any question, use the default answers")]
        no_interaction: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
