use std::path::PathBuf;

pub mod candidate;
pub mod classify;
pub mod finder;
pub mod mode;
pub mod negotiate;
pub mod package;
pub mod prompt;
pub mod renamer;
pub mod session;
pub mod sniffer;
pub mod tree;

pub use candidate::{CandidateFile, MARKER, PREFIX_LENGTH};
pub use classify::{classify, Classification};
pub use finder::{parse_extensions, FileFinder, ScanOptions};
pub use mode::RenameMode;
pub use negotiate::resolve_mode;
pub use package::{Package, PackageRegistry};
pub use prompt::{DefaultsPrompter, Prompter};
pub use renamer::{BatchOutcome, BatchRenamer};
pub use session::{RenameSession, RenameSummary, SessionOptions};
pub use sniffer::TemplateSniffer;
pub use tree::{build_tree, file_list, PathTreeNode};

#[derive(thiserror::Error, Debug)]
pub enum FluidRenameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("Invalid detection pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Package \"{name}\" is not available.")]
    PackageNotFound { name: String },
    #[error("No file extensions have been specified.")]
    InvalidExtensionList,
    #[error("Prompt returned unknown rename mode '{token}'")]
    UnknownRenameMode { token: String },
    #[error("Prompt cancelled by user")]
    PromptCancelled,
    #[error("Failed to rename {from:?} to {to:?}: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Refusing to rename {from:?}: {to:?} already exists")]
    TargetExists { from: PathBuf, to: PathBuf },
}

pub type Result<T> = std::result::Result<T, FluidRenameError>;
