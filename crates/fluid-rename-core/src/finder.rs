use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::candidate::CandidateFile;
use crate::{FluidRenameError, Result};

/// Directories that never contain templates.
pub const EXCLUDED_DIRECTORIES: &[&str] = &["Classes", "node_modules", "vendor"];

pub const TESTS_DIRECTORY: &str = "Tests";

/// File names that match the extension filter but are never templates.
pub const EXCLUDED_FILE_NAMES: &[&str] = &[
    "*.fluid.*",
    "composer.json",
    "package.json",
    "package-lock.json",
    "guides.xml",
    "LICENSE.txt",
    "README.txt",
    "CREDITS.txt",
    "*.rst.txt",
    "ext_conf_template.txt",
];

pub const DEFAULT_EXTENSIONS: &str = "html,txt,xml,json";

/// Splits a comma-separated extension list, dropping blank entries.
pub fn parse_extensions(raw: &str) -> Result<Vec<String>> {
    let extensions: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect();
    if extensions.is_empty() {
        return Err(FluidRenameError::InvalidExtensionList);
    }
    Ok(extensions)
}

/// Which files of a package are considered at all.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extensions: Vec<String>,
    pub include_tests: bool,
}

impl ScanOptions {
    pub fn finder(&self, root: &Path) -> FileFinder {
        let mut excluded: Vec<&str> = EXCLUDED_DIRECTORIES.to_vec();
        if !self.include_tests {
            excluded.push(TESTS_DIRECTORY);
        }
        FileFinder::new(root)
            .name(self.extensions.iter().map(|ext| format!("*.{}", ext)))
            .not_name(EXCLUDED_FILE_NAMES.iter().copied())
            .exclude(excluded)
    }
}

/// Recursive file search with name globs and excluded directory names.
#[derive(Debug, Clone)]
pub struct FileFinder {
    root: PathBuf,
    names: Vec<String>,
    not_names: Vec<String>,
    excluded_dirs: Vec<String>,
    ignore_dot_files: bool,
}

impl FileFinder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            names: Vec::new(),
            not_names: Vec::new(),
            excluded_dirs: Vec::new(),
            ignore_dot_files: true,
        }
    }

    /// Adds file name globs; a file must match one of them. Without any, all names match.
    pub fn name<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn not_name<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_names.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Prunes directories with these names at any depth.
    pub fn exclude<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn ignore_dot_files(mut self, ignore: bool) -> Self {
        self.ignore_dot_files = ignore;
        self
    }

    /// Walks the root in file name order and returns the matching files, including symlinks to files.
    pub fn find(&self) -> Result<Vec<CandidateFile>> {
        let names = build_glob_set(&self.names)?;
        let not_names = build_glob_set(&self.not_names)?;

        debug!("Searching for candidates in {:?}", self.root);

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.keep_entry(entry));

        for entry in walker {
            let entry = entry?;
            // Symlinks are reported as such by walkdir; keep those pointing at a file.
            let is_linked_file = entry.path_is_symlink() && entry.path().is_file();
            if !entry.file_type().is_file() && !is_linked_file {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            let included = self.names.is_empty() || names.is_match(file_name.as_ref());
            if !included || not_names.is_match(file_name.as_ref()) {
                continue;
            }
            let size = if is_linked_file {
                std::fs::metadata(entry.path())?.len()
            } else {
                entry.metadata()?.len()
            };
            files.push(CandidateFile::new(entry.into_path(), size));
        }

        debug!("Found {} candidate file(s)", files.len());
        Ok(files)
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if self.ignore_dot_files && name.starts_with('.') {
            return false;
        }
        if entry.file_type().is_dir() && self.excluded_dirs.iter().any(|dir| *dir == name) {
            debug!("Excluding directory: {:?}", entry.path());
            return false;
        }
        true
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| FluidRenameError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| FluidRenameError::Glob {
        pattern: patterns.join(","),
        source,
    })
}
