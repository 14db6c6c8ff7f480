use std::io::Write;

use tracing::{info, warn};

use crate::candidate::CandidateFile;
use crate::classify::classify;
use crate::mode::RenameMode;
use crate::negotiate::resolve_mode;
use crate::package::Package;
use crate::prompt::Prompter;
use crate::renamer::{BatchOutcome, BatchRenamer};
use crate::sniffer::TemplateSniffer;
use crate::tree::{build_tree, file_list};
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Show batches as a tree instead of a flat list.
    pub tree: bool,
    pub dry_run: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub detected: usize,
    pub unconfirmed: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RenameSummary {
    fn add(&mut self, outcome: BatchOutcome) {
        self.renamed += outcome.renamed;
        self.skipped += outcome.skipped;
        self.failed += outcome.failed;
    }
}

/// One pass over a package: classify, show, ask, rename.
pub struct RenameSession<'a, P: ?Sized, W: ?Sized> {
    package: &'a Package,
    /// How the package is called in messages.
    name: &'a str,
    options: SessionOptions,
    prompter: &'a mut P,
    out: &'a mut W,
}

impl<'a, P, W> RenameSession<'a, P, W>
where
    P: Prompter + ?Sized,
    W: Write + ?Sized,
{
    pub fn new(package: &'a Package, options: SessionOptions, prompter: &'a mut P, out: &'a mut W) -> Self {
        Self {
            package,
            name: &package.key,
            options,
            prompter,
            out,
        }
    }

    /// Uses the identifier the package was requested by in messages, e.g. its composer name.
    pub fn named(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    pub fn run<I>(&mut self, files: I) -> Result<RenameSummary>
    where
        I: IntoIterator<Item = CandidateFile>,
    {
        if self.options.dry_run {
            warn!("Dry run mode - no files will be renamed");
        }

        let sniffer = TemplateSniffer::new()?;
        let classification = classify(files, &sniffer)?;
        info!(
            "Classified candidates: {} detected, {} unconfirmed",
            classification.detected.len(),
            classification.unconfirmed.len()
        );

        let mut summary = RenameSummary {
            detected: classification.detected.len(),
            unconfirmed: classification.unconfirmed.len(),
            ..RenameSummary::default()
        };

        if !classification.detected.is_empty() {
            let headline = format!(
                "{} guaranteed template file(s) found in \"{}\". Rename automatically?",
                classification.detected.len(),
                self.name,
            );
            let outcome = self.process_batch(&classification.detected, &headline, RenameMode::RenameAll)?;
            summary.add(outcome);
        }

        if !classification.unconfirmed.is_empty() {
            let headline = format!(
                "{} potential template file(s) in \"{}\" should be checked manually:",
                classification.unconfirmed.len(),
                self.name,
            );
            let outcome = self.process_batch(
                &classification.unconfirmed,
                &headline,
                RenameMode::ConfirmInteractively,
            )?;
            summary.add(outcome);
        }

        if classification.is_empty() {
            writeln!(
                self.out,
                "No potential template files found in \"{}\".",
                self.name
            )?;
        }

        info!(
            "Rename complete: {} renamed, {} skipped, {} failed",
            summary.renamed, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    fn process_batch(
        &mut self,
        files: &[CandidateFile],
        headline: &str,
        default: RenameMode,
    ) -> Result<BatchOutcome> {
        let root = self.package.path.as_path();
        let paths = files.iter().map(CandidateFile::path);
        let lines = if self.options.tree {
            build_tree(root, paths).render()
        } else {
            file_list(root, paths)
        };

        writeln!(self.out)?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out, "{}", headline)?;

        let mode = resolve_mode(&mut *self.prompter, default)?;
        BatchRenamer::new(root, self.options.dry_run).apply(files, mode, &mut *self.prompter, &mut *self.out)
    }
}
