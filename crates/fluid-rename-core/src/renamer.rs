use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::candidate::CandidateFile;
use crate::mode::RenameMode;
use crate::prompt::Prompter;
use crate::tree::relative_display;
use crate::{FluidRenameError, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct BatchRenamer<'a> {
    root: &'a Path,
    dry_run: bool,
}

impl<'a> BatchRenamer<'a> {
    pub fn new(root: &'a Path, dry_run: bool) -> Self {
        Self { root, dry_run }
    }

    /// Applies `mode` to every file of the batch, in order.
    ///
    /// A failing rename is reported and counted; the rest of the batch is
    /// still processed.
    pub fn apply<P, W>(
        &self,
        files: &[CandidateFile],
        mode: RenameMode,
        prompter: &mut P,
        out: &mut W,
    ) -> Result<BatchOutcome>
    where
        P: Prompter + ?Sized,
        W: Write + ?Sized,
    {
        let mut outcome = BatchOutcome::default();
        if files.is_empty() {
            return Ok(outcome);
        }

        match mode {
            RenameMode::SkipAll => {
                writeln!(out, "Skipping ...")?;
                outcome.skipped = files.len();
                return Ok(outcome);
            }
            RenameMode::RenameAll => writeln!(out, "New file names:")?,
            RenameMode::ConfirmInteractively => writeln!(out, "Files to check:")?,
        }

        for file in files {
            let old_path = file.path();
            let Some(new_path) = file.marked_path() else {
                warn!("Cannot add marker to file name: {:?}", old_path);
                writeln!(
                    out,
                    "  {} has no file extension. Skipping ...",
                    relative_display(self.root, old_path)
                )?;
                outcome.skipped += 1;
                continue;
            };

            if mode == RenameMode::RenameAll {
                writeln!(out, "  {}", relative_display(self.root, &new_path))?;
            } else {
                let question = format!(
                    "  {} to {}. Rename now?",
                    relative_display(self.root, old_path),
                    new_path.file_name().unwrap_or_default().to_string_lossy(),
                );
                if !prompter.confirm(&question, false)? {
                    writeln!(out, "    Skipping ...")?;
                    outcome.skipped += 1;
                    continue;
                }
            }

            match self.rename(old_path, &new_path) {
                Ok(()) => outcome.renamed += 1,
                Err(e) => {
                    error!("{}", e);
                    writeln!(out, "    Failed: {}", e)?;
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if to.exists() {
            return Err(FluidRenameError::TargetExists {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        if self.dry_run {
            info!("Would rename file: {:?} -> {:?}", from, to);
            return Ok(());
        }
        debug!("Renaming file: {:?} -> {:?}", from, to);
        fs::rename(from, to).map_err(|source| FluidRenameError::RenameFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
        info!("Renamed file: {:?} -> {:?}", from, to);
        Ok(())
    }
}
