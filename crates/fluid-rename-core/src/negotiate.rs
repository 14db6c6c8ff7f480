use tracing::debug;

use crate::mode::RenameMode;
use crate::prompt::Prompter;
use crate::{FluidRenameError, Result};

/// Asks which [`RenameMode`] applies to the batch that was just shown.
pub fn resolve_mode<P: Prompter + ?Sized>(prompter: &mut P, default: RenameMode) -> Result<RenameMode> {
    let options: Vec<(&str, &str)> = RenameMode::ALL
        .iter()
        .map(|mode| (mode.token(), mode.label()))
        .collect();
    let question = format!("Rename automatically? (default: {})", default.token());

    let token = prompter.choose(&question, &options, default.token())?;
    let mode = RenameMode::from_token(&token)
        .ok_or(FluidRenameError::UnknownRenameMode { token })?;

    debug!("Rename mode: {:?}", mode);
    Ok(mode)
}
