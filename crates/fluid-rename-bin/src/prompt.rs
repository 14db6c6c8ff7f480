use fluid_rename_core::{FluidRenameError, Prompter};
use inquire::{Confirm, InquireError, Select};
use tracing::debug;

/// Asks questions on the terminal.
pub struct InquirePrompter;

fn cancelled(error: InquireError) -> FluidRenameError {
    debug!("Prompt failed: {}", error);
    FluidRenameError::PromptCancelled
}

fn option_line(token: &str, label: &str) -> String {
    format!("[{}] {}", token, label)
}

impl Prompter for InquirePrompter {
    fn choose(
        &mut self,
        prompt: &str,
        options: &[(&str, &str)],
        default: &str,
    ) -> fluid_rename_core::Result<String> {
        let lines: Vec<String> = options
            .iter()
            .map(|(token, label)| option_line(token, label))
            .collect();
        let cursor = options
            .iter()
            .position(|(token, _)| *token == default)
            .unwrap_or(0);

        let answer = Select::new(prompt, lines)
            .with_starting_cursor(cursor)
            .raw_prompt()
            .map_err(cancelled)?;

        Ok(options[answer.index].0.to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> fluid_rename_core::Result<bool> {
        Confirm::new(prompt.trim())
            .with_default(default)
            .prompt()
            .map_err(cancelled)
    }
}
