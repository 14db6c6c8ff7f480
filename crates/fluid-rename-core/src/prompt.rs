use tracing::debug;

use crate::Result;

/// Questions asked while processing a package.
///
/// `choose` must answer with one of the offered tokens; `confirm` with a
/// plain yes or no. Both block until an answer is available.
pub trait Prompter {
    fn choose(&mut self, prompt: &str, options: &[(&str, &str)], default: &str) -> Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Answers every question with its default, for `--no-interaction` runs.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn choose(&mut self, prompt: &str, _options: &[(&str, &str)], default: &str) -> Result<String> {
        debug!("{} -> {}", prompt, default);
        Ok(default.to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        debug!("{} -> {}", prompt.trim(), default);
        Ok(default)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;

    /// Replays canned answers and records the questions it was asked.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub choices: VecDeque<String>,
        pub confirmations: VecDeque<bool>,
        pub asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn with_choices(choices: &[&str]) -> Self {
            Self {
                choices: choices.iter().map(|c| c.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn with_confirmations(confirmations: &[bool]) -> Self {
            Self {
                confirmations: confirmations.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn choose(&mut self, prompt: &str, _options: &[(&str, &str)], _default: &str) -> Result<String> {
            self.asked.push(prompt.to_string());
            Ok(self.choices.pop_front().expect("unexpected choice prompt"))
        }

        fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
            self.asked.push(prompt.to_string());
            Ok(self.confirmations.pop_front().expect("unexpected confirmation"))
        }
    }
}
