use std::fmt;

/// How a batch of files is handled once the user has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameMode {
    RenameAll,
    SkipAll,
    ConfirmInteractively,
}

impl RenameMode {
    /// All modes in the order they are offered.
    pub const ALL: [RenameMode; 3] = [
        RenameMode::RenameAll,
        RenameMode::SkipAll,
        RenameMode::ConfirmInteractively,
    ];

    pub fn token(self) -> &'static str {
        match self {
            RenameMode::RenameAll => "y",
            RenameMode::SkipAll => "n",
            RenameMode::ConfirmInteractively => "i",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenameMode::RenameAll => "yes, rename all",
            RenameMode::SkipAll => "no, skip all",
            RenameMode::ConfirmInteractively => "confirm interactively",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.token() == token)
    }
}

impl fmt::Display for RenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.token(), self.label())
    }
}
