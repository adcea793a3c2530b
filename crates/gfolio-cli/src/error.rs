use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] gfolio_core::ValidationError),

    #[error("[{}] {}", .0.code(), .0)]
    Finance(#[from] gfolio_core::FinanceError),

    #[error("missing credentials: set {variable}")]
    MissingCredentials { variable: &'static str },

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::MissingCredentials { .. } => 5,
            Self::Finance(gfolio_core::FinanceError::Validation(_)) => 2,
            Self::Finance(
                gfolio_core::FinanceError::AuthenticationFailed { .. }
                | gfolio_core::FinanceError::NotAuthenticated,
            ) => 5,
            Self::Finance(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
