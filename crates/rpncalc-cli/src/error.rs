use rpncalc::RegistrationError;
use thiserror::Error;

/// Failures that stop the command line tool. Expression errors are not
/// among them: those are printed and the loop continues.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown extension '{name}' (available: {available})")]
    UnknownExtension { name: String, available: String },

    #[error("failed to register extensions: {0}")]
    Registration(#[from] RegistrationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
