use miette::Diagnostic;
use thiserror::Error;

/// Main error type for portalkit operations
#[derive(Error, Diagnostic, Debug)]
pub enum PortalError {
    #[error("IO error: {0}")]
    #[diagnostic(code(portalkit::io))]
    Io(#[from] std::io::Error),

    #[error("Parse error: {message}")]
    #[diagnostic(code(portalkit::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid pattern rule: {message}")]
    #[diagnostic(code(portalkit::pattern))]
    Pattern {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Transport error: {message}")]
    #[diagnostic(code(portalkit::transport))]
    Transport { message: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(portalkit::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PortalError>;
