use miette::Diagnostic;
use thiserror::Error;

/// Main error type for glyphsheet operations
#[derive(Error, Diagnostic, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    #[diagnostic(code(glyphsheet::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(glyphsheet::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(glyphsheet::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(glyphsheet::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Subsheet '{subsheet}' region {x},{y} {width}x{height} lies outside the {sheet_width}x{sheet_height} master sheet")]
    #[diagnostic(
        code(glyphsheet::region),
        help("Check the subsheet table against the master sheet dimensions")
    )]
    RegionOutOfBounds {
        subsheet: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        sheet_width: u32,
        sheet_height: u32,
    },

    #[error("Encode error ({format}): {message}")]
    #[diagnostic(code(glyphsheet::encode))]
    Encode { format: String, message: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(glyphsheet::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl SheetError {
    /// Shorthand for an encoder failure tagged with the format name.
    pub fn encode(format: &str, message: impl std::fmt::Display) -> Self {
        SheetError::Encode {
            format: format.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
