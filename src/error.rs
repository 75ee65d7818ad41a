//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `cmake-build` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Phase`**: Identifies which of the two external invocations failed
//!   when an external build tool exits with a non-zero status.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures.
//!
//! The error taxonomy is deliberately small. Every error is fatal: nothing is
//! retried, and a failed invocation aborts the whole run. The external build
//! tool's own diagnostics stream through to the user untouched; `BuildTool`
//! only adds the phase and the exit status on top.

use std::fmt;

use thiserror::Error;

/// Which external invocation failed: the CMake generate step or the
/// subsequent build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The generator invocation that produces native build files.
    Generate,
    /// The build invocation that compiles and links.
    Build,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate => write!(f, "generate"),
            Self::Build => write!(f, "build"),
        }
    }
}

/// Main error type for cmake-build operations
#[derive(Error, Debug)]
pub enum Error {
    /// A requested configuration, or an ancestor named via `inherits`, is
    /// absent from the catalog.
    #[error("Build configuration \"{name}\" does not exist in the catalog")]
    UnknownConfiguration { name: String },

    /// A configuration's ancestor chain revisits a name (self-reference or a
    /// longer cycle). Reported with the offending name.
    #[error("Inheritance loop detected with build configuration \"{name}\"")]
    InheritanceCycle { name: String },

    /// A `-o` option override did not contain an `=` separator.
    #[error("Malformed option override \"{raw}\": expected KEY=VALUE")]
    MalformedOverride { raw: String },

    /// No configuration was requested on the command line and the catalog
    /// declares no `default` field.
    #[error("No build configuration requested and the catalog declares no default")]
    MissingDefault,

    /// The catalog document or the resolved configuration could not be
    /// interpreted.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// An external invocation exited with a non-zero status.
    #[error("The {phase} step failed with exit status {status}")]
    BuildTool { phase: Phase, status: i32 },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the cmake-build error type
pub type Result<T> = std::result::Result<T, Error>;
