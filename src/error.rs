//! Application error types using thiserror
//!
//! Error hierarchy:
//! - DocumentError: Issues with the pre-commit configuration file
//! - SpecifierError: Dependency pins that cannot be decomposed
//! - RegistryError: Issues with package registry communication
//! - ResolveError: Version resolution failures
//! - ConfigError: Issues with upadup settings
//! - PatchError: Edits that cannot be applied to the file text

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Pre-commit configuration file related errors
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Version resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Settings related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Patching errors
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Writing progress or diff output failed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors related to the pre-commit configuration document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Document file not found
    #[error("upadup cannot run without {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the document
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the document
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error
    #[error("failed to parse YAML at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// The document parsed but does not have the expected structure
    #[error("unexpected structure at '{path}': {message}")]
    Shape { path: String, message: String },
}

/// Errors produced while decomposing a dependency pin
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecifierError {
    /// No supported comparator appears in the string
    #[error("specifier did not match a supported format: {specifier}")]
    Unsupported { specifier: String },

    /// A comparator was found but the rest of the pin is malformed
    #[error("could not parse specifier '{specifier}': {reason}")]
    Parse { specifier: String, reason: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// A helper command-line tool failed
    #[error("`{command}` failed: {message}")]
    Cli { command: String, message: String },
}

/// Errors raised by the version resolver
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Tag-backed dependency on a host other than GitHub
    #[error("'{dependency}' is not a supported dependency host (expected github.com)")]
    UnsupportedHost { dependency: String },

    /// Tag-backed dependency that does not name an owner and repository
    #[error("'{dependency}' does not name an owner and repository")]
    MalformedReference { dependency: String },

    /// Underlying registry failure
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors related to upadup settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file has the wrong shape
    #[error("malformed config: {message}")]
    Malformed { message: String },

    /// Settings file is not valid TOML
    #[error("failed to parse {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Settings file could not be read
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while applying edits to file content
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatchError {
    /// Edit refers to a line past the end of the file
    #[error("edit targets line {line}, but the file has {line_count} lines")]
    LineOutOfRange { line: usize, line_count: usize },

    /// Text at the edit location is not the located string
    #[error("expected '{expected}' at line {line}, column {column}, found '{found}'")]
    SpanMismatch {
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },
}

impl DocumentError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        DocumentError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Shape error
    pub fn shape(path: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentError::Shape {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl SpecifierError {
    /// Creates a new Unsupported error
    pub fn unsupported(specifier: impl Into<String>) -> Self {
        SpecifierError::Unsupported {
            specifier: specifier.into(),
        }
    }

    /// Creates a new Parse error
    pub fn parse(specifier: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecifierError::Parse {
            specifier: specifier.into(),
            reason: reason.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new Cli error
    pub fn cli(command: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Cli {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new Malformed error
    pub fn malformed(message: impl Into<String>) -> Self {
        ConfigError::Malformed {
            message: message.into(),
        }
    }
}
