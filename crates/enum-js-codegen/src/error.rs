//! Error type shared by every stage of the generator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading type metadata or generating output.
///
/// Every variant is terminal for a run. Load errors (see
/// [`Error::is_load_error`]) mean no output should be written at all.
#[derive(Error, Debug)]
pub enum Error {
    /// A source or descriptor file could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// The file or directory involved
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A Rust source file is not valid Rust.
    #[error("failed to parse {origin}: {source}")]
    Parse {
        /// File path, or `<source>` for in-memory input
        origin: String,
        #[source]
        source: syn::Error,
    },

    /// A descriptor file is not a valid JSON list of type descriptors.
    #[error("invalid descriptor file {}: {source}", .path.display())]
    Descriptor {
        /// The descriptor file
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The module path is neither a directory, a `.rs` file nor a `.json` file.
    #[error("unsupported module path {}: expected a directory, a .rs file or a .json descriptor file", .0.display())]
    UnsupportedSource(PathBuf),

    /// An explicit discriminant could not be evaluated to an integer.
    #[error("cannot evaluate discriminant of `{type_name}::{member}`: `{expr}`")]
    UnsupportedDiscriminant {
        /// Enclosing enum
        type_name: String,
        /// Variant carrying the discriminant
        member: String,
        /// The discriminant expression as written
        expr: String,
    },

    /// A discriminant does not fit the enum's underlying integer type.
    #[error("discriminant {value} of `{type_name}::{member}` does not fit in {kind}")]
    DiscriminantOverflow {
        /// Enclosing enum
        type_name: String,
        /// Variant carrying the discriminant
        member: String,
        /// The computed value
        value: i128,
        /// The underlying integer type
        kind: crate::UnderlyingKind,
    },

    /// Two members of one enum share a name.
    #[error("duplicate member `{member}` in enum `{type_name}`")]
    DuplicateMember {
        /// Enclosing enum
        type_name: String,
        /// The repeated member name
        member: String,
    },

    /// A type or member name is empty, or a type name is not usable as a
    /// JavaScript property name.
    #[error("malformed identifier `{0}`")]
    MalformedIdentifier(String),

    /// The namespace or root object is not a dotted JavaScript identifier path.
    #[error("invalid JavaScript namespace `{0}`")]
    InvalidNamespace(String),

    /// Writing generated output to a writer failed.
    #[error("failed to write generated output: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    /// Returns `true` if the error happened while resolving input metadata.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::Parse { .. }
                | Error::Descriptor { .. }
                | Error::UnsupportedSource(_)
                | Error::UnsupportedDiscriminant { .. }
                | Error::DiscriminantOverflow { .. }
                | Error::DuplicateMember { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
