//! Sources of type metadata.
//!
//! The generator never inspects types itself; it asks a [`TypeSource`] for
//! the full list of declared types and works from that.

mod descriptor;
mod rust;

pub use descriptor::DescriptorFile;
pub use rust::{RustSource, parse_rust_source};

use crate::error::{Error, Result};
use crate::types::TypeInfo;
use std::path::Path;

/// Something that can produce the declared types of a module.
///
/// Loading is all-or-nothing: a source either returns every type or fails.
pub trait TypeSource {
    fn load(&self) -> Result<Vec<TypeInfo>>;
}

/// Load types from `path`, choosing the source by the shape of the path.
///
/// - a directory is scanned recursively for `.rs` files
/// - a `.rs` file is parsed as Rust source
/// - a `.json` file is read as a descriptor file
pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<TypeInfo>> {
    let path = path.as_ref();
    let metadata = path.metadata().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.is_dir() {
        return RustSource::dir(path).load();
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("rs") => RustSource::file(path).load(),
        Some("json") => DescriptorFile::new(path).load(),
        _ => Err(Error::UnsupportedSource(path.to_path_buf())),
    }
}
