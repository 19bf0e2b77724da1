//! Prebuilt JSON descriptor files.
//!
//! A descriptor file is a JSON array of [`TypeInfo`] values written by any
//! external extraction step, for type metadata that does not come from Rust
//! source.

use crate::error::{Error, Result};
use crate::source::TypeSource;
use crate::types::TypeInfo;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON descriptor file on disk.
#[derive(Debug, Clone)]
pub struct DescriptorFile {
    path: PathBuf,
}

impl DescriptorFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TypeSource for DescriptorFile {
    fn load(&self) -> Result<Vec<TypeInfo>> {
        let json = fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        let types: Vec<TypeInfo> =
            serde_json::from_str(&json).map_err(|source| Error::Descriptor {
                path: self.path.clone(),
                source,
            })?;
        validate(&types)?;
        Ok(types)
    }
}

/// Reject repeated member names and values outside the underlying type.
fn validate(types: &[TypeInfo]) -> Result<()> {
    for ty in types {
        let mut seen = HashSet::new();
        for member in &ty.members {
            if !seen.insert(member.name.as_str()) {
                return Err(Error::DuplicateMember {
                    type_name: ty.name.clone(),
                    member: member.name.clone(),
                });
            }
            if !ty.underlying_kind.contains(member.value) {
                return Err(Error::DiscriminantOverflow {
                    type_name: ty.name.clone(),
                    member: member.name.clone(),
                    value: member.value,
                    kind: ty.underlying_kind,
                });
            }
        }
    }
    Ok(())
}
