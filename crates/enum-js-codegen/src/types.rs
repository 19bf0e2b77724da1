//! Type metadata consumed by the generator.
//!
//! [`TypeInfo`] is the input side: everything a [`TypeSource`](crate::TypeSource)
//! knows about one declared type. [`EnumTypeDescriptor`] is the output of
//! selection, ready to be emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the annotation carrying an explicit member description.
pub const DESCRIPTION_ANNOTATION: &str = "description";

/// The integer type backing an enum's discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlyingKind {
    I8,
    U8,
    I16,
    U16,
    #[default]
    I32,
    U32,
    I64,
    U64,
    Isize,
    Usize,
}

impl UnderlyingKind {
    /// Parse a Rust primitive integer name (`"u8"`, `"isize"`, ...).
    pub fn from_primitive(name: &str) -> Option<Self> {
        let kind = match name {
            "i8" => UnderlyingKind::I8,
            "u8" => UnderlyingKind::U8,
            "i16" => UnderlyingKind::I16,
            "u16" => UnderlyingKind::U16,
            "i32" => UnderlyingKind::I32,
            "u32" => UnderlyingKind::U32,
            "i64" => UnderlyingKind::I64,
            "u64" => UnderlyingKind::U64,
            "isize" => UnderlyingKind::Isize,
            "usize" => UnderlyingKind::Usize,
            _ => return None,
        };
        Some(kind)
    }

    /// The Rust spelling of this integer type.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnderlyingKind::I8 => "i8",
            UnderlyingKind::U8 => "u8",
            UnderlyingKind::I16 => "i16",
            UnderlyingKind::U16 => "u16",
            UnderlyingKind::I32 => "i32",
            UnderlyingKind::U32 => "u32",
            UnderlyingKind::I64 => "i64",
            UnderlyingKind::U64 => "u64",
            UnderlyingKind::Isize => "isize",
            UnderlyingKind::Usize => "usize",
        }
    }

    /// Inclusive value range. Pointer-sized kinds are treated as 64-bit.
    pub fn range(&self) -> (i128, i128) {
        match self {
            UnderlyingKind::I8 => (i8::MIN.into(), i8::MAX.into()),
            UnderlyingKind::U8 => (0, u8::MAX.into()),
            UnderlyingKind::I16 => (i16::MIN.into(), i16::MAX.into()),
            UnderlyingKind::U16 => (0, u16::MAX.into()),
            UnderlyingKind::I32 => (i32::MIN.into(), i32::MAX.into()),
            UnderlyingKind::U32 => (0, u32::MAX.into()),
            UnderlyingKind::I64 | UnderlyingKind::Isize => (i64::MIN.into(), i64::MAX.into()),
            UnderlyingKind::U64 | UnderlyingKind::Usize => (0, u64::MAX.into()),
        }
    }

    pub fn contains(&self, value: i128) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }

    /// Width in bits. Pointer-sized kinds are treated as 64-bit.
    pub fn bits(&self) -> u32 {
        match self {
            UnderlyingKind::I8 | UnderlyingKind::U8 => 8,
            UnderlyingKind::I16 | UnderlyingKind::U16 => 16,
            UnderlyingKind::I32 | UnderlyingKind::U32 => 32,
            _ => 64,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            UnderlyingKind::I8
                | UnderlyingKind::I16
                | UnderlyingKind::I32
                | UnderlyingKind::I64
                | UnderlyingKind::Isize
        )
    }

    /// Truncate or sign-extend `value` to this type, like an `as` cast.
    pub fn wrap(&self, value: i128) -> i128 {
        let bits = self.bits();
        let truncated = value & ((1i128 << bits) - 1);
        if self.is_signed() && truncated >> (bits - 1) == 1 {
            truncated - (1i128 << bits)
        } else {
            truncated
        }
    }
}

impl fmt::Display for UnderlyingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What sort of type a [`TypeInfo`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// An enum whose variants carry no fields.
    #[default]
    Enum,
    /// An enum with at least one tuple or struct variant.
    DataEnum,
    Struct,
    Union,
}

/// One annotation (attribute, derive) declared on a type or member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationInfo {
    /// Bare annotation type name, e.g. `"JsEnum"` for `#[derive(enum_js::JsEnum)]`.
    pub name: String,
    /// Literal string argument, e.g. the text of `#[description = "..."]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl AnnotationInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// An enum member as declared, before its description is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEnumMember {
    pub name: String,
    pub value: i128,
    #[serde(default)]
    pub annotations: Vec<AnnotationInfo>,
}

impl RawEnumMember {
    pub fn new(name: impl Into<String>, value: i128) -> Self {
        Self {
            name: name.into(),
            value,
            annotations: Vec::new(),
        }
    }

    /// Attach an explicit description annotation.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.annotations
            .push(AnnotationInfo::with_value(DESCRIPTION_ANNOTATION, description));
        self
    }

    /// The explicit description, if the member carries one.
    pub fn explicit_description(&self) -> Option<&str> {
        self.annotations
            .iter()
            .find(|a| a.name == DESCRIPTION_ANNOTATION)
            .and_then(|a| a.value.as_deref())
    }
}

/// Everything known about one declared type.
///
/// This is also the on-disk format of descriptor files:
///
/// ```json
/// [{ "name": "Color", "underlying_kind": "u8",
///    "annotations": [{ "name": "JsEnumAttribute" }],
///    "members": [{ "name": "Red", "value": 0 }] }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub underlying_kind: UnderlyingKind,
    #[serde(default)]
    pub annotations: Vec<AnnotationInfo>,
    /// Declaration order is preserved.
    #[serde(default)]
    pub members: Vec<RawEnumMember>,
}

impl TypeInfo {
    /// A fieldless enum with no annotations yet.
    pub fn new_enum(name: impl Into<String>, members: Vec<RawEnumMember>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Enum,
            underlying_kind: UnderlyingKind::default(),
            annotations: Vec::new(),
            members,
        }
    }

    /// A non-enum type of the given kind.
    pub fn new_other(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            underlying_kind: UnderlyingKind::default(),
            annotations: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationInfo) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_underlying_kind(mut self, kind: UnderlyingKind) -> Self {
        self.underlying_kind = kind;
        self
    }

    /// Only fieldless enums have integer members that can be exported.
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }
}

/// A selected enum, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTypeDescriptor {
    pub name: String,
    pub underlying_kind: UnderlyingKind,
    pub members: Vec<EnumMemberDescriptor>,
}

/// A member of a selected enum with its resolved description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMemberDescriptor {
    pub name: String,
    pub value: i128,
    pub description: String,
}

impl EnumMemberDescriptor {
    pub fn new(name: impl Into<String>, value: i128, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underlying_kind_ranges() {
        assert!(UnderlyingKind::U8.contains(255));
        assert!(!UnderlyingKind::U8.contains(256));
        assert!(!UnderlyingKind::U8.contains(-1));
        assert!(UnderlyingKind::I8.contains(-128));
        assert!(UnderlyingKind::U64.contains(u64::MAX.into()));
        assert!(!UnderlyingKind::Isize.contains(u64::MAX.into()));
    }

    #[test]
    fn test_underlying_kind_wrap_matches_as_casts() {
        assert_eq!(UnderlyingKind::U8.wrap(-1), i128::from(-1i8 as u8));
        assert_eq!(UnderlyingKind::U8.wrap(300), i128::from(300i32 as u8));
        assert_eq!(UnderlyingKind::I8.wrap(200), i128::from(200u8 as i8));
        assert_eq!(UnderlyingKind::U32.wrap(-1), i128::from(-1i32 as u32));
        assert_eq!(UnderlyingKind::I64.wrap(i128::from(u64::MAX)), -1);
        assert_eq!(UnderlyingKind::I16.wrap(-5), -5);
    }

    #[test]
    fn test_underlying_kind_from_primitive() {
        assert_eq!(UnderlyingKind::from_primitive("u16"), Some(UnderlyingKind::U16));
        assert_eq!(UnderlyingKind::from_primitive("C"), None);
        assert_eq!(UnderlyingKind::Usize.to_string(), "usize");
    }

    #[test]
    fn test_explicit_description() {
        let member = RawEnumMember::new("Red", 0).with_description("Bright red");
        assert_eq!(member.explicit_description(), Some("Bright red"));
        assert_eq!(RawEnumMember::new("Red", 0).explicit_description(), None);
    }

    #[test]
    fn test_description_annotation_without_value_is_ignored() {
        let mut member = RawEnumMember::new("Red", 0);
        member.annotations.push(AnnotationInfo::new(DESCRIPTION_ANNOTATION));
        assert_eq!(member.explicit_description(), None);
    }

    #[test]
    fn test_only_fieldless_enums_are_enums() {
        assert!(TypeInfo::new_enum("Color", vec![]).is_enum());
        assert!(!TypeInfo::new_other("Message", TypeKind::DataEnum).is_enum());
        assert!(!TypeInfo::new_other("Point", TypeKind::Struct).is_enum());
    }
}
