//! Selection of the enums to export.

use crate::describe::describe;
use crate::types::{EnumMemberDescriptor, EnumTypeDescriptor, TypeInfo, TypeKind};
use tracing::{debug, warn};

/// Returns `true` if any annotation name on `ty` starts with `marker`.
///
/// The match is a case-sensitive prefix match, so the marker `JsEnum`
/// accepts `JsEnum`, `JsEnumAttribute` and `JsEnumExport` alike.
pub fn has_marker(ty: &TypeInfo, marker: &str) -> bool {
    ty.annotations.iter().any(|a| a.name.starts_with(marker))
}

/// Filter `types` down to the marked enums, preserving input order.
///
/// Types that are not fieldless enums are skipped even when marked. Member
/// descriptions are resolved here so the result can be emitted directly.
pub fn select(types: &[TypeInfo], marker: &str) -> Vec<EnumTypeDescriptor> {
    types
        .iter()
        .filter(|ty| {
            if !has_marker(ty, marker) {
                return false;
            }
            if ty.kind == TypeKind::DataEnum {
                warn!(
                    "`{}` is marked with `{}` but has variants with fields; skipping",
                    ty.name, marker
                );
            } else if !ty.is_enum() {
                debug!("`{}` is marked with `{}` but is not an enum", ty.name, marker);
            }
            ty.is_enum()
        })
        .map(to_descriptor)
        .collect()
}

fn to_descriptor(ty: &TypeInfo) -> EnumTypeDescriptor {
    EnumTypeDescriptor {
        name: ty.name.clone(),
        underlying_kind: ty.underlying_kind,
        members: ty
            .members
            .iter()
            .map(|m| EnumMemberDescriptor::new(m.name.clone(), m.value, describe(m)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnnotationInfo, RawEnumMember};

    fn color() -> TypeInfo {
        TypeInfo::new_enum(
            "Color",
            vec![
                RawEnumMember::new("Red", 0),
                RawEnumMember::new("DarkGreen", 1).with_description("Forest"),
            ],
        )
    }

    #[test]
    fn test_selects_marked_enum() {
        let types = vec![color().with_annotation(AnnotationInfo::new("JsEnum"))];
        let selected = select(&types, "JsEnum");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Color");
        assert_eq!(selected[0].members[0].description, "Red");
        assert_eq!(selected[0].members[1].description, "Forest");
    }

    #[test]
    fn test_prefix_match_accepts_suffixed_annotation() {
        let types = vec![color().with_annotation(AnnotationInfo::new("JsEnumAttribute"))];
        assert_eq!(select(&types, "JsEnum").len(), 1);
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let types = vec![color().with_annotation(AnnotationInfo::new("jsEnum"))];
        assert!(select(&types, "JsEnum").is_empty());
    }

    #[test]
    fn test_marker_must_be_a_prefix() {
        let types = vec![color().with_annotation(AnnotationInfo::new("ExportJsEnum"))];
        assert!(select(&types, "JsEnum").is_empty());
    }

    #[test]
    fn test_excludes_marked_non_enum() {
        let types = vec![
            TypeInfo::new_other("Point", TypeKind::Struct)
                .with_annotation(AnnotationInfo::new("JsEnum")),
            TypeInfo::new_other("Message", TypeKind::DataEnum)
                .with_annotation(AnnotationInfo::new("JsEnum")),
        ];
        assert!(select(&types, "JsEnum").is_empty());
    }

    #[test]
    fn test_excludes_enum_without_annotations() {
        assert!(select(&[color()], "JsEnum").is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let marker = AnnotationInfo::new("JsEnum");
        let types = vec![
            TypeInfo::new_enum("Zebra", vec![]).with_annotation(marker.clone()),
            TypeInfo::new_enum("Apple", vec![]).with_annotation(marker.clone()),
            TypeInfo::new_enum("Mango", vec![]).with_annotation(marker),
        ];
        let names: Vec<_> = select(&types, "JsEnum")
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_preserves_member_order_and_duplicate_values() {
        let types = vec![
            TypeInfo::new_enum(
                "Level",
                vec![
                    RawEnumMember::new("High", 10),
                    RawEnumMember::new("Low", -1),
                    RawEnumMember::new("Top", 10),
                ],
            )
            .with_annotation(AnnotationInfo::new("JsEnum")),
        ];
        let selected = select(&types, "JsEnum");
        let members: Vec<_> = selected[0]
            .members
            .iter()
            .map(|m| (m.name.as_str(), m.value))
            .collect();
        assert_eq!(members, [("High", 10), ("Low", -1), ("Top", 10)]);
    }
}
