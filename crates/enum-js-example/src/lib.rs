//! Example crate demonstrating enum-js-codegen usage.
//!
//! The enums below are scanned by build.rs, which writes the JavaScript
//! lookups to `$OUT_DIR/enums.js`. The `#[derive(JsEnum)]` macro itself is a
//! no-op marker.

use enum_js_codegen::JsEnum;

/// The generated JavaScript module for this crate.
pub const ENUMS_JS: &str = include_str!(concat!(env!("OUT_DIR"), "/enums.js"));

/// How long text is truncated in list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsEnum)]
#[repr(u8)]
pub enum TruncationMode {
    ShowAll = 1,
    ShowWithEllipses,
    #[description = "Hide everything past the limit"]
    HideOverflow,
}

/// Order status as stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsEnum)]
#[repr(i16)]
pub enum OrderStatus {
    Cancelled = -1,
    Pending = 0,
    Paid = 10,
    Shipped = 20,
    #[description = "Delivered to the \"final\" address"]
    Delivered = 30,
}

/// Permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsEnum)]
#[repr(u32)]
pub enum Permission {
    Read = 1 << 0,
    Write = 1 << 1,
    Execute = 1 << 2,
    ReadWrite = 1 << 0 | 1 << 1,
}

/// Masks computed with casts at the operand's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsEnum)]
#[repr(i64)]
pub enum Wide {
    ByteMask = !0u8 as i64,
    WordMask = (-1i32 as u32) as i64,
    All = !0,
}

/// Server-side only; not exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Cold,
    Warm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_module_contains_marked_enums() {
        assert!(ENUMS_JS.contains("window.example.enums.truncationMode = (new window.example.Enum())"));
        assert!(ENUMS_JS.contains(r#".add("showAll", 1, "Show All")"#));
        assert!(ENUMS_JS.contains(r#".add("showWithEllipses", 2, "Show With Ellipses")"#));
        assert!(ENUMS_JS.contains(r#".add("hideOverflow", 3, "Hide everything past the limit")"#));
        assert!(!ENUMS_JS.contains("cacheState"));
    }

    #[test]
    fn test_generated_values_match_discriminants() {
        for status in [
            OrderStatus::Cancelled,
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Shipped,
        ] {
            let name = format!("{status:?}");
            let line = format!(
                ".add(\"{}\", {}, \"{}\")",
                enum_js_codegen::to_camel_case(&name).unwrap(),
                status as i16,
                name
            );
            assert!(ENUMS_JS.contains(&line), "missing {line}");
        }
        assert!(ENUMS_JS.contains(r#".add("delivered", 30, "Delivered to the \"final\" address")"#));
        assert!(ENUMS_JS.contains(&format!(
            ".add(\"readWrite\", {}, \"Read Write\")",
            Permission::ReadWrite as u32
        )));
    }

    #[test]
    fn test_cast_discriminants_match_compiler() {
        for mask in [Wide::ByteMask, Wide::WordMask, Wide::All] {
            let name = format!("{mask:?}");
            let line = format!(
                ".add(\"{}\", {}, ",
                enum_js_codegen::to_camel_case(&name).unwrap(),
                mask as i64
            );
            assert!(ENUMS_JS.contains(&line), "missing {line}");
        }
        assert_eq!(Wide::WordMask as i64, 4_294_967_295);
    }

    #[test]
    fn test_generated_module_has_header() {
        assert!(ENUMS_JS.starts_with("/**\n * Generated enum lookups for enum-js-example\n"));
    }
}
