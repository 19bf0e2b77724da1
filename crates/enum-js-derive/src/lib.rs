//! Proc-macro providing the `#[derive(JsEnum)]` marker.
//!
//! This macro is a **no-op annotation** - it doesn't generate any code.
//! It marks an enum for export by `enum-js-codegen` and registers the
//! `description` helper attribute so variants can carry an explicit
//! description.
//!
//! # Example
//!
//! ```rust,ignore
//! use enum_js_codegen::JsEnum;
//!
//! #[derive(JsEnum)]
//! enum DisplayMode {
//!     ShowAll,
//!     #[description = "Show with \"...\""]
//!     ShowWithEllipses,
//! }
//! ```
//!
//! Then in your build.rs:
//!
//! ```rust,ignore
//! use enum_js_codegen::EnumGenerator;
//!
//! fn main() {
//!     EnumGenerator::new("app", "JsEnum")
//!         .add_source_file("src/lib.rs").unwrap()
//!         .write_to_file("enums.js").unwrap();
//! }
//! ```

use proc_macro::TokenStream;

/// Marker derive macro for JavaScript enum generation.
///
/// The actual generation happens in build.rs (or the `enums-to-js` CLI)
/// by scanning the source for this derive.
#[proc_macro_derive(JsEnum, attributes(description))]
pub fn derive_js_enum(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}
