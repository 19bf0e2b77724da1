//! # enum-js-codegen
//!
//! JavaScript enum generator. This crate finds enums marked with an include
//! annotation and emits a self-contained script that rebuilds each of them as
//! a runtime object with name/value/description lookups in both directions.
//!
//! ## Features
//!
//! - Reads Rust source files (or whole directories) and picks up fieldless
//!   enums annotated with a marker such as `#[derive(JsEnum)]`
//! - Reads prebuilt JSON descriptor files for metadata from other toolchains
//! - Prefix matching on annotation names (`JsEnum` matches `JsEnumAttribute`)
//! - Explicit member descriptions via `#[description = "..."]`, otherwise
//!   derived from the member name (`ShowWithEllipses` → `Show With Ellipses`)
//! - Explicit and implicit discriminants, with `#[repr(..)]` range checks
//!
//! ## Quick Start
//!
//! ### Annotate your enums
//!
//! ```rust,ignore
//! use enum_js_codegen::JsEnum;
//!
//! #[derive(JsEnum)]
//! #[repr(u8)]
//! pub enum DisplayMode {
//!     ShowAll = 1,
//!     #[description = "Show with \"...\""]
//!     ShowWithEllipses,
//! }
//! ```
//!
//! Then in `build.rs`:
//!
//! ```no_run
//! use enum_js_codegen::EnumGenerator;
//!
//! fn main() {
//!     EnumGenerator::new("app", "JsEnum")
//!         .add_source_file("src/lib.rs").unwrap()
//!         .write_to_file("generated/enums.js").unwrap();
//!
//!     println!("cargo:rerun-if-changed=src/lib.rs");
//! }
//! ```
//!
//! ### Generated output
//!
//! ```js
//! window.app.enums.displayMode = (new window.app.Enum())
//!   .add("showAll", 1, "Show All")
//!   .add("showWithEllipses", 2, "Show with \"...\"")
//!   ;
//!
//! app.enums.displayMode.showAll;            // 1
//! app.enums.displayMode[2];                 // "showWithEllipses"
//! app.enums.displayMode.getDescription(1);  // "Show All"
//! app.enums.displayMode.getAll();           // [{ id, name, description }, ...]
//! ```
//!
//! ### Using the pipeline directly
//!
//! ```
//! use enum_js_codegen::{AnnotationInfo, RawEnumMember, TypeInfo, generate};
//!
//! let types = vec![
//!     TypeInfo::new_enum("Color", vec![
//!         RawEnumMember::new("Red", 0),
//!         RawEnumMember::new("Green", 1),
//!     ])
//!     .with_annotation(AnnotationInfo::new("JsEnumAttribute")),
//! ];
//! let code = generate(&types, "JsEnum", "app").unwrap();
//! assert!(code.contains(r#".add("red", 0, "Red")"#));
//! ```

mod case;
mod describe;
mod emitter;
mod error;
mod generator;
mod selector;
pub mod source;
mod types;

pub use case::to_camel_case;
pub use describe::{describe, wordify};
pub use emitter::{DEFAULT_ROOT_OBJECT, EmitOptions, emit, js_string};
pub use error::{Error, Result};
pub use generator::{EnumGenerator, generate};
pub use selector::{has_marker, select};
pub use source::{DescriptorFile, RustSource, TypeSource, load_path, parse_rust_source};
pub use types::{
    AnnotationInfo, DESCRIPTION_ANNOTATION, EnumMemberDescriptor, EnumTypeDescriptor,
    RawEnumMember, TypeInfo, TypeKind, UnderlyingKind,
};

#[cfg(feature = "derive")]
pub use enum_js_derive::JsEnum;
