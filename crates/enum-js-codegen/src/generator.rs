//! JavaScript enum generator.

use crate::emitter::{EmitOptions, emit};
use crate::error::{Error, Result};
use crate::selector::select;
use crate::source::{DescriptorFile, RustSource, TypeSource, parse_rust_source};
use crate::types::TypeInfo;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Generate the JavaScript module for `types` in one step.
///
/// Selects the enums marked with `marker`, resolves member descriptions and
/// emits them under `namespace` on the default root object.
pub fn generate(types: &[TypeInfo], marker: &str, namespace: &str) -> Result<String> {
    generate_with(types, marker, &EmitOptions::new(namespace))
}

fn generate_with(types: &[TypeInfo], marker: &str, options: &EmitOptions) -> Result<String> {
    let selected = select(types, marker);
    info!("Found {} enums available for export", selected.len());
    for ty in &selected {
        info!("Exporting {}...", ty.name);
    }
    emit(options, &selected)
}

/// Code generator that collects declared types and outputs JavaScript.
///
/// Types are kept in the order they were added; the output follows that
/// order.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), enum_js_codegen::Error> {
/// use enum_js_codegen::EnumGenerator;
///
/// let mut generator = EnumGenerator::new("app", "JsEnum");
/// generator.add_source_str(
///     r#"
///     #[derive(JsEnum)]
///     enum Color { Red, Green, Blue }
///     "#,
/// )?;
/// let code = generator.generate()?;
/// assert!(code.contains(r#".add("green", 1, "Green")"#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EnumGenerator {
    /// Annotation name prefix that marks a type for export.
    marker: String,

    options: EmitOptions,

    /// All declared types, in load order.
    types: Vec<TypeInfo>,
}

impl EnumGenerator {
    /// Create a generator writing under `namespace` and exporting enums
    /// annotated with a name starting with `marker`.
    pub fn new(namespace: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            options: EmitOptions::new(namespace),
            types: Vec::new(),
        }
    }

    /// Set the global object the namespace hangs off (`window` by default).
    pub fn set_root_object(&mut self, root_object: impl Into<String>) -> &mut Self {
        self.options.root_object = root_object.into();
        self
    }

    /// Set a custom header comment for the generated file.
    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.options.header = Some(header.into());
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// All collected types, marked or not.
    pub fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    /// Add already-resolved type metadata.
    pub fn add_types(&mut self, types: impl IntoIterator<Item = TypeInfo>) -> &mut Self {
        self.types.extend(types);
        self
    }

    /// Load every type from `source` and add it.
    pub fn add_source(&mut self, source: &impl TypeSource) -> Result<&mut Self> {
        let types = source.load()?;
        Ok(self.add_types(types))
    }

    /// Parse a single Rust source file.
    ///
    /// ```no_run
    /// # fn main() -> Result<(), enum_js_codegen::Error> {
    /// use enum_js_codegen::EnumGenerator;
    ///
    /// EnumGenerator::new("app", "JsEnum")
    ///     .add_source_file("src/lib.rs")?
    ///     .write_to_file("ui/enums.js")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_source_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.add_source(&RustSource::file(path.as_ref()))
    }

    /// Recursively scan a directory for `.rs` files.
    pub fn add_source_dir(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.add_source(&RustSource::dir(path.as_ref()))
    }

    /// Parse Rust source from a string.
    pub fn add_source_str(&mut self, source: &str) -> Result<&mut Self> {
        let types = parse_rust_source(source)?;
        Ok(self.add_types(types))
    }

    /// Read a JSON descriptor file.
    pub fn add_descriptor_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.add_source(&DescriptorFile::new(path.as_ref()))
    }

    /// Generate the JavaScript code as a string.
    pub fn generate(&self) -> Result<String> {
        generate_with(&self.types, &self.marker, &self.options)
    }

    /// Write the generated code to a file, replacing any previous content.
    ///
    /// Nothing is written if generation fails.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let code = self.generate()?;
        fs::write(path, code).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the generated code to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let code = self.generate()?;
        writer.write_all(code.as_bytes()).map_err(Error::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnnotationInfo, RawEnumMember, TypeKind};

    #[test]
    fn test_generate_color() {
        let types = vec![
            TypeInfo::new_enum(
                "Color",
                vec![
                    RawEnumMember::new("Red", 0),
                    RawEnumMember::new("Green", 1),
                    RawEnumMember::new("Blue", 2),
                ],
            )
            .with_annotation(AnnotationInfo::new("JsEnum")),
        ];
        let code = generate(&types, "JsEnum", "app").unwrap();
        assert!(code.contains(
            "window.app.enums.color = (new window.app.Enum())\n\
             \x20 .add(\"red\", 0, \"Red\")\n\
             \x20 .add(\"green\", 1, \"Green\")\n\
             \x20 .add(\"blue\", 2, \"Blue\")\n\
             \x20 ;\n"
        ));
    }

    #[test]
    fn test_generate_from_source() {
        let mut generator = EnumGenerator::new("app", "JsEnum");
        generator
            .add_source_str(
                r#"
                use enum_js::JsEnum;

                #[derive(Debug, Clone, Copy, JsEnum)]
                #[repr(u8)]
                pub enum DisplayMode {
                    ShowAll = 1,
                    #[description = "Show \"...\" after the limit"]
                    ShowWithEllipses,
                    HideAll = 10,
                }

                #[derive(Debug)]
                pub enum Internal { A, B }

                #[derive(JsEnum)]
                pub struct NotAnEnum { x: i32 }
            "#,
            )
            .unwrap();
        let code = generator.generate().unwrap();
        assert!(code.contains("window.app.enums.displayMode = (new window.app.Enum())"));
        assert!(code.contains(r#".add("showAll", 1, "Show All")"#));
        assert!(code.contains(r#".add("showWithEllipses", 2, "Show \"...\" after the limit")"#));
        assert!(code.contains(r#".add("hideAll", 10, "Hide All")"#));
        assert!(!code.contains("internal"));
        assert!(!code.contains("notAnEnum"));
    }

    #[test]
    fn test_generate_with_no_matches() {
        let mut generator = EnumGenerator::new("app", "JsEnum");
        generator.add_source_str("enum Color { Red }").unwrap();
        let code = generator.generate().unwrap();
        assert!(code.contains("window.app.Enum.prototype.add"));
        assert!(!code.contains(".enums.color"));
    }

    #[test]
    fn test_types_keep_insertion_order() {
        let mut generator = EnumGenerator::new("app", "Export");
        generator.add_types([
            TypeInfo::new_enum("Second", vec![RawEnumMember::new("A", 0)])
                .with_annotation(AnnotationInfo::new("ExportAttribute")),
            TypeInfo::new_other("Skipped", TypeKind::Struct),
        ]);
        generator
            .add_source_str("#[derive(Export)] enum First { A }")
            .unwrap();
        let code = generator.generate().unwrap();
        let second = code.find("enums.second").unwrap();
        let first = code.find("enums.first").unwrap();
        assert!(second < first);
        assert_eq!(generator.types().len(), 3);
    }

    #[test]
    fn test_root_object_and_header() {
        let mut generator = EnumGenerator::new("app", "JsEnum");
        generator
            .set_root_object("globalThis")
            .set_header("Generated from the admin crate");
        let code = generator.generate().unwrap();
        assert!(code.starts_with("/**\n * Generated from the admin crate\n */\n"));
        assert!(code.contains("globalThis.app = globalThis.app || {};"));
    }

    #[test]
    fn test_write_to_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("enums.js");
        fs::write(&out, "stale content").unwrap();

        let mut generator = EnumGenerator::new("app", "JsEnum");
        generator
            .add_source_str("#[derive(JsEnum)] enum Color { Red }")
            .unwrap();
        generator.write_to_file(&out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(!written.contains("stale content"));
        assert_eq!(written, generator.generate().unwrap());
    }

    #[test]
    fn test_write_to_file_skipped_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("enums.js");

        let generator = EnumGenerator::new("not a namespace", "JsEnum");
        assert!(matches!(
            generator.write_to_file(&out),
            Err(Error::InvalidNamespace(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_descriptor_type_name_must_be_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("types.json");
        let out = dir.path().join("enums.js");
        fs::write(
            &json,
            r#"[{ "name": "Dark Mode", "annotations": [{ "name": "JsEnum" }],
                  "members": [{ "name": "On", "value": 1 }] }]"#,
        )
        .unwrap();

        let mut generator = EnumGenerator::new("app", "JsEnum");
        generator.add_descriptor_file(&json).unwrap();
        let err = generator.write_to_file(&out).unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier(ref name) if name == "Dark Mode"));
        assert!(!out.exists());
    }

    #[test]
    fn test_write_to_writer() {
        let mut generator = EnumGenerator::new("app", "JsEnum");
        generator
            .add_source_str("#[derive(JsEnum)] enum Color { Red }")
            .unwrap();
        let mut buffer = Vec::new();
        generator.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), generator.generate().unwrap());
    }

    #[test]
    fn test_add_source_error_keeps_previous_types() {
        let mut generator = EnumGenerator::new("app", "JsEnum");
        generator.add_source_str("enum Ok { A }").unwrap();
        assert!(generator.add_source_str("enum Broken {").is_err());
        assert_eq!(generator.types().len(), 1);
    }
}
