//! JavaScript output for selected enums.
//!
//! The output is built from independent fragments (header, namespace
//! prologue, runtime support, one block per enum) that are concatenated in a
//! fixed order. Nothing here touches the filesystem.

use crate::case::to_camel_case;
use crate::error::{Error, Result};
use crate::types::EnumTypeDescriptor;
use tracing::warn;

/// Root object the namespace hangs off when none is configured.
pub const DEFAULT_ROOT_OBJECT: &str = "window";

const DEFAULT_HEADER: &str = "/* Auto-generated. Do not edit this file. */\n";

// Number.MAX_SAFE_INTEGER
const MAX_SAFE_INTEGER: u128 = (1 << 53) - 1;

/// Where and how the generated module is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Dotted namespace under the root object, e.g. `"app"` or `"app.admin"`.
    pub namespace: String,
    /// Global object holding the namespace.
    pub root_object: String,
    /// Custom header comment. When `None` the default banner is used.
    pub header: Option<String>,
}

impl EmitOptions {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            root_object: DEFAULT_ROOT_OBJECT.to_string(),
            header: None,
        }
    }

    pub fn with_root_object(mut self, root_object: impl Into<String>) -> Self {
        self.root_object = root_object.into();
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Validate and split the root object and namespace into path segments.
    fn segments(&self) -> Result<Vec<&str>> {
        let mut segments = Vec::new();
        for path in [self.root_object.as_str(), self.namespace.as_str()] {
            for segment in path.split('.') {
                if !is_js_identifier(segment) {
                    return Err(Error::InvalidNamespace(format!(
                        "{}.{}",
                        self.root_object, self.namespace
                    )));
                }
                segments.push(segment);
            }
        }
        Ok(segments)
    }
}

/// Generate the complete JavaScript module for `types`.
///
/// Types are emitted in the given order and members in declaration order.
/// The result is deterministic: identical input gives identical output.
///
/// Type names must camelCase to a JavaScript identifier; anything else is
/// [`Error::MalformedIdentifier`]. Member names are always quoted.
pub fn emit(options: &EmitOptions, types: &[EnumTypeDescriptor]) -> Result<String> {
    let segments = options.segments()?;
    let target = segments.join(".");

    let mut output = String::new();
    output.push_str(&header(options.header.as_deref()));
    output.push_str(&namespace_prologue(&segments));
    output.push_str(&runtime_support(&target));
    for ty in types {
        output.push('\n');
        output.push_str(&enum_block(&target, ty)?);
    }
    Ok(output)
}

fn header(custom: Option<&str>) -> String {
    let Some(custom) = custom else {
        return DEFAULT_HEADER.to_string();
    };
    let mut output = String::from("/**\n");
    for line in custom.lines() {
        output.push_str(" * ");
        output.push_str(&line.replace("*/", "* /"));
        output.push('\n');
    }
    output.push_str(" */\n");
    output
}

/// `root.a = root.a || {};` for every namespace level, then the `enums` container.
///
/// The root object itself is assumed to exist.
fn namespace_prologue(segments: &[&str]) -> String {
    let mut output = String::new();
    let mut path = segments[0].to_string();
    for segment in &segments[1..] {
        path = format!("{path}.{segment}");
        output.push_str(&format!("{path} = {path} || {{}};\n"));
    }
    output.push_str(&format!("{path}.enums = {path}.enums || {{}};\n"));
    output
}

fn runtime_support(target: &str) -> String {
    format!(
        "{target}.Enum = function() {{\n\
         \x20 var self = this;\n\
         \x20 self.__descriptions = {{}};\n\
         \x20 self.__ids = {{}};\n\
         \x20 self.__map = [];\n\
         \x20 self.getDescription = function(val) {{ return self.__descriptions[val]; }};\n\
         \x20 self.getAll = function() {{ return self.__map; }};\n\
         }};\n\
         {target}.Enum.prototype.add = function(name, val, description) {{\n\
         \x20 var self = this;\n\
         \x20 self[name] = val;\n\
         \x20 self[val] = name;\n\
         \x20 self.__ids[val] = name;\n\
         \x20 self.__descriptions[val] = description;\n\
         \x20 self.__map.push({{ id: val, name: name, description: description }});\n\
         \x20 return self;\n\
         }};\n"
    )
}

fn enum_block(target: &str, ty: &EnumTypeDescriptor) -> Result<String> {
    let name = to_camel_case(&ty.name)?;
    if !is_js_identifier(&name) {
        return Err(Error::MalformedIdentifier(ty.name.clone()));
    }
    let mut output = format!("{target}.enums.{name} = (new {target}.Enum())\n");
    for member in &ty.members {
        if member.value.unsigned_abs() > MAX_SAFE_INTEGER {
            warn!(
                "`{}::{}` = {} exceeds the JavaScript safe integer range",
                ty.name, member.name, member.value
            );
        }
        output.push_str(&format!(
            "  .add({}, {}, {})\n",
            js_string(&to_camel_case(&member.name)?),
            member.value,
            js_string(&member.description)
        ));
    }
    output.push_str("  ;\n");
    Ok(output)
}

/// Quote `value` as a double-quoted JavaScript string literal.
pub fn js_string(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    output.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{2028}' => output.push_str("\\u2028"),
            '\u{2029}' => output.push_str("\\u2029"),
            c if c.is_control() => output.push_str(&format!("\\u{:04x}", c as u32)),
            c => output.push(c),
        }
    }
    output.push('"');
    output
}

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
