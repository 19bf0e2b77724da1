//! Command-line front end for `enum-js-codegen`.
//!
//! Loads type metadata from a Rust source file, a directory of Rust sources
//! or a JSON descriptor file, then writes the generated JavaScript module.
//!
//! # Examples
//!
//! ```bash
//! # Export enums marked #[derive(JsEnum)] from a crate
//! enums-to-js crates/model/src ui/enums.js app JsEnum
//!
//! # Use descriptors produced by another toolchain
//! enums-to-js build/types.json ui/enums.js app JsEnum
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use enum_js_codegen::{DEFAULT_ROOT_OBJECT, EnumGenerator, load_path};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Generate JavaScript enum lookups from annotated enums.
///
/// Enums in the module are scanned and written to the output file under the
/// provided namespace.
#[derive(Parser, Debug)]
#[command(name = "enums-to-js")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Rust source file, directory of Rust sources, or JSON descriptor file
    pub module_path: PathBuf,

    /// JavaScript file to write (overwritten)
    pub output_path: PathBuf,

    /// Namespace under the root object, e.g. `app` or `app.admin`
    pub namespace: String,

    /// Annotation name prefix marking enums for export, e.g. `JsEnum`
    pub include_marker: String,

    /// Global object holding the namespace
    #[arg(long, env = "ENUMS_TO_JS_ROOT", default_value = DEFAULT_ROOT_OBJECT)]
    pub root_object: String,

    /// Custom header comment for the generated file
    #[arg(long)]
    pub header: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Load, generate and write.
///
/// Nothing is written unless loading and generation both succeed.
///
/// # Errors
///
/// Returns an error if the module cannot be loaded, the namespace is not a
/// valid JavaScript path, or the output cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let source = fs::canonicalize(&cli.module_path).unwrap_or_else(|_| cli.module_path.clone());
    info!("Source: {}", source.display());
    info!("Namespace: {}", cli.namespace);
    info!("Output: {}", cli.output_path.display());
    info!("Include attribute: {}", cli.include_marker);

    info!("Reading module...");
    let types = load_path(&cli.module_path)
        .with_context(|| format!("failed to load {}", cli.module_path.display()))?;

    let mut generator = EnumGenerator::new(&cli.namespace, &cli.include_marker);
    generator.set_root_object(&cli.root_object);
    if let Some(header) = &cli.header {
        generator.set_header(header);
    }
    generator.add_types(types);

    info!("Generating JS...");
    let code = generator.generate().context("failed to generate enums")?;

    info!("Writing...");
    if let Some(parent) = cli.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&cli.output_path, code)
        .with_context(|| format!("failed to write {}", cli.output_path.display()))?;

    info!("Done");
    Ok(())
}
