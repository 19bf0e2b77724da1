use enum_js_codegen::EnumGenerator;
use std::env;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let mut generator = EnumGenerator::new("example", "JsEnum");
    generator.set_header(
        "Generated enum lookups for enum-js-example\n\
         These objects match the Rust enums in src/lib.rs",
    );

    // Picks up every enum annotated with #[derive(JsEnum)]
    generator
        .add_source_file(manifest_dir.join("src/lib.rs"))
        .expect("Failed to parse source file");

    generator
        .write_to_file(out_dir.join("enums.js"))
        .expect("Failed to write enums.js");

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
