use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

const CATALOG_FILE_NAME: &str = "apps.yaml";
const FILE_URL_SCHEME: &str = "file://";

fn referenced_project_files(catalog: &str) -> Vec<String> {
    let Ok(document) = serde_yaml::from_str::<Value>(catalog) else {
        return Vec::new();
    };
    document
        .get("apps")
        .and_then(Value::as_sequence)
        .into_iter()
        .flatten()
        .filter_map(|app| app.get("url")?.as_str())
        .filter_map(|url| url.strip_prefix(FILE_URL_SCHEME))
        .map(|rest| rest.trim_start_matches('/').to_string())
        .collect()
}

fn existing_files(project_root: &Path, files: Vec<String>) -> Vec<String> {
    files
        .into_iter()
        .filter(|relative| {
            let path = project_root.join(relative);
            println!("cargo:rerun-if-changed={}", path.display());
            path.is_file()
        })
        .collect()
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let project_root = crate_root.join("..").join("..");
    let catalog_path = project_root.join(CATALOG_FILE_NAME);
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let catalog = fs::read_to_string(&catalog_path).ok();
    let files = catalog
        .as_deref()
        .map(referenced_project_files)
        .map(|files| existing_files(&project_root, files))
        .unwrap_or_default();

    let catalog_literal = match &catalog {
        Some(text) => format!("Some({text:?})"),
        None => "None".to_string(),
    };
    let generated = format!(
        "/// Catalog document embedded at build time (`None` when it was missing).\n\
pub const EMBEDDED_CATALOG: Option<&str> = {catalog_literal};\n\
/// Project files referenced by `file://` URLs that existed at build time.\n\
pub const EMBEDDED_PROJECT_FILES: &[&str] = &{files:?};\n"
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
