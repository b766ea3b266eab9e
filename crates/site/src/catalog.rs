//! Catalog embedded into the browser bundle.

use ordo_platform_host::MemoryCatalogSource;

include!(concat!(env!("OUT_DIR"), "/catalog_generated.rs"));

/// Catalog source over the embedded document. Project files are served from the site root.
pub fn embedded_catalog_source() -> MemoryCatalogSource {
    match EMBEDDED_CATALOG {
        Some(text) => MemoryCatalogSource::new(text),
        None => MemoryCatalogSource::missing(),
    }
    .with_existing_files(EMBEDDED_PROJECT_FILES.iter().copied())
    .serve_files_from("/")
}

#[cfg(test)]
mod tests {
    use ordo_platform_host::CatalogSource;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_source_serves_the_build_time_catalog() {
        let source = embedded_catalog_source();
        assert_eq!(
            source.read_catalog().expect("memory read"),
            EMBEDDED_CATALOG.map(str::to_string)
        );
        for file in EMBEDDED_PROJECT_FILES {
            assert_eq!(
                source.project_file_url(file),
                Some(format!("/{}", file.trim_start_matches('/')))
            );
        }
    }
}
