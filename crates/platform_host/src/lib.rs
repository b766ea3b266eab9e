//! Typed host-service contracts and adapters for the kiosk shell.
//!
//! The runtime reads its application catalog through [`CatalogSource`] and the utility widgets
//! persist their documents through [`TextStore`]. Filesystem adapters serve native hosts and
//! tests, [`WebTextStore`] serves the browser build, and the memory adapters back tests and the
//! embedded catalog.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod storage;

pub use catalog::{
    file_url_for_path, CatalogSource, FsCatalogSource, MemoryCatalogSource, CATALOG_FILE_NAME,
};
pub use storage::local_text::{WebTextStore, LOCAL_TEXT_KEY_PREFIX};
pub use storage::text::{
    load_json_with, save_json_with, FsTextStore, MemoryTextStore, NoopTextStore, TextStore,
};
