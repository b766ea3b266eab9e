mod catalog;
mod web_app;

pub use catalog::{embedded_catalog_source, EMBEDDED_CATALOG, EMBEDDED_PROJECT_FILES};
pub use web_app::{build_controller, KioskEntry, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
