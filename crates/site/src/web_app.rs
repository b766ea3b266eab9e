use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use ordo_app_contract::AppServices;
use ordo_platform_host::WebTextStore;
use ordo_runtime::{builtin_resolver, CatalogLoader, KioskShell, ShellController, ShellProvider};

use crate::catalog::embedded_catalog_source;

const KIOSK_STYLES: &str = include_str!("kiosk.css");

/// Shell controller over the embedded catalog, the built-in widgets, and browser storage.
pub fn build_controller() -> ShellController {
    ShellController::new(
        CatalogLoader::new(Rc::new(embedded_catalog_source())),
        builtin_resolver(),
        AppServices::new(Rc::new(WebTextStore)),
    )
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Ordo" />
        <Meta name="description" content="Kiosk desktop shell." />
        <Style id="ordo-kiosk">{KIOSK_STYLES}</Style>
        <KioskEntry />
    }
}

#[component]
pub fn KioskEntry() -> impl IntoView {
    view! {
        <ShellProvider controller=build_controller()>
            <KioskShell />
        </ShellProvider>
    }
}
