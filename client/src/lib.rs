//! Browser console for `OpenLab` management.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built to WebAssembly with the `csr` feature and mounted on `<body>`. The
//! mock API serves the compiled bundle, so all requests are same-origin.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
