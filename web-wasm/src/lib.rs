//! RAG Console Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod context;
mod history;
mod pages;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(app::App);
}
