//! neurochat web server and UI.
//!
//! The server exposes the completion gateway at `POST /completion/{region}`
//! and renders the Leptos chat page, which fans each activity out to every
//! brain region from the browser.

#![allow(non_snake_case)]

pub mod app;
pub mod browser;
pub mod pages;
pub mod transport;
pub mod types;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod error;
#[cfg(feature = "ssr")]
pub mod routes;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
