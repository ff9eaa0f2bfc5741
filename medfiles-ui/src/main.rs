//! MedFiles Web
//!
//! Prescription and medication-history viewer built with Leptos (WASM).
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application. All records are the
//! built-in mock dataset; the session lives in `localStorage` and pages are
//! addressed by `?page=...&id=...` with browser history support.

use leptos::*;

mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
