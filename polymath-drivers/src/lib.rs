//! Driver layer for browser automation.
//!
//! This crate wraps a WebDriver session so the lookup code only deals with
//! pages and elements addressed by id or CSS selector.
//!
//! - [`polymath_browser::driver::PolymathDriver`]: WebDriver client wrapper
//! - [`polymath_browser::page::PolymathPage`]: navigation, form and DOM helpers
//! - [`polymath_browser::chrome`]: Chrome command‑line arguments
pub mod polymath_browser;
