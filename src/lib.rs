#[macro_use]
extern crate rust_i18n;

pub mod config;
pub mod date;
pub mod error;
pub mod navigation;
pub mod startup;

// Initialize i18n
i18n!("locales", fallback = "en");
