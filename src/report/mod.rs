//! Chart construction and dashboard output.

pub mod charts;
pub mod generator;

pub use generator::{generate_html_dashboard, generate_json_export, Dashboard};
