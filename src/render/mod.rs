//! Rendering of reports and outlines to JSON.

mod json;

pub use json::{to_json, write_json, JsonFormat};
