//! Alignment table presentation
//!
//! Structure:
//! - `renderer.rs`: alignment result → classified display columns
//! - `html.rs`: display columns → HTML table
//! - `delimited.rs`: display columns → CSV/TSV

pub mod delimited;
pub mod html;
pub mod renderer;

pub use delimited::{to_delimited, Delimiter};
pub use html::{escape_html, to_html};
pub use renderer::{render, DisplayCell, DisplayColumn};
