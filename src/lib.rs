//! CollateX Client Library
//!
//! Submits witnesses to a CollateX service and renders the returned
//! alignment as a table of invariant and variant readings.

pub mod collatex;
pub mod config;
pub mod pipeline;
pub mod table;
