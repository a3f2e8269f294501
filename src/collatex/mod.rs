//! CollateX HTTP client module
//!
//! Structure:
//! - `client.rs`: `CollationClient`, one round trip per call
//! - `request.rs`: immutable request configuration
//! - `transport.rs`: `Transport` trait and the reqwest implementation
//! - `result.rs`: tagged responses and the alignment data model
//! - `witness.rs`: witness payload
//! - `error.rs`: Error types

pub mod error;
pub mod request;
pub mod result;
pub mod transport;
pub mod witness;

pub mod client;

// Re-exports for convenience
pub use client::CollationClient;
pub use error::{CollateXError, Result};
pub use request::{Algorithm, CollationRequest, TokenComparator};
pub use result::{AlignmentResult, Cell, CollationOutput, ResultFormat, Row, Token};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use witness::Witness;
