// src/models/mod.rs

//! Domain models for the visa status client.

mod config;
mod params;
mod report;

// Re-export all public types
pub use config::{ClientConfig, Config};
pub use params::{DEFAULT_CHANNEL, VisaSearchParams};
pub use report::{PdfParams, VisaData, VisaStatusReport};
