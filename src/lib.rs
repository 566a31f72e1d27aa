// src/lib.rs

//! Korean visa status client library.
//!
//! Checks the status of a visa application by emulating a browser session
//! against the government portal's HTML-only endpoint and normalizing the
//! semi-structured response into a typed report.

pub mod error;
pub mod models;
pub mod parse;
pub mod services;
