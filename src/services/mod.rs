// src/services/mod.rs

//! Services talking to the visa portal.

pub mod fingerprint;
pub mod visa;

pub use visa::KoreaVisaClient;
