// src/parse/mod.rs

//! Parsing and normalization of portal status pages.

pub mod normalize;
pub mod page;

pub use normalize::{build_report, normalize_date, translate_status};
pub use page::{Field, StatusPage};
