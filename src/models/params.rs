//! Validated visa search parameters.

use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::error::{AppError, Result};

/// Default search channel: lookup through embassy records.
pub const DEFAULT_CHANNEL: &str = "gb03";

/// Search parameters for a visa status check.
///
/// Constructed once per check via [`VisaSearchParams::new`], which performs
/// all input validation before any network call can happen. Passport number
/// and name are normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisaSearchParams {
    passport_number: String,
    english_name: String,
    birth_date: NaiveDate,
    search_channel: String,
}

fn passport_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"))
}

impl VisaSearchParams {
    /// Validate and build search parameters.
    ///
    /// Rejects non-alphanumeric passport numbers, empty names, malformed
    /// or future birth dates. `channel` falls back to [`DEFAULT_CHANNEL`].
    pub fn new(
        passport_number: &str,
        english_name: &str,
        birth_date: &str,
        channel: Option<&str>,
    ) -> Result<Self> {
        let passport_number = passport_number.trim();
        if passport_number.is_empty() || passport_number.len() > 20 {
            return Err(AppError::validation(
                "Passport number must be 1-20 characters",
            ));
        }
        if !passport_pattern().is_match(passport_number) {
            return Err(AppError::validation(
                "Passport number must contain only letters and numbers",
            ));
        }

        let english_name = english_name.trim();
        if english_name.is_empty() || english_name.len() > 255 {
            return Err(AppError::validation("Name must be 1-255 characters"));
        }

        let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
            .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD"))?;
        if birth_date > Utc::now().date_naive() {
            return Err(AppError::validation("Birth date cannot be in the future"));
        }

        Ok(Self {
            passport_number: passport_number.to_uppercase(),
            english_name: english_name.to_uppercase(),
            birth_date,
            search_channel: channel.unwrap_or(DEFAULT_CHANNEL).to_string(),
        })
    }

    /// Passport number, uppercased.
    pub fn passport_number(&self) -> &str {
        &self.passport_number
    }

    /// Full English name, uppercased.
    pub fn english_name(&self) -> &str {
        &self.english_name
    }

    /// Birth date formatted as `YYYY-MM-DD`.
    pub fn birth_date(&self) -> String {
        self.birth_date.format("%Y-%m-%d").to_string()
    }

    /// Birth date formatted as `YYYYMMDD` (PDF download form variant).
    pub fn birth_date_compact(&self) -> String {
        self.birth_date.format("%Y%m%d").to_string()
    }

    /// Portal channel code selecting the search method.
    pub fn search_channel(&self) -> &str {
        &self.search_channel
    }
}
