//! Normalized visa status report structures.

use serde::{Deserialize, Serialize};

/// Success envelope returned by a status check.
///
/// Serializes as `{ "status": "success", "visa_data": { ... } }`. Hard
/// failures never produce an envelope; they surface as
/// [`AppError`](crate::error::AppError) instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisaStatusReport {
    /// Always `"success"` for a returned report
    pub status: String,

    /// Normalized, non-empty fields extracted from the portal page
    pub visa_data: VisaData,
}

impl VisaStatusReport {
    pub fn success(visa_data: VisaData) -> Self {
        Self {
            status: "success".to_string(),
            visa_data,
        }
    }
}

/// Visa application data.
///
/// Every field is optional: absence means the portal did not provide the
/// value, not that anything failed. Empty fields are dropped from the JSON
/// output entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisaData {
    /// Application number (declared by the portal contract, rarely populated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_number: Option<String>,

    /// Application submission date, `YYYY-MM-DD` when derivable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_date: Option<String>,

    /// Purpose of entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_purpose: Option<String>,

    /// Current status in Korean, as rendered by the portal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_status: Option<String>,

    /// English translation of the status, only when the Korean text is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_en: Option<String>,

    /// Type of visa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visa_type: Option<String>,

    /// Stay qualification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stay_qualification: Option<String>,

    /// Visa expiry date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    /// Review date parsed from the status container, best-effort
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_date: Option<String>,

    /// Rejection reason, only when the portal shows the rejection row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// Electronic visa PDF endpoint, only for approved applications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,

    /// Form fields for the PDF download request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_params: Option<PdfParams>,
}

/// Form fields for downloading the electronic visa PDF.
///
/// Field names follow the portal's form contract verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub struct PdfParams {
    pub ev_seq: String,
    pub invitee_seq: String,
    pub appl_no: String,
    pub eng_nm: String,
    pub birth_ymd: String,
    #[serde(rename = "sBUSI_GB")]
    pub busi_gb: String,
    #[serde(rename = "sBUSI_GBNO")]
    pub busi_gbno: String,
    pub tran_type: String,
    pub in_photo: String,
    pub se_flag_yn: String,
    pub lang_type: String,
}
