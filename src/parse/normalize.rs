//! Turns raw extracted fields into a normalized status report.
//!
//! Pure and deterministic: no I/O, no randomness. Field-level failures
//! degrade (raw passthrough, omitted translation) instead of failing the
//! whole check.

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::{PdfParams, VisaData, VisaSearchParams, VisaStatusReport};
use crate::parse::page::{Field, StatusPage};

/// Literal substring the portal embeds in 2xx bodies when it rejects a
/// request semantically.
const ERROR_MARKER: &str = "ERROR_TYPE";

/// Korean status marking an early-stage application.
const STATUS_RECEIVED: &str = "접수";

/// Korean status marking an approved application.
const STATUS_APPROVED: &str = "허가";

/// Translate a Korean progress status into English.
///
/// Unknown statuses yield `None`; `status_en` is omitted, never defaulted.
pub fn translate_status(raw: &str) -> Option<&'static str> {
    match raw {
        "허가" => Some("Approved"),
        "상세정보접수" => Some("Application Received"),
        "불허" => Some("Rejected"),
        "심사중" => Some("Under Review"),
        "접수" => Some("Application Received"),
        _ => None,
    }
}

/// Normalize a portal date string to `YYYY-MM-DD`.
///
/// The template emits dates as compact numerics (`20240115`), dot-separated
/// (`2024.01.15.`, possibly with a trailing dot), or already dashed.
/// Unparseable input passes through trimmed rather than failing the check.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('.');
    let format = if trimmed.contains('.') {
        "%Y.%m.%d"
    } else if trimmed.contains('-') {
        "%Y-%m-%d"
    } else {
        "%Y%m%d"
    };

    match NaiveDate::parse_from_str(trimmed, format) {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Strip trailing punctuation artifacts of the source template and drop
/// values that clean to nothing.
fn tidy(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim_end_matches(['.', '(', ')']).trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build a normalized status report from a portal response body.
///
/// Fails with [`AppError::Protocol`] when the body carries the upstream
/// error marker; every field-level problem past that point degrades
/// gracefully. Deterministic: the same bytes always produce the same
/// report.
pub fn build_report(
    html: &str,
    base_url: &str,
    params: &VisaSearchParams,
) -> Result<VisaStatusReport> {
    if html.contains(ERROR_MARKER) {
        return Err(AppError::protocol("Server returned error response"));
    }

    let page = StatusPage::from_html(html);
    let (raw_status, raw_review_date) = page.status_and_review_date();

    // APPL_DTM is the primary date element; some response variants render
    // the date under RECPT_YMD instead.
    let application_date = page
        .element_text(Field::ApplicationDate)
        .or_else(|| page.element_text(Field::ReceiptDate))
        .map(|raw| normalize_date(&raw));

    let status_en = raw_status
        .as_deref()
        .and_then(translate_status)
        .map(String::from);

    // Early-stage applications get a truncated report: the shared template
    // still carries later-stage elements whose contents would be stale
    // garbage at this point.
    if raw_status.as_deref() == Some(STATUS_RECEIVED) {
        let visa_data = VisaData {
            entry_purpose: tidy(page.element_text(Field::EntryPurpose)),
            progress_status: tidy(raw_status),
            status_en,
            application_date: tidy(application_date),
            ..VisaData::default()
        };
        return Ok(VisaStatusReport::success(visa_data));
    }

    let mut visa_data = VisaData {
        application_date: tidy(application_date),
        entry_purpose: tidy(page.element_text(Field::EntryPurpose)),
        progress_status: tidy(raw_status.clone()),
        status_en,
        visa_type: tidy(page.element_text(Field::VisaType)),
        stay_qualification: tidy(page.element_text(Field::StayQualification)),
        expiry_date: tidy(page.element_text(Field::ExpiryDate).map(|d| normalize_date(&d))),
        review_date: tidy(raw_review_date.map(|d| normalize_date(&d))),
        rejection_reason: tidy(page.rejection_reason()),
        ..VisaData::default()
    };

    // Approved applications expose a hidden sequence number that unlocks
    // the electronic visa PDF download.
    if raw_status.as_deref() == Some(STATUS_APPROVED) {
        if let Some(ev_seq) = page.ev_seq() {
            visa_data.pdf_url =
                Some(format!("{base_url}/biz/ap/ev/selectElectronicVisaPrint3.do"));
            visa_data.pdf_params = Some(PdfParams {
                ev_seq,
                invitee_seq: "0".to_string(),
                appl_no: String::new(),
                eng_nm: params.english_name().to_string(),
                birth_ymd: params.birth_date_compact(),
                busi_gb: "PASS_NO".to_string(),
                busi_gbno: params.passport_number().to_string(),
                tran_type: "ComSubmit".to_string(),
                in_photo: format!("{base_url}/biz/ap/ev/selectInviteeXvarmImage.do"),
                se_flag_yn: String::new(),
                lang_type: "KO".to_string(),
            });
        }
    }

    Ok(VisaStatusReport::success(visa_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> VisaSearchParams {
        VisaSearchParams::new("M1234567", "HONG GILDONG", "1990-05-01", None).unwrap()
    }

    const BASE_URL: &str = "https://www.visa.go.kr";

    #[test]
    fn translates_known_statuses() {
        assert_eq!(translate_status("허가"), Some("Approved"));
        assert_eq!(translate_status("상세정보접수"), Some("Application Received"));
        assert_eq!(translate_status("불허"), Some("Rejected"));
        assert_eq!(translate_status("심사중"), Some("Under Review"));
        assert_eq!(translate_status("접수"), Some("Application Received"));
    }

    #[test]
    fn unknown_status_has_no_translation() {
        assert_eq!(translate_status("보류"), None);
    }

    #[test]
    fn normalizes_compact_date() {
        assert_eq!(normalize_date("20240115"), "2024-01-15");
    }

    #[test]
    fn normalizes_dotted_date_with_trailing_dot() {
        assert_eq!(normalize_date("2024.01.15."), "2024-01-15");
    }

    #[test]
    fn normalizes_dashed_date() {
        assert_eq!(normalize_date("2024-01-15"), "2024-01-15");
    }

    #[test]
    fn unparseable_date_passes_through_trimmed() {
        assert_eq!(normalize_date("pending."), "pending");
    }

    #[test]
    fn error_marker_is_a_protocol_error() {
        let html = "<html><body>ERROR_TYPE: E001</body></html>";
        let err = build_report(html, BASE_URL, &params()).unwrap_err();
        assert!(matches!(err, AppError::Protocol(_)));
    }

    #[test]
    fn received_status_truncates_report() {
        let html = r#"
            <div id="ENTRY_PURPOSE">관광</div>
            <span id="PROC_STS_CDNM_1">접수</span>
            <span id="APPL_DTM">20240115</span>
            <span id="VISA_KIND_CD">C-3</span>
            <span id="SOJ_QUAL_NM">단기방문</span>
            <span id="VISA_EXPR_YMD">20241231</span>
        "#;
        let report = build_report(html, BASE_URL, &params()).unwrap();
        let data = report.visa_data;

        assert_eq!(data.entry_purpose.as_deref(), Some("관광"));
        assert_eq!(data.progress_status.as_deref(), Some("접수"));
        assert_eq!(data.status_en.as_deref(), Some("Application Received"));
        assert_eq!(data.application_date.as_deref(), Some("2024-01-15"));
        assert_eq!(data.visa_type, None);
        assert_eq!(data.stay_qualification, None);
        assert_eq!(data.expiry_date, None);
        assert_eq!(data.rejection_reason, None);
    }

    #[test]
    fn falls_back_to_receipt_date_element() {
        let html = r#"
            <span id="PROC_STS_CDNM_1">심사중</span>
            <span id="RECPT_YMD">2024.01.15.</span>
        "#;
        let report = build_report(html, BASE_URL, &params()).unwrap();
        assert_eq!(
            report.visa_data.application_date.as_deref(),
            Some("2024-01-15")
        );
    }

    #[test]
    fn approved_status_includes_pdf_download() {
        let html = r#"
            <span id="PROC_STS_CDNM_1">허가</span>
            <span id="APPL_DTM">20240115</span>
            <input type="hidden" id="EV_SEQ" value="20240001"/>
        "#;
        let report = build_report(html, BASE_URL, &params()).unwrap();
        let data = report.visa_data;

        assert_eq!(data.status_en.as_deref(), Some("Approved"));
        assert_eq!(
            data.pdf_url.as_deref(),
            Some("https://www.visa.go.kr/biz/ap/ev/selectElectronicVisaPrint3.do")
        );
        let pdf = data.pdf_params.unwrap();
        assert_eq!(pdf.ev_seq, "20240001");
        assert_eq!(pdf.eng_nm, "HONG GILDONG");
        assert_eq!(pdf.birth_ymd, "19900501");
        assert_eq!(pdf.busi_gbno, "M1234567");
    }

    #[test]
    fn approved_without_ev_seq_has_no_pdf_fields() {
        let html = r#"<span id="PROC_STS_CDNM_1">허가</span>"#;
        let report = build_report(html, BASE_URL, &params()).unwrap();
        assert_eq!(report.visa_data.pdf_url, None);
        assert_eq!(report.visa_data.pdf_params, None);
    }

    #[test]
    fn empty_page_yields_empty_data() {
        let report = build_report("<html></html>", BASE_URL, &params()).unwrap();
        assert_eq!(report.visa_data, VisaData::default());
        assert_eq!(report.status, "success");
    }
}
