//! HTML field extraction for the portal's status page.
//!
//! The portal renders one static template regardless of actual status and
//! blanks or hides the sections that do not apply. Extraction is therefore
//! total: a missing element is an expected outcome, never an error.

use scraper::{ElementRef, Html, Selector};

/// Logical fields of the status page, each tied to the HTML element id
/// that currently encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Primary application date element
    ApplicationDate,
    /// Alternate date element used by some response variants
    ReceiptDate,
    EntryPurpose,
    ProgressStatus,
    VisaType,
    StayQualification,
    ExpiryDate,
}

impl Field {
    /// HTML element id carrying this field.
    pub fn element_id(self) -> &'static str {
        match self {
            Field::ApplicationDate => "APPL_DTM",
            Field::ReceiptDate => "RECPT_YMD",
            Field::EntryPurpose => "ENTRY_PURPOSE",
            Field::ProgressStatus => "PROC_STS_CDNM_1",
            Field::VisaType => "VISA_KIND_CD",
            Field::StayQualification => "SOJ_QUAL_NM",
            Field::ExpiryDate => "VISA_EXPR_YMD",
        }
    }
}

/// Parsed portal status page.
pub struct StatusPage {
    document: Html,
}

impl StatusPage {
    /// Parse an HTML document. Lenient: scraper recovers from malformed
    /// markup the same way a browser does.
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Trimmed text content of the element carrying `field`, or `None`
    /// when the element is absent or holds only whitespace.
    pub fn element_text(&self, field: Field) -> Option<String> {
        self.text_by_id(field.element_id())
    }

    /// Progress status and optional review date.
    ///
    /// The status container holds the status label, optionally followed by
    /// a parenthesized review date: `심사중(2024.02.01)`. Splits on the
    /// first `(`; a bare label yields no date.
    pub fn status_and_review_date(&self) -> (Option<String>, Option<String>) {
        let Some(raw) = self.element_text(Field::ProgressStatus) else {
            return (None, None);
        };

        match raw.split_once('(') {
            Some((status, rest)) => {
                let date = rest.trim_end_matches(')').trim();
                (
                    non_empty(status.trim()),
                    non_empty(date),
                )
            }
            None => (non_empty(&raw), None),
        }
    }

    /// Rejection reason, if the portal actually shows it.
    ///
    /// The template always renders the rejection row and hides it with an
    /// inline style when not applicable, so visibility must be inferred
    /// from the style attribute rather than row presence.
    pub fn rejection_reason(&self) -> Option<String> {
        let row_sel = Self::selector("tr#INTNET_OPEN_REJ_RSN_CD")?;
        let row = self.document.select(&row_sel).next()?;

        if let Some(style) = row.value().attr("style") {
            if style.replace(' ', "").contains("display:none") {
                return None;
            }
        }

        let cell_sel = Self::selector("td")?;
        let cell = row.select(&cell_sel).next()?;
        non_empty(collect_text(&cell).trim())
    }

    /// Value of the hidden `EV_SEQ` input, present on approved applications.
    pub fn ev_seq(&self) -> Option<String> {
        let sel = Self::selector("input#EV_SEQ")?;
        let input = self.document.select(&sel).next()?;
        non_empty(input.value().attr("value")?.trim())
    }

    fn text_by_id(&self, id: &str) -> Option<String> {
        let sel = Self::selector(&format!("#{id}"))?;
        let element = self.document.select(&sel).next()?;
        non_empty(collect_text(&element).trim())
    }

    // Ids come from a fixed table, so parse failures cannot happen in
    // practice; extraction still degrades to None instead of panicking.
    fn selector(s: &str) -> Option<Selector> {
        Selector::parse(s).ok()
    }
}

/// Concatenate the text nodes of an element. Comment nodes never appear in
/// the text iterator, so only real text contributes.
fn collect_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_text_extracts_and_trims() {
        let page = StatusPage::from_html(r#"<div id="ENTRY_PURPOSE">  관광  </div>"#);
        assert_eq!(
            page.element_text(Field::EntryPurpose),
            Some("관광".to_string())
        );
    }

    #[test]
    fn element_text_missing_is_none() {
        let page = StatusPage::from_html("<div>no ids here</div>");
        assert_eq!(page.element_text(Field::VisaType), None);
    }

    #[test]
    fn element_text_whitespace_only_is_none() {
        let page = StatusPage::from_html(r#"<span id="VISA_KIND_CD">   </span>"#);
        assert_eq!(page.element_text(Field::VisaType), None);
    }

    #[test]
    fn status_with_review_date() {
        let page =
            StatusPage::from_html(r#"<span id="PROC_STS_CDNM_1">심사중(2024.02.01)</span>"#);
        let (status, date) = page.status_and_review_date();
        assert_eq!(status.as_deref(), Some("심사중"));
        assert_eq!(date.as_deref(), Some("2024.02.01"));
    }

    #[test]
    fn status_without_review_date() {
        let page = StatusPage::from_html(r#"<span id="PROC_STS_CDNM_1">허가</span>"#);
        let (status, date) = page.status_and_review_date();
        assert_eq!(status.as_deref(), Some("허가"));
        assert_eq!(date, None);
    }

    #[test]
    fn status_skips_html_comments() {
        let page = StatusPage::from_html(
            r#"<span id="PROC_STS_CDNM_1"><!-- template -->접수<!-- end --></span>"#,
        );
        let (status, date) = page.status_and_review_date();
        assert_eq!(status.as_deref(), Some("접수"));
        assert_eq!(date, None);
    }

    #[test]
    fn status_container_missing() {
        let page = StatusPage::from_html("<div></div>");
        assert_eq!(page.status_and_review_date(), (None, None));
    }

    #[test]
    fn rejection_row_visible() {
        let page = StatusPage::from_html(
            r#"<table><tr id="INTNET_OPEN_REJ_RSN_CD"><td> 서류 미비 </td></tr></table>"#,
        );
        assert_eq!(page.rejection_reason().as_deref(), Some("서류 미비"));
    }

    #[test]
    fn rejection_row_hidden_by_style() {
        let page = StatusPage::from_html(
            r#"<table><tr id="INTNET_OPEN_REJ_RSN_CD" style="display:none;"><td>서류 미비</td></tr></table>"#,
        );
        assert_eq!(page.rejection_reason(), None);
    }

    #[test]
    fn rejection_row_hidden_with_spacing() {
        let page = StatusPage::from_html(
            r#"<table><tr id="INTNET_OPEN_REJ_RSN_CD" style="display: none;"><td>서류 미비</td></tr></table>"#,
        );
        assert_eq!(page.rejection_reason(), None);
    }

    #[test]
    fn ev_seq_from_hidden_input() {
        let page =
            StatusPage::from_html(r#"<input type="hidden" id="EV_SEQ" value="20240001"/>"#);
        assert_eq!(page.ev_seq().as_deref(), Some("20240001"));
    }
}
