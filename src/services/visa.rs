//! Visa status client service.
//!
//! Emulates a browser session against the portal: cookie-bearing session
//! bootstrap, fingerprint rotation, a human-like delay, then the search
//! form submission. Each check is a single attempt; retry policy belongs
//! to the caller.

use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use reqwest::header::HeaderMap;

use crate::error::Result;
use crate::models::{Config, VisaSearchParams, VisaStatusReport};
use crate::parse;
use crate::services::fingerprint;

/// Client for the Korean visa status portal.
///
/// Instances are independent; use one per logical caller. A single
/// instance performs one GET and one POST per check, sequentially.
pub struct KoreaVisaClient {
    config: Config,
    client: Client,
}

impl KoreaVisaClient {
    /// Create a client for the configured portal.
    ///
    /// The cookie store is required: the portal ties search submissions to
    /// session state established by the bootstrap GET.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.client.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Run one full status check for the given search parameters.
    pub async fn check_status(&self, params: &VisaSearchParams) -> Result<VisaStatusReport> {
        let headers = fingerprint::headers(&self.config)?;

        log::info!("Starting visa status check");
        self.initialize_session(&headers).await?;

        self.human_delay().await;

        let html = self.submit_search(&headers, params).await?;
        let report = parse::build_report(&html, &self.config.base_url, params)?;

        log::info!(
            "Status check complete: {}",
            report
                .visa_data
                .progress_status
                .as_deref()
                .unwrap_or("(no status)")
        );
        Ok(report)
    }

    /// Bootstrap the portal session with a plain page load.
    async fn initialize_session(&self, headers: &HeaderMap) -> Result<()> {
        log::debug!("Initializing portal session");
        self.client
            .get(self.menu_url())
            .headers(headers.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Submit the search form and return the response body.
    async fn submit_search(
        &self,
        headers: &HeaderMap,
        params: &VisaSearchParams,
    ) -> Result<String> {
        log::debug!("Submitting search form");
        let response = self
            .client
            .post(self.menu_url())
            .headers(headers.clone())
            .form(&Self::search_form(params))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Form-encoded payload the portal's search form expects.
    ///
    /// The passport number is submitted twice (`sBUSI_GBNO` and
    /// `ssBUSI_GBNO`); the constant fields are part of the portal's form
    /// contract and must be present verbatim.
    pub fn search_form(params: &VisaSearchParams) -> Vec<(&'static str, String)> {
        vec![
            ("CMM_TEST_VAL", "test".to_string()),
            ("sBUSI_GB", "PASS_NO".to_string()),
            ("sBUSI_GBNO", params.passport_number().to_string()),
            ("ssBUSI_GBNO", params.passport_number().to_string()),
            ("pRADIOSEARCH", params.search_channel().to_string()),
            ("sEK_NM", params.english_name().to_string()),
            ("sFROMDATE", params.birth_date()),
            ("sMainPopUpGB", "main".to_string()),
            ("TRAN_TYPE", "ComSubmit".to_string()),
            ("SE_FLAG_YN", String::new()),
            ("LANG_TYPE", "KO".to_string()),
        ]
    }

    /// Sleep a randomized interval before submission to mimic human timing.
    async fn human_delay(&self) {
        let (min, max) = (
            self.config.client.delay_min_ms,
            self.config.client.delay_max_ms,
        );
        let wait_ms = if min == max {
            min
        } else {
            rand::thread_rng().gen_range(min..=max)
        };
        if wait_ms > 0 {
            log::debug!("Waiting {wait_ms}ms before submission");
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        }
    }

    fn menu_url(&self) -> String {
        format!("{}/{}", self.config.base_url, fingerprint::MENU_PATH)
    }
}
