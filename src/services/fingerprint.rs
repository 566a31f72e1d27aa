//! Browser fingerprint rotation.
//!
//! The portal throttles traffic that looks automated, keying on header
//! consistency across requests. Rotating a realistic User-Agent and
//! Accept-Language per logical check keeps the traffic profile diverse
//! without real browser automation.

use rand::seq::SliceRandom;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, HeaderMap, HeaderName, HeaderValue,
    ORIGIN, PRAGMA, REFERER, USER_AGENT,
};

use crate::error::{AppError, Result};
use crate::models::Config;

/// Query-selected portal page used as both bootstrap target and referer.
pub const MENU_PATH: &str = "openPage.do?MENU_ID=10301";

/// Assemble a fresh header set for one logical check.
///
/// User-Agent and Accept-Language are drawn from the configured pools; the
/// static headers match a same-origin document navigation. Single-element
/// pools make this deterministic for tests.
pub fn headers(config: &Config) -> Result<HeaderMap> {
    let mut rng = rand::thread_rng();
    let user_agent = config
        .client
        .user_agents
        .choose(&mut rng)
        .ok_or_else(|| AppError::config("client.user_agents is empty"))?;
    let accept_language = config
        .client
        .accept_languages
        .choose(&mut rng)
        .ok_or_else(|| AppError::config("client.accept_languages is empty"))?;

    let mut map = HeaderMap::new();
    map.insert(USER_AGENT, value(user_agent)?);
    map.insert(
        ACCEPT,
        value("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")?,
    );
    map.insert(ACCEPT_LANGUAGE, value(accept_language)?);
    map.insert(ORIGIN, value(&config.base_url)?);
    map.insert(REFERER, value(&format!("{}/{MENU_PATH}", config.base_url))?);
    map.insert(CONNECTION, value("keep-alive")?);
    map.insert(HeaderName::from_static("sec-fetch-dest"), value("document")?);
    map.insert(HeaderName::from_static("sec-fetch-mode"), value("navigate")?);
    map.insert(
        HeaderName::from_static("sec-fetch-site"),
        value("same-origin")?,
    );
    map.insert(PRAGMA, value("no-cache")?);
    map.insert(CACHE_CONTROL, value("no-cache")?);

    Ok(map)
}

fn value(s: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(s).map_err(|e| AppError::config(format!("invalid header value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pool_config() -> Config {
        let mut config = Config::new("https://www.visa.go.kr");
        config.client.user_agents = vec!["TestAgent/1.0".to_string()];
        config.client.accept_languages = vec!["en-US,en;q=0.9".to_string()];
        config
    }

    #[test]
    fn headers_draw_from_pools() {
        let map = headers(&single_pool_config()).unwrap();
        assert_eq!(map.get(USER_AGENT).unwrap(), "TestAgent/1.0");
        assert_eq!(map.get(ACCEPT_LANGUAGE).unwrap(), "en-US,en;q=0.9");
    }

    #[test]
    fn headers_match_same_origin_navigation() {
        let map = headers(&single_pool_config()).unwrap();
        assert_eq!(map.get(ORIGIN).unwrap(), "https://www.visa.go.kr");
        assert_eq!(
            map.get(REFERER).unwrap(),
            "https://www.visa.go.kr/openPage.do?MENU_ID=10301"
        );
        assert_eq!(map.get("sec-fetch-site").unwrap(), "same-origin");
        assert_eq!(map.get(CACHE_CONTROL).unwrap(), "no-cache");
    }

    #[test]
    fn empty_pool_is_a_config_error() {
        let mut config = single_pool_config();
        config.client.user_agents.clear();
        assert!(headers(&config).is_err());
    }
}
