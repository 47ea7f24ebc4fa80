use eipo_core::config::SiteConfig;
use eipo_core::error::AppError;
use eipo_core::traits::PageFetcher;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use url::Url;

/// Blocking HTTP fetcher for the e-IPO list view.
///
/// Holds one cookie-keeping session with browser-like headers and an
/// Indonesian locale preference; the parser relies on the Indonesian labels.
/// `Accept-Encoding` is negotiated by reqwest's gzip/brotli/deflate support.
pub struct ReqwestFetcher {
    client: Client,
    list_url: String,
    home_url: String,
    timeout_secs: u64,
    warm_up_delay: std::time::Duration,
}

impl ReqwestFetcher {
    pub fn new(config: &SiteConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers(config)?)
            .cookie_store(true)
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            list_url: config.list_url(),
            home_url: config.home_url(),
            timeout_secs: config.timeout_secs,
            warm_up_delay: config.warm_up_delay(),
        })
    }

    fn get(&self, url: &str) -> Result<Response, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        check_status(response.status(), url)?;
        Ok(response)
    }
}

impl PageFetcher for ReqwestFetcher {
    fn warm_up(&self) -> Result<(), AppError> {
        self.get(&self.home_url)?;
        tracing::debug!(url = %self.home_url, "Session warmed up");
        if !self.warm_up_delay.is_zero() {
            std::thread::sleep(self.warm_up_delay);
        }
        Ok(())
    }

    fn fetch_page(&self, page: u32, per_page: u32) -> Result<String, AppError> {
        let response = self.get(page_url(&self.list_url, page, per_page)?.as_str())?;
        response
            .text()
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}

/// `list_url?page=N&per-page=M&view=list`
fn page_url(list_url: &str, page: u32, per_page: u32) -> Result<Url, AppError> {
    let mut url = Url::parse(list_url)
        .map_err(|e| AppError::ConfigError(format!("Invalid list URL '{list_url}': {e}")))?;
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("per-page", &per_page.to_string())
        .append_pair("view", "list");
    Ok(url)
}

/// Headers sent with every request besides `User-Agent`.
fn default_headers(config: &SiteConfig) -> Result<HeaderMap, AppError> {
    let value = |name: &str, raw: &str| {
        HeaderValue::from_str(raw)
            .map_err(|e| AppError::ConfigError(format!("Invalid {name} header value: {e}")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, value("Accept", &config.accept)?);
    headers.insert(
        header::ACCEPT_LANGUAGE,
        value("Accept-Language", &config.accept_language)?,
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(header::REFERER, value("Referer", &config.home_url())?);
    Ok(headers)
}

/// 403 means the anti-bot layer caught us; anything else non-2xx is generic.
fn check_status(status: StatusCode, url: &str) -> Result<(), AppError> {
    if status == StatusCode::FORBIDDEN {
        return Err(AppError::AccessDenied {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(AppError::HttpError(format!(
            "HTTP {} for {}",
            status.as_u16(),
            url
        )));
    }
    Ok(())
}
