//! Minimal blocking HTTP seam

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Result, http};

/// The two HTTP calls a deploy makes
pub trait HttpTransport {
    /// GET a text document
    fn get_text(&mut self, url: &str) -> Result<String>;

    /// POST an urlencoded form. Headers marked sensitive are never logged.
    fn post_form(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(String, String)],
    ) -> Result<()>;
}

/// `reqwest` blocking client
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("deis-deploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                http::request_failed("<client>", format!("cannot create http client: {e}"))
            })?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get_text(&mut self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| http::request_failed(url, e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(http::bad_status(url, status.as_u16()));
        }
        response
            .text()
            .map_err(|e| http::request_failed(url, e.to_string()))
    }

    fn post_form(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(String, String)],
    ) -> Result<()> {
        tracing::debug!("POST {}", url);
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| http::request_failed(url, format!("invalid header name: {e}")))?;
            let mut value = HeaderValue::from_str(value)
                .map_err(|e| http::request_failed(url, format!("invalid header value: {e}")))?;
            value.set_sensitive(true);
            header_map.insert(name, value);
        }

        let response = self
            .client
            .post(url)
            .headers(header_map)
            .form(form)
            .send()
            .map_err(|e| http::request_failed(url, e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(http::bad_status(url, status.as_u16()));
        }
        Ok(())
    }
}
