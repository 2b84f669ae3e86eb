// HTTP client for the site's static data files.
// Resolves resource paths against the base URL and checks response status.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{Result, SiteError};

/// Client for fetching JSON from the site. Clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SiteClient {
    client: Client,
    base_url: Url,
}

impl SiteClient {
    /// Create a client rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| SiteError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(SiteError::InvalidUrl(base_url.to_string()));
        }
        // Without the trailing slash, joins would replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.site.base_url,
            config.timeout(),
            &config.http.user_agent,
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a site path (`data/cards.json`) against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Make a GET request for a site path.
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.url_for(path)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        check_response(response)
    }

    /// GET a site path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Check response status and convert errors.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    match status {
        StatusCode::NOT_FOUND => Err(SiteError::NotFound(url)),
        status => Err(SiteError::Status {
            url,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SiteClient {
        SiteClient::new(base, Duration::from_secs(5), "sitefront-test").unwrap()
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let client = client("https://example.org/site");
        assert_eq!(client.base_url().as_str(), "https://example.org/site/");
        assert_eq!(
            client.url_for("/data/articles.json").unwrap().as_str(),
            "https://example.org/site/data/articles.json"
        );
    }

    #[test]
    fn test_rejects_invalid_base() {
        let result = SiteClient::new("not a url", Duration::from_secs(5), "ua");
        assert!(matches!(result, Err(SiteError::InvalidUrl(_))));

        let result = SiteClient::new("mailto:someone@example.org", Duration::from_secs(5), "ua");
        assert!(matches!(result, Err(SiteError::InvalidUrl(_))));
    }
}
