//! HTTP utilities shared by the provider clients

use crate::{Result, SportIntelError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// JSON accept header plus an optional credential sent verbatim in
/// `Authorization`.
pub fn api_key_header_map(api_key: Option<&str>) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        h.insert(AUTHORIZATION, HeaderValue::from_str(key)?);
    }
    Ok(h)
}

/// Same as [`api_key_header_map`] but as a `Bearer` token.
pub fn bearer_header_map(token: Option<&str>) -> Result<HeaderMap> {
    let bearer = token
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {t}"));
    api_key_header_map(bearer.as_deref())
}

/// Headers a browser would send to the DraftKings lobby.
pub fn browser_header_map(origin: &str) -> Result<HeaderMap> {
    let mut h = api_key_header_map(None)?;
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(ORIGIN, HeaderValue::from_str(origin)?);
    h.insert(REFERER, HeaderValue::from_str(&format!("{origin}/"))?);
    Ok(h)
}

pub fn build_client(headers: HeaderMap, timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?)
}

/// GET `url` and decode the JSON body.
///
/// Transport errors, non-2xx statuses and undecodable bodies all surface as
/// [`SportIntelError::ProviderUnavailable`] tagged with `provider`.
pub async fn get_json<T, Q>(client: &Client, provider: &str, url: &str, query: &Q) -> Result<T>
where
    T: DeserializeOwned,
    Q: serde::Serialize + ?Sized,
{
    debug!(provider, url, "provider request");
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| SportIntelError::unavailable(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_error(provider, status));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SportIntelError::unavailable(provider, e))?;
    serde_json::from_slice(&body)
        .map_err(|e| SportIntelError::unavailable(provider, format!("malformed response: {e}")))
}

fn status_error(provider: &str, status: StatusCode) -> SportIntelError {
    SportIntelError::unavailable(provider, format!("HTTP {}", status.as_u16()))
}
