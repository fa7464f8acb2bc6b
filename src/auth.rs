//! Credential exchange
//!
//! A GET against the auth endpoint with `X-Auth-User`/`X-Auth-Key` headers
//! yields the storage endpoint, the auth token and, when the provider
//! supports CDN publication, the CDN management endpoint.

use crate::{Config, Error, Result};
use tracing::debug;

pub(crate) const X_AUTH_USER: &str = "X-Auth-User";
pub(crate) const X_AUTH_KEY: &str = "X-Auth-Key";
pub(crate) const X_AUTH_TOKEN: &str = "X-Auth-Token";
pub(crate) const X_STORAGE_TOKEN: &str = "X-Storage-Token";
pub(crate) const X_STORAGE_URL: &str = "X-Storage-Url";
pub(crate) const X_CDN_MANAGEMENT_URL: &str = "X-CDN-Management-Url";

/// An authenticated session
#[derive(Clone, Debug)]
pub struct Session {
    /// Account storage endpoint
    pub storage_url: String,
    /// CDN management endpoint, absent on providers without CDN support
    pub cdn_management_url: Option<String>,
    /// Token sent as `X-Auth-Token` on every request
    pub auth_token: String,
    /// Legacy storage token, equal to the auth token on current providers
    pub storage_token: String,
}

/// Exchange the configured credentials for a session
pub(crate) async fn authenticate(http: &reqwest::Client, config: &Config) -> Result<Session> {
    if config.username.is_empty() {
        return Err(Error::EmptyArgument("username"));
    }
    if config.api_key.is_empty() {
        return Err(Error::EmptyArgument("api key"));
    }

    debug!(endpoint = %config.auth_endpoint, "authenticating");

    let response = http
        .get(&config.auth_endpoint)
        .header(X_AUTH_USER, config.auth_user())
        .header(X_AUTH_KEY, &config.api_key)
        .send()
        .await?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Unauthorized);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::UnexpectedStatus {
            status: status.as_u16(),
            message,
        });
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let storage_url = header(X_STORAGE_URL)
        .ok_or_else(|| Error::InvalidResponse(format!("missing {X_STORAGE_URL} header")))?;
    let auth_token = header(X_AUTH_TOKEN)
        .ok_or_else(|| Error::InvalidResponse(format!("missing {X_AUTH_TOKEN} header")))?;
    let storage_token = header(X_STORAGE_TOKEN).unwrap_or_else(|| auth_token.clone());
    let cdn_management_url = header(X_CDN_MANAGEMENT_URL);

    Ok(Session {
        storage_url,
        cdn_management_url,
        auth_token,
        storage_token,
    })
}
