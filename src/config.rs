//! Client configuration

use std::time::Duration;

/// Default authentication endpoint
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://auth.api.rackspacecloud.com/v1.0";

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Authentication endpoint URL
    pub auth_endpoint: String,
    /// Account username
    pub username: String,
    /// Account API key
    pub api_key: String,
    /// Optional account identifier, prepended to the username as
    /// `{account}:{username}` on the auth request
    pub account: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Optional proxy URL
    pub proxy_url: Option<String>,
    /// Optional proxy basic-auth username
    pub proxy_username: Option<String>,
    /// Optional proxy basic-auth password
    pub proxy_password: Option<String>,
}

impl Config {
    /// Create a new config for the default auth endpoint
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            username: username.into(),
            api_key: api_key.into(),
            account: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("cloudfiles/{}", env!("CARGO_PKG_VERSION")),
            proxy_url: None,
            proxy_username: None,
            proxy_password: None,
        }
    }

    /// Set the authentication endpoint
    pub fn with_auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = endpoint.into();
        self
    }

    /// Set the account identifier
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Route requests through a proxy, with optional basic-auth credentials
    pub fn with_proxy(
        mut self,
        url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        self.proxy_url = Some(url.into());
        self.proxy_username = username;
        self.proxy_password = password;
        self
    }

    /// The username sent in `X-Auth-User`, qualified by the account when set
    pub fn auth_user(&self) -> String {
        match &self.account {
            Some(account) => format!("{}:{}", account, self.username),
            None => self.username.clone(),
        }
    }
}
