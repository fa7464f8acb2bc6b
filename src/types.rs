//! Common types for the client SDK

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub(crate) const X_CONTAINER_META_PREFIX: &str = "X-Container-Meta-";
pub(crate) const X_OBJECT_META_PREFIX: &str = "X-Object-Meta-";

/// Account usage totals, from a HEAD on the storage URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInfo {
    /// Number of containers in the account
    pub container_count: u64,
    /// Total bytes stored in the account
    pub bytes_used: u64,
}

/// One entry of a JSON-format container listing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContainerSummary {
    /// Container name
    pub name: String,
    /// Number of objects in the container
    pub count: u64,
    /// Total bytes stored in the container
    pub bytes: u64,
}

/// Container details, from a HEAD on the container URL
#[derive(Clone, Debug)]
pub struct ContainerInfo {
    /// Container name
    pub name: String,
    /// Number of objects in the container
    pub object_count: u64,
    /// Total bytes stored in the container
    pub bytes_used: u64,
    /// User-defined metadata
    pub metadata: HashMap<String, String>,
}

/// One entry of a JSON-format object listing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Object name
    pub name: String,
    /// MD5 checksum of the content, hex encoded
    pub hash: String,
    /// Size in bytes
    pub bytes: u64,
    /// Content type
    pub content_type: String,
    /// Last modified time; the server reports a naive UTC timestamp
    #[serde(deserialize_with = "swift_timestamp", default)]
    pub last_modified: Option<NaiveDateTime>,
}

// The listing format carries timestamps like "2009-02-03T05:26:32.612278",
// without a timezone designator.
fn swift_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").ok()))
}

/// Object details, from response headers of a GET or HEAD
#[derive(Clone, Debug)]
pub struct ObjectInfo {
    /// Container holding the object
    pub container: String,
    /// Object name
    pub name: String,
    /// Content type
    pub content_type: Option<String>,
    /// Size in bytes
    pub content_length: u64,
    /// MD5 checksum of the content, hex encoded
    pub etag: String,
    /// Last modified time
    pub last_modified: Option<DateTime<Utc>>,
    /// User-defined metadata, keys lowercased without the header prefix
    pub metadata: HashMap<String, String>,
}

impl ObjectInfo {
    pub(crate) fn from_headers(
        container: &str,
        name: &str,
        headers: &reqwest::header::HeaderMap,
    ) -> Self {
        let text = |key: &str| {
            headers
                .get(key)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            container: container.to_string(),
            name: name.to_string(),
            content_type: text("Content-Type"),
            content_length: text("Content-Length")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            etag: text("ETag")
                .map(|v| v.trim_matches('"').to_string())
                .unwrap_or_default(),
            last_modified: text("Last-Modified")
                .and_then(|v| DateTime::parse_from_rfc2822(&v).ok())
                .map(|d| d.with_timezone(&Utc)),
            metadata: metadata_from_headers(headers, X_OBJECT_META_PREFIX),
        }
    }
}

/// Collect `{prefix}*` headers into a metadata map. Header names arrive
/// lowercased, so the prefix is matched case-insensitively.
pub(crate) fn metadata_from_headers(
    headers: &reqwest::header::HeaderMap,
    prefix: &str,
) -> HashMap<String, String> {
    let prefix = prefix.to_ascii_lowercase();
    let mut metadata = HashMap::new();
    for (name, value) in headers.iter() {
        if let Some(key) = name.as_str().strip_prefix(&prefix) {
            if let Ok(v) = value.to_str() {
                metadata.insert(key.to_string(), v.to_string());
            }
        }
    }
    metadata
}

/// Metadata attached to an object on upload
#[derive(Clone, Debug, Default)]
pub struct ObjectMetadata {
    /// Content type; guessed from the object name when unset
    pub content_type: Option<String>,
    /// User-defined metadata, sent as `X-Object-Meta-*` headers
    pub user_metadata: HashMap<String, String>,
}

impl ObjectMetadata {
    /// Create new empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set content type
    pub fn with_content_type(mut self, ct: impl Into<String>) -> Self {
        self.content_type = Some(ct.into());
        self
    }

    /// Add user metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_metadata.insert(key.into(), value.into());
        self
    }
}

/// Paging and filtering options for listings
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    /// Maximum entries to return
    pub limit: Option<u64>,
    /// Return entries sorted after this name
    pub marker: Option<String>,
    /// Only entries beginning with this prefix
    pub prefix: Option<String>,
    /// Only entries under this pseudo-directory path
    pub path: Option<String>,
}

impl ListOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return entries sorted after this name
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Only return entries beginning with this prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Only return entries under this pseudo-directory path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(marker) = &self.marker {
            pairs.push(("marker", marker.clone()));
        }
        if let Some(prefix) = &self.prefix {
            pairs.push(("prefix", prefix.clone()));
        }
        if let Some(path) = &self.path {
            pairs.push(("path", path.clone()));
        }
        pairs
    }
}

/// CDN publication state of a container
#[derive(Clone, Debug)]
pub struct CdnContainerInfo {
    /// Container name
    pub name: String,
    /// Whether the container is currently published
    pub enabled: bool,
    /// Public CDN URI, when published
    pub cdn_uri: Option<String>,
    /// Edge cache TTL in seconds
    pub ttl: Option<u64>,
    /// Whether access log retention is enabled
    pub log_retention: bool,
}
