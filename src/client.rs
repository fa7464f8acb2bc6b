//! Main client implementation

use crate::auth::{self, Session, X_AUTH_TOKEN, X_STORAGE_TOKEN};
use crate::transfer::{progress_body, ProgressCallback, TransferProgress};
use crate::types::*;
use crate::validation::{
    clean_object_name, container_url, object_url, validate_container_name, validate_object_name,
};
use crate::{Config, Error, ObjectMetadata, Result};
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use md5::{Digest, Md5};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG, RANGE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::collections::HashMap;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

const X_ACCOUNT_CONTAINER_COUNT: &str = "X-Account-Container-Count";
const X_ACCOUNT_BYTES_USED: &str = "X-Account-Bytes-Used";
const X_CONTAINER_OBJECT_COUNT: &str = "X-Container-Object-Count";
const X_CONTAINER_BYTES_USED: &str = "X-Container-Bytes-Used";
const X_CDN_ENABLED: &str = "X-CDN-Enabled";
const X_CDN_URI: &str = "X-CDN-URI";
const X_TTL: &str = "X-TTL";
const X_LOG_RETENTION: &str = "X-Log-Retention";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
/// Content type of pseudo-directory marker objects
pub const DIRECTORY_CONTENT_TYPE: &str = "application/directory";

/// Cloud Files storage client
pub struct CloudFilesClient {
    config: Config,
    http: Client,
    session: RwLock<Option<Session>>,
}

impl CloudFilesClient {
    /// Create a new client with the given configuration. No network call is
    /// made until the first operation (or an explicit [`authenticate`](Self::authenticate)).
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout);

        if let Some(proxy_url) = &config.proxy_url {
            let mut proxy = reqwest::Proxy::all(proxy_url)?;
            if let (Some(user), Some(pass)) = (&config.proxy_username, &config.proxy_password) {
                proxy = proxy.basic_auth(user, pass);
            }
            builder = builder.proxy(proxy);
        }

        let http = builder.build()?;

        Ok(Self {
            config,
            http,
            session: RwLock::new(None),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Eagerly exchange credentials for a session
    pub async fn authenticate(&self) -> Result<()> {
        self.refresh_session().await.map(|_| ())
    }

    /// Whether the provider exposes CDN management for this account
    pub async fn has_cdn(&self) -> Result<bool> {
        Ok(self.session().await?.cdn_management_url.is_some())
    }

    async fn session(&self) -> Result<Session> {
        if let Some(session) = self.session.read().await.clone() {
            return Ok(session);
        }
        self.refresh_session().await
    }

    async fn refresh_session(&self) -> Result<Session> {
        let session = auth::authenticate(&self.http, &self.config).await?;
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    async fn invalidate_session(&self) {
        *self.session.write().await = None;
    }

    fn authed(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder
            .header(X_AUTH_TOKEN, &session.auth_token)
            .header(X_STORAGE_TOKEN, &session.storage_token)
    }

    /// Dispatch a request, re-authenticating once on a 401. The builder
    /// closure runs against the current session so token and endpoint
    /// headers are always fresh.
    async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Session) -> Result<RequestBuilder>,
    {
        let session = self.session().await?;
        let request = self.authed(build(&session)?, &session);
        let response = request.send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("token rejected, re-authenticating");
        let session = self.refresh_session().await?;
        let request = self.authed(build(&session)?, &session);
        let response = request.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        Ok(response)
    }

    // ==================== Account Operations ====================

    /// Account usage totals
    #[instrument(skip(self))]
    pub async fn account_info(&self) -> Result<AccountInfo> {
        let response = self
            .send(|s| Ok(self.http.head(s.storage_url.clone())))
            .await?;
        if !response.status().is_success() {
            return Err(unexpected(response).await);
        }
        Ok(AccountInfo {
            container_count: header_u64(&response, X_ACCOUNT_CONTAINER_COUNT),
            bytes_used: header_u64(&response, X_ACCOUNT_BYTES_USED),
        })
    }

    /// List container names, alphabetically ordered by the server
    #[instrument(skip(self))]
    pub async fn list_containers(&self, options: &ListOptions) -> Result<Vec<String>> {
        let response = self
            .send(|s| {
                Ok(self
                    .http
                    .get(s.storage_url.clone())
                    .query(&options.query_pairs()))
            })
            .await?;
        if !response.status().is_success() {
            return Err(unexpected(response).await);
        }
        parse_lines(response).await
    }

    /// List containers with their object counts and sizes
    #[instrument(skip(self))]
    pub async fn list_containers_info(&self, options: &ListOptions) -> Result<Vec<ContainerSummary>> {
        let response = self
            .send(|s| {
                Ok(self
                    .http
                    .get(s.storage_url.clone())
                    .query(&[("format", "json")])
                    .query(&options.query_pairs()))
            })
            .await?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(Vec::new()),
            s if s.is_success() => Ok(response.json().await?),
            _ => Err(unexpected(response).await),
        }
    }

    // ==================== Container Operations ====================

    /// Create a container
    #[instrument(skip(self))]
    pub async fn create_container(&self, container: &str) -> Result<()> {
        validate_container_name(container)?;
        let response = self
            .send(|s| Ok(self.http.put(container_url(&s.storage_url, container)?)))
            .await?;
        match response.status() {
            StatusCode::ACCEPTED => Err(Error::ContainerAlreadyExists(container.to_string())),
            s if s.is_success() => Ok(()),
            _ => Err(unexpected(response).await),
        }
    }

    /// Delete an empty container
    #[instrument(skip(self))]
    pub async fn delete_container(&self, container: &str) -> Result<()> {
        validate_container_name(container)?;
        let response = self
            .send(|s| Ok(self.http.delete(container_url(&s.storage_url, container)?)))
            .await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            StatusCode::CONFLICT => Err(Error::ContainerNotEmpty(container.to_string())),
            _ => Err(unexpected(response).await),
        }
    }

    /// Container object count, size and metadata
    #[instrument(skip(self))]
    pub async fn container_info(&self, container: &str) -> Result<ContainerInfo> {
        validate_container_name(container)?;
        let response = self
            .send(|s| Ok(self.http.head(container_url(&s.storage_url, container)?)))
            .await?;
        match response.status() {
            s if s.is_success() => Ok(ContainerInfo {
                name: container.to_string(),
                object_count: header_u64(&response, X_CONTAINER_OBJECT_COUNT),
                bytes_used: header_u64(&response, X_CONTAINER_BYTES_USED),
                metadata: metadata_from_headers(response.headers(), X_CONTAINER_META_PREFIX),
            }),
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            _ => Err(unexpected(response).await),
        }
    }

    /// Check if a container exists
    #[instrument(skip(self))]
    pub async fn container_exists(&self, container: &str) -> Result<bool> {
        match self.container_info(container).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Replace the container's user metadata
    #[instrument(skip(self, metadata))]
    pub async fn set_container_metadata(
        &self,
        container: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<()> {
        validate_container_name(container)?;
        let response = self
            .send(|s| {
                let mut request = self.http.post(container_url(&s.storage_url, container)?);
                for (key, value) in metadata {
                    request = request.header(format!("{X_CONTAINER_META_PREFIX}{key}"), value);
                }
                Ok(request)
            })
            .await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            _ => Err(unexpected(response).await),
        }
    }

    // ==================== Object Operations ====================

    /// List object names in a container, alphabetically ordered by the
    /// server; honors `limit`, `marker`, `prefix` and `path`.
    #[instrument(skip(self))]
    pub async fn list_objects(&self, container: &str, options: &ListOptions) -> Result<Vec<String>> {
        validate_container_name(container)?;
        let response = self
            .send(|s| {
                Ok(self
                    .http
                    .get(container_url(&s.storage_url, container)?)
                    .query(&options.query_pairs()))
            })
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            s if s.is_success() => parse_lines(response).await,
            _ => Err(unexpected(response).await),
        }
    }

    /// List objects with size, checksum, content type and mtime
    #[instrument(skip(self))]
    pub async fn list_objects_info(
        &self,
        container: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectSummary>> {
        validate_container_name(container)?;
        let response = self
            .send(|s| {
                Ok(self
                    .http
                    .get(container_url(&s.storage_url, container)?)
                    .query(&[("format", "json")])
                    .query(&options.query_pairs()))
            })
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            StatusCode::NO_CONTENT => Ok(Vec::new()),
            s if s.is_success() => Ok(response.json().await?),
            _ => Err(unexpected(response).await),
        }
    }

    /// Upload an object. Returns the MD5 ETag of the content.
    #[instrument(skip(self, data))]
    pub async fn put_object(
        &self,
        container: &str,
        name: &str,
        data: impl Into<Bytes>,
    ) -> Result<String> {
        self.put_object_with_metadata(container, name, data, None)
            .await
    }

    /// Upload an object with metadata. The content type comes from the
    /// metadata when set, otherwise it is guessed from the object name.
    #[instrument(skip(self, data, metadata))]
    pub async fn put_object_with_metadata(
        &self,
        container: &str,
        name: &str,
        data: impl Into<Bytes>,
        metadata: Option<ObjectMetadata>,
    ) -> Result<String> {
        validate_container_name(container)?;
        validate_object_name(name)?;

        let data = data.into();
        let etag = md5_hex(&data);
        let content_type = resolve_content_type(name, metadata.as_ref());

        let response = self
            .send(|s| {
                let mut request = self
                    .http
                    .put(object_url(&s.storage_url, container, name)?)
                    .header(CONTENT_TYPE, &content_type)
                    .header(ETAG, &etag);
                if let Some(meta) = &metadata {
                    for (key, value) in &meta.user_metadata {
                        request = request.header(format!("{X_OBJECT_META_PREFIX}{key}"), value);
                    }
                }
                Ok(request.body(data.clone()))
            })
            .await?;

        match response.status() {
            s if s.is_success() => Ok(etag),
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            StatusCode::UNPROCESSABLE_ENTITY => Err(Error::EtagMismatch { sent: etag }),
            _ => Err(unexpected(response).await),
        }
    }

    /// Upload an object, streaming the body in fixed-size chunks and firing
    /// the progress callback after each chunk. Returns the MD5 ETag.
    ///
    /// The body is rebuilt from the buffered bytes on a token refresh, so
    /// the callback starts over if the first attempt is rejected.
    #[instrument(skip(self, data, metadata, progress))]
    pub async fn put_object_with_progress(
        &self,
        container: &str,
        name: &str,
        data: Bytes,
        metadata: Option<ObjectMetadata>,
        progress: Option<ProgressCallback>,
    ) -> Result<String> {
        validate_container_name(container)?;
        validate_object_name(name)?;

        let etag = md5_hex(&data);
        let content_type = resolve_content_type(name, metadata.as_ref());

        let response = self
            .send(|s| {
                let mut request = self
                    .http
                    .put(object_url(&s.storage_url, container, name)?)
                    .header(CONTENT_TYPE, &content_type)
                    .header(ETAG, &etag)
                    .header(CONTENT_LENGTH, data.len());
                if let Some(meta) = &metadata {
                    for (key, value) in &meta.user_metadata {
                        request = request.header(format!("{X_OBJECT_META_PREFIX}{key}"), value);
                    }
                }
                Ok(request.body(progress_body(data.clone(), progress.clone())))
            })
            .await?;

        match response.status() {
            s if s.is_success() => Ok(etag),
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            StatusCode::UNPROCESSABLE_ENTITY => Err(Error::EtagMismatch { sent: etag }),
            _ => Err(unexpected(response).await),
        }
    }

    /// Upload an object from a byte stream of unknown length. The body goes
    /// out with chunked transfer encoding and no ETag; the progress callback
    /// fires for each chunk the stream yields.
    ///
    /// The session is refreshed up front; a mid-transfer 401 is not replayed
    /// because the body stream is already consumed.
    #[instrument(skip(self, stream, metadata, progress))]
    pub async fn put_object_stream<S>(
        &self,
        container: &str,
        name: &str,
        stream: S,
        metadata: Option<ObjectMetadata>,
        progress: Option<ProgressCallback>,
    ) -> Result<()>
    where
        S: Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static,
    {
        validate_container_name(container)?;
        validate_object_name(name)?;

        let content_type = resolve_content_type(name, metadata.as_ref());
        let session = self.refresh_session().await?;

        let mut sent = 0u64;
        let counted = stream.map(move |item| {
            if let (Ok(chunk), Some(cb)) = (&item, &progress) {
                sent += chunk.len() as u64;
                cb(TransferProgress {
                    chunk_bytes: chunk.len() as u64,
                    bytes_transferred: sent,
                    total_bytes: None,
                });
            }
            item
        });

        let mut request = self
            .http
            .put(object_url(&session.storage_url, container, name)?)
            .header(CONTENT_TYPE, &content_type);
        if let Some(meta) = &metadata {
            for (key, value) in &meta.user_metadata {
                request = request.header(format!("{X_OBJECT_META_PREFIX}{key}"), value);
            }
        }
        let request = self.authed(request, &session);

        let response = request
            .body(reqwest::Body::wrap_stream(counted))
            .send()
            .await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => {
                self.invalidate_session().await;
                Err(Error::Unauthorized)
            }
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            _ => Err(unexpected(response).await),
        }
    }

    /// Download an object together with its parsed headers, so callers get
    /// the ETag, content type and metadata without a second HEAD
    #[instrument(skip(self))]
    pub async fn get_object(&self, container: &str, name: &str) -> Result<(Bytes, ObjectInfo)> {
        let response = self.get_object_response(container, name, None).await?;
        let info = ObjectInfo::from_headers(container, clean_object_name(name), response.headers());
        let data = response.bytes().await?;
        Ok((data, info))
    }

    /// Download an object, firing the progress callback as each chunk
    /// arrives from the transport
    #[instrument(skip(self, progress))]
    pub async fn get_object_with_progress(
        &self,
        container: &str,
        name: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<Bytes> {
        let mut response = self.get_object_response(container, name, None).await?;
        let total = content_length(&response);
        let mut data = BytesMut::with_capacity(total.unwrap_or(0) as usize);

        while let Some(chunk) = response.chunk().await? {
            data.extend_from_slice(&chunk);
            if let Some(cb) = &progress {
                cb(TransferProgress {
                    chunk_bytes: chunk.len() as u64,
                    bytes_transferred: data.len() as u64,
                    total_bytes: total,
                });
            }
        }
        Ok(data.freeze())
    }

    /// Download an object into an async writer, firing the progress callback
    /// per chunk. Returns the object's parsed headers.
    #[instrument(skip(self, writer, progress))]
    pub async fn get_object_streaming<W>(
        &self,
        container: &str,
        name: &str,
        mut writer: W,
        progress: Option<ProgressCallback>,
    ) -> Result<ObjectInfo>
    where
        W: AsyncWrite + Unpin,
    {
        let mut response = self.get_object_response(container, name, None).await?;
        let info = ObjectInfo::from_headers(container, clean_object_name(name), response.headers());
        let total = content_length(&response);

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
            if let Some(cb) = &progress {
                cb(TransferProgress {
                    chunk_bytes: chunk.len() as u64,
                    bytes_transferred: written,
                    total_bytes: total,
                });
            }
        }
        writer.flush().await?;
        Ok(info)
    }

    /// Download a byte range of an object. `end` is inclusive, per the HTTP
    /// `Range` header; `None` reads to the end of the object.
    #[instrument(skip(self))]
    pub async fn get_object_range(
        &self,
        container: &str,
        name: &str,
        offset: u64,
        end: Option<u64>,
    ) -> Result<Bytes> {
        let range = match end {
            Some(end) => format!("bytes={offset}-{end}"),
            None => format!("bytes={offset}-"),
        };
        let response = self
            .get_object_response(container, name, Some(range))
            .await?;
        Ok(response.bytes().await?)
    }

    async fn get_object_response(
        &self,
        container: &str,
        name: &str,
        range: Option<String>,
    ) -> Result<Response> {
        validate_container_name(container)?;
        validate_object_name(name)?;
        let response = self
            .send(|s| {
                let mut request = self.http.get(object_url(&s.storage_url, container, name)?);
                if let Some(range) = &range {
                    request = request.header(RANGE, range);
                }
                Ok(request)
            })
            .await?;
        match response.status() {
            s if s.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(Error::ObjectNotFound {
                container: container.to_string(),
                name: name.to_string(),
            }),
            _ => Err(unexpected(response).await),
        }
    }

    /// Object headers (size, ETag, content type, metadata) without the body
    #[instrument(skip(self))]
    pub async fn object_info(&self, container: &str, name: &str) -> Result<ObjectInfo> {
        validate_container_name(container)?;
        validate_object_name(name)?;
        let response = self
            .send(|s| Ok(self.http.head(object_url(&s.storage_url, container, name)?)))
            .await?;
        match response.status() {
            s if s.is_success() => Ok(ObjectInfo::from_headers(
                container,
                clean_object_name(name),
                response.headers(),
            )),
            StatusCode::NOT_FOUND => Err(Error::ObjectNotFound {
                container: container.to_string(),
                name: name.to_string(),
            }),
            _ => Err(unexpected(response).await),
        }
    }

    /// Check if an object exists
    #[instrument(skip(self))]
    pub async fn object_exists(&self, container: &str, name: &str) -> Result<bool> {
        match self.object_info(container, name).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Replace the object's user metadata
    #[instrument(skip(self, metadata))]
    pub async fn set_object_metadata(
        &self,
        container: &str,
        name: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<()> {
        validate_container_name(container)?;
        validate_object_name(name)?;
        let response = self
            .send(|s| {
                let mut request = self.http.post(object_url(&s.storage_url, container, name)?);
                for (key, value) in metadata {
                    request = request.header(format!("{X_OBJECT_META_PREFIX}{key}"), value);
                }
                Ok(request)
            })
            .await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::ObjectNotFound {
                container: container.to_string(),
                name: name.to_string(),
            }),
            _ => Err(unexpected(response).await),
        }
    }

    /// Delete an object
    #[instrument(skip(self))]
    pub async fn delete_object(&self, container: &str, name: &str) -> Result<()> {
        validate_container_name(container)?;
        validate_object_name(name)?;
        let response = self
            .send(|s| Ok(self.http.delete(object_url(&s.storage_url, container, name)?)))
            .await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::ObjectNotFound {
                container: container.to_string(),
                name: name.to_string(),
            }),
            _ => Err(unexpected(response).await),
        }
    }

    /// Create zero-byte `application/directory` marker objects for every
    /// prefix of the given path, so file-manager style clients can browse it
    #[instrument(skip(self))]
    pub async fn make_path(&self, container: &str, path: &str) -> Result<()> {
        validate_container_name(container)?;
        let mut prefix = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            self.put_object_with_metadata(
                container,
                &prefix,
                Bytes::new(),
                Some(ObjectMetadata::new().with_content_type(DIRECTORY_CONTENT_TYPE)),
            )
            .await?;
        }
        Ok(())
    }

    // ==================== CDN Operations ====================

    /// Publish a container on the CDN; returns the public CDN URI
    #[instrument(skip(self))]
    pub async fn mark_container_public(
        &self,
        container: &str,
        ttl: Option<u64>,
    ) -> Result<String> {
        validate_container_name(container)?;
        let response = self
            .send(|s| {
                let mut request = self
                    .http
                    .put(container_url(cdn_base(s)?, container)?)
                    .header(X_CDN_ENABLED, cdn_flag(true));
                if let Some(ttl) = ttl {
                    request = request.header(X_TTL, ttl);
                }
                Ok(request)
            })
            .await?;
        if !response.status().is_success() {
            return Err(unexpected(response).await);
        }
        response
            .headers()
            .get(X_CDN_URI)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidResponse(format!("missing {X_CDN_URI} header")))
    }

    /// Unpublish a container from the CDN
    #[instrument(skip(self))]
    pub async fn mark_container_private(&self, container: &str) -> Result<()> {
        validate_container_name(container)?;
        let response = self
            .send(|s| {
                Ok(self
                    .http
                    .post(container_url(cdn_base(s)?, container)?)
                    .header(X_CDN_ENABLED, cdn_flag(false)))
            })
            .await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            _ => Err(unexpected(response).await),
        }
    }

    /// Names of containers currently published on the CDN
    #[instrument(skip(self))]
    pub async fn public_containers(&self) -> Result<Vec<String>> {
        let response = self
            .send(|s| {
                Ok(self
                    .http
                    .get(cdn_base(s)?)
                    .query(&[("enabled_only", "true")]))
            })
            .await?;
        if !response.status().is_success() {
            return Err(unexpected(response).await);
        }
        parse_lines(response).await
    }

    /// CDN publication state of a container
    #[instrument(skip(self))]
    pub async fn cdn_container_info(&self, container: &str) -> Result<CdnContainerInfo> {
        validate_container_name(container)?;
        let response = self
            .send(|s| Ok(self.http.head(container_url(cdn_base(s)?, container)?)))
            .await?;
        match response.status() {
            s if s.is_success() => {
                let text = |key: &str| {
                    response
                        .headers()
                        .get(key)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                };
                Ok(CdnContainerInfo {
                    name: container.to_string(),
                    enabled: text(X_CDN_ENABLED)
                        .is_some_and(|v| v.eq_ignore_ascii_case("true")),
                    cdn_uri: text(X_CDN_URI),
                    ttl: text(X_TTL).and_then(|v| v.parse().ok()),
                    log_retention: text(X_LOG_RETENTION)
                        .is_some_and(|v| v.eq_ignore_ascii_case("true")),
                })
            }
            StatusCode::NOT_FOUND => Err(Error::ContainerNotFound(container.to_string())),
            _ => Err(unexpected(response).await),
        }
    }
}

// ==================== Helpers ====================

fn cdn_base(session: &Session) -> Result<&str> {
    session
        .cdn_management_url
        .as_deref()
        .ok_or(Error::CdnNotAvailable)
}

// CDN flag headers want title case, not the lowercase `Display` of bool.
fn cdn_flag(enabled: bool) -> &'static str {
    if enabled {
        "True"
    } else {
        "False"
    }
}

fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

fn resolve_content_type(name: &str, metadata: Option<&ObjectMetadata>) -> String {
    if let Some(ct) = metadata.and_then(|m| m.content_type.clone()) {
        return ct;
    }
    mime_guess::from_path(clean_object_name(name))
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

fn header_u64(response: &Response, name: &str) -> u64 {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn content_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Listings come back line-delimited; order is the server's (alphabetical).
async fn parse_lines(response: Response) -> Result<Vec<String>> {
    let text = response.text().await?;
    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

async fn unexpected(response: Response) -> Error {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Error::UnexpectedStatus { status, message }
}
