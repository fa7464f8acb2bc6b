//! Streaming transfers with progress notification
//!
//! Upload bodies are re-chunked into fixed-size pieces so the progress
//! callback observes every write; downloads report each chunk as it arrives
//! from the transport. Background variants run the transfer on a spawned
//! task and hand back the `JoinHandle` as the completion signal.

use crate::{CloudFilesClient, ObjectMetadata, Result};
use bytes::Bytes;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Upload/download chunk size in bytes
pub const CHUNK_SIZE: usize = 8192;

/// Progress callback type; fired synchronously after each chunk
pub type ProgressCallback = Arc<dyn Fn(TransferProgress) + Send + Sync>;

/// Progress of a running transfer
#[derive(Clone, Debug)]
pub struct TransferProgress {
    /// Bytes in the chunk that was just transferred
    pub chunk_bytes: u64,
    /// Cumulative bytes transferred
    pub bytes_transferred: u64,
    /// Total bytes, when known up front
    pub total_bytes: Option<u64>,
}

impl TransferProgress {
    /// Percentage complete, when the total is known
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(100.0),
            Some(total) => Some((self.bytes_transferred as f64 / total as f64) * 100.0),
            None => None,
        }
    }
}

/// Split a body into a stream of fixed-size chunks, firing the callback
/// after each chunk is handed to the transport.
pub(crate) fn progress_chunks(
    data: Bytes,
    progress: Option<ProgressCallback>,
) -> impl futures::Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static {
    let total = data.len() as u64;
    futures::stream::unfold((data, 0u64), move |(mut remaining, sent)| {
        let progress = progress.clone();
        async move {
            if remaining.is_empty() {
                return None;
            }
            let take = remaining.len().min(CHUNK_SIZE);
            let chunk = remaining.split_to(take);
            let sent = sent + take as u64;
            if let Some(cb) = &progress {
                cb(TransferProgress {
                    chunk_bytes: take as u64,
                    bytes_transferred: sent,
                    total_bytes: Some(total),
                });
            }
            Some((Ok::<_, std::io::Error>(chunk), (remaining, sent)))
        }
    })
}

pub(crate) fn progress_body(data: Bytes, progress: Option<ProgressCallback>) -> reqwest::Body {
    reqwest::Body::wrap_stream(progress_chunks(data, progress))
}

/// Upload an object on a background task. The returned handle resolves to
/// the ETag once the transfer completes.
pub fn upload_in_background(
    client: Arc<CloudFilesClient>,
    container: impl Into<String>,
    name: impl Into<String>,
    data: Bytes,
    metadata: Option<ObjectMetadata>,
    progress: Option<ProgressCallback>,
) -> JoinHandle<Result<String>> {
    let container = container.into();
    let name = name.into();
    tokio::spawn(async move {
        client
            .put_object_with_progress(&container, &name, data, metadata, progress)
            .await
    })
}

/// Download an object on a background task. The returned handle resolves to
/// the object content once the transfer completes.
pub fn download_in_background(
    client: Arc<CloudFilesClient>,
    container: impl Into<String>,
    name: impl Into<String>,
    progress: Option<ProgressCallback>,
) -> JoinHandle<Result<Bytes>> {
    let container = container.into();
    let name = name.into();
    tokio::spawn(async move {
        client
            .get_object_with_progress(&container, &name, progress)
            .await
    })
}
