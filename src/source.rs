use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::{error::Result, types::NodeResponse};

/// Byte stream returned by [`RemoteSource::fetch_raw`]
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Core abstraction over the remote content tree
///
/// Implementors provide read-only access to tree metadata and raw file
/// bytes from a backend such as the GitHub contents API.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Name of the tree root, used as the local mirror directory name
    fn name(&self) -> &str;

    /// Fetch metadata for one node by its path relative to the tree root
    ///
    /// The empty path denotes the tree root. A directory yields
    /// `NodeResponse::Listing`, anything else `NodeResponse::Entry`.
    async fn fetch(&self, path: &str) -> Result<NodeResponse>;

    /// Open a raw byte stream for a file's full content
    ///
    /// `url` is the absolute raw endpoint from a [`RemoteEntry`]'s
    /// `download_url`, independent of the metadata API.
    ///
    /// [`RemoteEntry`]: crate::types::RemoteEntry
    async fn fetch_raw(&self, url: &str) -> Result<ByteStream>;
}
