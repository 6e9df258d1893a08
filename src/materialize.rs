use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use futures::TryStreamExt;
use tokio::{
    fs,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tokio_util::io::StreamReader;
use tracing::debug;

use crate::{error::Result, source::RemoteSource, types::RemoteEntry};

/// Read size for streamed downloads
const CHUNK_SIZE: usize = 1024;

/// Write one remote file entry to `dest`.
///
/// Two mutually exclusive strategies: decode the inline payload when one is
/// present, otherwise stream from the entry's raw URL. The destination's
/// parent directory must already exist; traversal order guarantees it.
pub async fn materialize<S: RemoteSource>(
    source: &S,
    entry: &RemoteEntry,
    dest: &Path,
) -> Result<()> {
    if let Some(content) = &entry.content {
        let decoded = decode_inline(content)?;
        fs::write(dest, &decoded).await?;
        debug!(path = %entry.path, bytes = decoded.len(), "wrote inline file");
    } else if let Some(url) = &entry.download_url {
        let written = stream_to_file(source, url, dest).await?;
        debug!(path = %entry.path, bytes = written, "wrote streamed file");
    }
    Ok(())
}

/// Decode an inline payload.
///
/// The API wraps base64 payloads with newlines, so ASCII whitespace is
/// stripped before decoding.
pub fn decode_inline(content: &str) -> Result<Vec<u8>> {
    let cleaned: Vec<u8> = content
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(cleaned)?)
}

/// Copy a raw byte stream to `dest` in fixed-size chunks until end of
/// stream. Nothing is buffered beyond one chunk, so arbitrarily large
/// files transfer in constant memory.
async fn stream_to_file<S: RemoteSource>(source: &S, url: &str, dest: &Path) -> Result<u64> {
    let stream = source.fetch_raw(url).await?;
    let mut reader = StreamReader::new(stream.map_err(std::io::Error::other));
    let mut file = fs::File::create(dest).await?;

    let mut written = 0u64;
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        file.write_all(&buf[..read]).await?;
        written += read as u64;
    }
    file.flush().await?;
    Ok(written)
}
