// src/persist.rs
// =============================================================================
// Saves an image under the output root, mirroring the URL's path.
//
//   http://host/a/b%20c.png  +  ./data  ->  ./data/a/b c.png
//
// The body is streamed chunk by chunk; it is never held in memory whole.
// Parent directories are created as needed. An existing file at the same
// path is overwritten: if two URLs decode to one path, the last one wins.
// =============================================================================

use std::fmt::Display;
use std::path::{Component, Path, PathBuf};

use futures::{Stream, StreamExt};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;
use url::Url;

use crate::error::PersistError;

/// A file we finished writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    pub path: PathBuf,
    pub bytes: u64,
}

// Maps a URL onto a file path under `output_root`.
//
// Strips one leading '/', percent-decodes the rest and joins it onto the
// root. Paths that name a directory, or whose decoded form would climb out
// of the root (`..%2F`, a second leading slash), are refused.
pub fn local_path(url: &Url, output_root: &Path) -> Result<PathBuf, PersistError> {
    let raw = url.path();
    let relative = raw.strip_prefix('/').unwrap_or(raw);

    let decoded = match urlencoding::decode(relative) {
        Ok(text) => text.into_owned(),
        // Not UTF-8 once decoded: keep what we can, like a browser's "save as"
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(relative.as_bytes()))
            .into_owned(),
    };

    let unsafe_path = || PersistError::UnsafePath {
        url: url.to_string(),
    };

    if decoded.is_empty() || decoded.ends_with('/') {
        return Err(unsafe_path());
    }

    let decoded = Path::new(&decoded);
    let contained = decoded
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained {
        return Err(unsafe_path());
    }

    Ok(output_root.join(decoded))
}

// Streams `body` into the file that `url` maps to.
//
// If the body stream fails partway, the partial file is removed.
pub async fn persist<S, B, E>(
    url: &Url,
    body: S,
    output_root: &Path,
) -> Result<Persisted, PersistError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let path = local_path(url, output_root)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| PersistError::io(parent, e))?;
    }

    let file = File::create(&path)
        .await
        .map_err(|e| PersistError::io(&path, e))?;

    match write_body(file, body, &path).await {
        Ok(bytes) => Ok(Persisted { path, bytes }),
        Err(WriteFailure::Io(e)) => Err(e),
        Err(WriteFailure::Body(message)) => {
            debug!(path = %path.display(), "removing partial file");
            let _ = fs::remove_file(&path).await;
            Err(PersistError::Body {
                url: url.to_string(),
                message,
            })
        }
    }
}

enum WriteFailure {
    Io(PersistError),
    Body(String),
}

// The writer is owned here so it is closed on every return path.
async fn write_body<S, B, E>(file: File, body: S, path: &Path) -> Result<u64, WriteFailure>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut writer = BufWriter::new(file);
    let mut body = std::pin::pin!(body);
    let mut written = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| WriteFailure::Body(e.to_string()))?;
        let chunk = chunk.as_ref();

        writer
            .write_all(chunk)
            .await
            .map_err(|e| WriteFailure::Io(PersistError::io(path, e)))?;

        written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| WriteFailure::Io(PersistError::io(path, e)))?;

    Ok(written)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why stream the body instead of reading it all first?
//    - Images can be large and many downloads run at once
//    - Writing chunk by chunk keeps memory flat
//
// 2. What does std::pin::pin! do?
//    - Streams must not move in memory while being polled
//    - pin! fixes the stream in place on the stack so we can call next()
//
// 3. Why flush the BufWriter?
//    - BufWriter collects small writes and sends them in bigger pieces
//    - Dropping it doesn't report errors, so we flush and check the result
//
// 4. What is Component::Normal?
//    - Path::components() splits a path into parts
//    - Normal is a plain name like "img" or "a.png"
//    - ParentDir ("..") or RootDir ("/") would escape the output root
// -----------------------------------------------------------------------------
