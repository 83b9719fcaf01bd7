use std::path::{Path, PathBuf};

use topup_crypto::md5_hex;

/// Directory of sealed blobs, each stored under the MD5 of the key that opens it.
///
/// Names are derived from random per-blob keys, so concurrent writers never collide.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    #[allow(missing_docs)]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[allow(missing_docs)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<md5 hex of key>`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(md5_hex(key))
    }

    /// Writes a blob, creating the directory if needed.
    pub async fn write(&self, key: &str, blob: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        tokio::fs::write(&path, blob).await?;
        Ok(path)
    }

    #[allow(missing_docs)]
    pub async fn read(&self, key: &str) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.path_for(key)).await
    }
}
