use std::io::{Read, Write};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};

use crate::{CryptoError, Result};

/// Gzip `data` with the default compression level.
pub fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(CryptoError::Compression)?;
    encoder.finish().map_err(CryptoError::Compression)
}

/// Inflate a gzip stream.
pub fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoded = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut decoded)
        .map_err(CryptoError::Compression)?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_magic() {
        let compressed = gzip(b"payload").unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
        assert_eq!(gunzip(&compressed).unwrap(), b"payload");
    }

    #[test]
    fn test_gunzip_rejects_garbage() {
        assert!(matches!(
            gunzip(b"definitely not gzip"),
            Err(CryptoError::Compression(_))
        ));
    }
}
