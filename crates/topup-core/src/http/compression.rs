use std::io::{self, Read};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const DEFLATE_MAGIC: u8 = 0x08;
const BROTLI_MAGIC: [u8; 4] = [0xCE, 0xB2, 0xCF, 0x81];

/// Value sent as `Accept-Encoding` on every exchange.
pub const ACCEPT_ENCODING: &str = "br,deflate,gzip";

/// Response body compressions the exchange client can undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    #[allow(missing_docs)]
    Gzip,
    /// zlib wrapped deflate
    Deflate,
    #[allow(missing_docs)]
    Brotli,
}

impl ContentEncoding {
    /// Maps a `Content-Encoding` header value, `None` for identity or unknown codings.
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => Some(Self::Gzip),
            "deflate" => Some(Self::Deflate),
            "br" => Some(Self::Brotli),
            _ => None,
        }
    }

    /// Guesses the coding from the leading bytes of a body that came without a
    /// `Content-Encoding` header. Checks run gzip, deflate, brotli and the last match wins.
    pub fn sniff(body: &[u8]) -> Option<Self> {
        let mut found = None;

        if body.starts_with(&GZIP_MAGIC) {
            found = Some(Self::Gzip);
        }
        if body.first() == Some(&DEFLATE_MAGIC) {
            found = Some(Self::Deflate);
        }
        if body.starts_with(&BROTLI_MAGIC) {
            found = Some(Self::Brotli);
        }

        found
    }

    /// Decompresses a complete body.
    pub fn decode(&self, body: &[u8]) -> io::Result<Vec<u8>> {
        let mut decoded = Vec::new();

        match self {
            Self::Gzip => flate2::read::GzDecoder::new(body).read_to_end(&mut decoded)?,
            Self::Deflate => flate2::read::ZlibDecoder::new(body).read_to_end(&mut decoded)?,
            Self::Brotli => brotli::Decompressor::new(body, 4096).read_to_end(&mut decoded)?,
        };

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_from_header() {
        assert_eq!(ContentEncoding::from_header("GZIP"), Some(ContentEncoding::Gzip));
        assert_eq!(ContentEncoding::from_header(" br "), Some(ContentEncoding::Brotli));
        assert_eq!(ContentEncoding::from_header("deflate"), Some(ContentEncoding::Deflate));
        assert_eq!(ContentEncoding::from_header("identity"), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(ContentEncoding::sniff(&[0x1F, 0x8B, 0x08, 0x00]), Some(ContentEncoding::Gzip));
        assert_eq!(ContentEncoding::sniff(&[0x08, 0x1D]), Some(ContentEncoding::Deflate));
        assert_eq!(
            ContentEncoding::sniff(&[0xCE, 0xB2, 0xCF, 0x81, 0x00]),
            Some(ContentEncoding::Brotli)
        );
        assert_eq!(ContentEncoding::sniff(b"<html>"), None);
        assert_eq!(ContentEncoding::sniff(&[]), None);
    }

    #[test]
    fn test_decode_gzip_and_deflate() {
        let mut gz = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        gz.write_all(b"<form></form>").unwrap();
        let gz = gz.finish().unwrap();
        assert_eq!(ContentEncoding::Gzip.decode(&gz).unwrap(), b"<form></form>");

        let mut zlib = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        zlib.write_all(b"deflated").unwrap();
        let zlib = zlib.finish().unwrap();
        assert_eq!(ContentEncoding::Deflate.decode(&zlib).unwrap(), b"deflated");
    }

    #[test]
    fn test_decode_brotli() {
        let mut compressed = Vec::new();
        {
            let mut writer = brotli::CompressorWriter::new(&mut compressed, 4096, 5, 22);
            writer.write_all(b"brotli body").unwrap();
        }
        assert_eq!(ContentEncoding::Brotli.decode(&compressed).unwrap(), b"brotli body");
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(ContentEncoding::Gzip.decode(b"plain text").is_err());
    }
}
