//! Framed-block reader: length-prefixed `BlobHeader`/`Blob` pairs pulled
//! sequentially off the byte source, plus blob payload extraction.

use std::io::Read;

use flate2::bufread::ZlibDecoder;
use prost::Message;
use tracing::{span, trace, Level};

use crate::error::{Error, Result};
use crate::osm_pbf;

pub(crate) const MAX_BLOB_HEADER_SIZE: u32 = 64 * 1024;
pub(crate) const MAX_BLOB_SIZE: i32 = 32 * 1024 * 1024;
pub(crate) const DEFAULT_BUF_SIZE: usize = 1024 * 1024;

/// Sequential reader of file blocks. Sole owner of one scratch buffer that
/// is reused for the header and body of every frame and grows monotonically.
pub(crate) struct BlobReader<R> {
    source: R,
    buf: Vec<u8>,
}

impl<R: Read> BlobReader<R> {
    pub(crate) fn new(source: R, capacity: usize) -> Self {
        Self {
            source,
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Pulls the next `BlobHeader`/`Blob` frame. `Ok(None)` is a clean end
    /// of stream; running dry anywhere past the first prefix byte is a
    /// truncation error.
    pub(crate) fn read_file_block(
        &mut self,
    ) -> Result<Option<(osm_pbf::BlobHeader, osm_pbf::Blob)>> {
        let _span = span!(Level::TRACE, "read_file_block").entered();

        let header_size = match self.read_header_size()? {
            Some(size) => size,
            None => return Ok(None),
        };
        let header = self.read_blob_header(header_size)?;
        trace!(block_type = %header.r#type, datasize = header.datasize, "read blob header");
        let blob = osm_pbf::Blob::decode(self.fill(header.datasize as usize)?)?;
        Ok(Some((header, blob)))
    }

    fn read_header_size(&mut self) -> Result<Option<u32>> {
        let mut prefix = [0u8; 4];
        let mut filled = 0;
        while filled < prefix.len() {
            let n = self.source.read(&mut prefix[filled..])?;
            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "stream ended inside a block length prefix",
                )));
            }
            filled += n;
        }
        let size = u32::from_be_bytes(prefix);
        if size >= MAX_BLOB_HEADER_SIZE {
            return Err(Error::HeaderTooLarge { size });
        }
        Ok(Some(size))
    }

    fn read_blob_header(&mut self, size: u32) -> Result<osm_pbf::BlobHeader> {
        let header = osm_pbf::BlobHeader::decode(self.fill(size as usize)?)?;
        if header.datasize < 0 || header.datasize >= MAX_BLOB_SIZE {
            return Err(Error::BlobTooLarge {
                size: header.datasize,
            });
        }
        Ok(header)
    }

    /// Reads exactly `n` bytes into the scratch buffer.
    fn fill(&mut self, n: usize) -> Result<&[u8]> {
        self.buf.clear();
        self.buf.resize(n, 0);
        self.source.read_exact(&mut self.buf)?;
        Ok(&self.buf)
    }
}

/// Extracts the schema-message bytes carried by a blob: `raw` verbatim, or
/// `zlib_data` inflated into `scratch` with a strict length check against
/// the declared `raw_size`. Other compression variants fail by name.
pub(crate) fn payload<'a>(blob: &'a osm_pbf::Blob, scratch: &'a mut Vec<u8>) -> Result<&'a [u8]> {
    if let Some(raw) = &blob.raw {
        return Ok(raw);
    }
    if let Some(zlib) = &blob.zlib_data {
        let want = blob.raw_size().max(0) as usize;
        scratch.clear();
        scratch.reserve(want + 32);
        let mut inflater = ZlibDecoder::new(&zlib[..]);
        inflater.read_to_end(scratch).map_err(Error::Inflate)?;
        if scratch.len() != want {
            return Err(Error::InflatedSizeMismatch {
                got: scratch.len(),
                want,
            });
        }
        return Ok(scratch);
    }
    if blob.lzma_data.is_some() {
        return Err(Error::UnsupportedCompression { variant: "lzma" });
    }
    if blob.obsolete_bzip2_data.is_some() {
        return Err(Error::UnsupportedCompression { variant: "bzip2" });
    }
    Err(Error::UnknownBlobData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    fn frame(header: &osm_pbf::BlobHeader, blob_bytes: &[u8]) -> Vec<u8> {
        let header_bytes = header.encode_to_vec();
        let mut out = Vec::new();
        out.extend_from_slice(&(header_bytes.len() as u32).to_be_bytes());
        out.extend_from_slice(&header_bytes);
        out.extend_from_slice(blob_bytes);
        out
    }

    fn data_header(datasize: i32) -> osm_pbf::BlobHeader {
        osm_pbf::BlobHeader {
            r#type: "OSMData".to_string(),
            indexdata: None,
            datasize,
        }
    }

    #[test]
    fn reads_one_frame_then_clean_eof() {
        let blob = osm_pbf::Blob {
            raw: Some(b"xyz".to_vec()),
            ..Default::default()
        };
        let blob_bytes = blob.encode_to_vec();
        let bytes = frame(&data_header(blob_bytes.len() as i32), &blob_bytes);

        let mut reader = BlobReader::new(Cursor::new(bytes), 64);
        let (header, parsed) = reader.read_file_block().unwrap().unwrap();
        assert_eq!(header.r#type, "OSMData");
        assert_eq!(parsed.raw(), b"xyz");
        assert!(reader.read_file_block().unwrap().is_none());
        // a drained reader keeps reporting end of stream
        assert!(reader.read_file_block().unwrap().is_none());
    }

    #[test]
    fn truncated_length_prefix_is_an_error() {
        let mut reader = BlobReader::new(Cursor::new(vec![0u8, 0, 1]), 64);
        match reader.read_file_block() {
            Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected truncation error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_blob_body_is_an_error() {
        let blob = osm_pbf::Blob {
            raw: Some(vec![7u8; 100]),
            ..Default::default()
        };
        let blob_bytes = blob.encode_to_vec();
        let mut bytes = frame(&data_header(blob_bytes.len() as i32), &blob_bytes);
        bytes.truncate(bytes.len() - 40);

        let mut reader = BlobReader::new(Cursor::new(bytes), 64);
        assert!(matches!(reader.read_file_block(), Err(Error::Io(_))));
    }

    #[test]
    fn header_length_limit_is_exclusive() {
        // Exactly 64 KiB must be rejected before the body is even read.
        let mut reader = BlobReader::new(Cursor::new(65536u32.to_be_bytes().to_vec()), 64);
        assert!(matches!(
            reader.read_file_block(),
            Err(Error::HeaderTooLarge { size: 65536 })
        ));

        // One byte below the limit decodes fine given a well-formed body.
        // Sized so the encoded BlobHeader comes out at exactly 65535 bytes:
        // 9 (type) + 1 + 3 + 65520 (indexdata) + 2 (datasize).
        let header = osm_pbf::BlobHeader {
            r#type: "OSMData".to_string(),
            indexdata: Some(vec![0u8; 65520]),
            datasize: 0,
        };
        assert_eq!(header.encode_to_vec().len(), 65535);
        let mut reader = BlobReader::new(Cursor::new(frame(&header, &[])), 64);
        let (header, _) = reader.read_file_block().unwrap().unwrap();
        assert_eq!(header.indexdata().len(), 65520);
    }

    #[test]
    fn blob_size_limit_is_exclusive() {
        let bytes = frame(&data_header(MAX_BLOB_SIZE), &[]);
        let mut reader = BlobReader::new(Cursor::new(bytes), 64);
        assert!(matches!(
            reader.read_file_block(),
            Err(Error::BlobTooLarge { .. })
        ));
    }

    #[test]
    fn raw_payload_passes_through() {
        let blob = osm_pbf::Blob {
            raw: Some(b"abc".to_vec()),
            ..Default::default()
        };
        let mut scratch = Vec::new();
        assert_eq!(payload(&blob, &mut scratch).unwrap(), b"abc");
    }

    #[test]
    fn zlib_payload_inflates_with_strict_size_check() {
        let body = b"some primitive block bytes".to_vec();
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&body).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut blob = osm_pbf::Blob {
            zlib_data: Some(compressed),
            raw_size: Some(body.len() as i32),
            ..Default::default()
        };
        let mut scratch = Vec::new();
        assert_eq!(payload(&blob, &mut scratch).unwrap(), &body[..]);

        blob.raw_size = Some(body.len() as i32 + 1);
        assert!(matches!(
            payload(&blob, &mut scratch),
            Err(Error::InflatedSizeMismatch { .. })
        ));
    }

    #[test]
    fn unsupported_variants_fail_by_name() {
        let mut scratch = Vec::new();
        let lzma = osm_pbf::Blob {
            lzma_data: Some(vec![1, 2, 3]),
            ..Default::default()
        };
        assert!(matches!(
            payload(&lzma, &mut scratch),
            Err(Error::UnsupportedCompression { variant: "lzma" })
        ));

        let empty = osm_pbf::Blob::default();
        assert!(matches!(
            payload(&empty, &mut scratch),
            Err(Error::UnknownBlobData)
        ));
    }
}
