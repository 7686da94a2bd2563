use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::Read;
use std::path::Path;

use crate::io::{LocalFileReader, ReadAt};

use super::error::{ZipError, ZipResult};
use super::parser::{CentralDirectory, CentralDirectoryLocation, ZipParser};
use super::structures::{CompressionMethod, ZipFileEntry};

/// Upper bound on the buffer reserved up front for a decoded entry.
/// Larger entries still decode, the vector just grows as it goes.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

/// An open ZIP archive.
///
/// The End of Central Directory is resolved once when the archive is
/// opened; entry listing and lookup re-read the Central Directory on demand.
#[derive(Debug)]
pub struct ZipArchive<R: ReadAt> {
    parser: ZipParser<R>,
    location: CentralDirectoryLocation,
}

impl ZipArchive<LocalFileReader> {
    /// Open a ZIP file from the local filesystem
    pub fn open(path: &Path) -> ZipResult<Self> {
        let reader = LocalFileReader::new(path)?;
        Self::new(reader)
    }
}

impl<R: ReadAt> ZipArchive<R> {
    pub fn new(reader: R) -> ZipResult<Self> {
        let parser = ZipParser::new(reader);
        let location = parser.locate_central_directory()?;
        Ok(Self { parser, location })
    }

    /// Number of entries recorded in the Central Directory
    pub fn len(&self) -> u64 {
        self.location.total_entries
    }

    pub fn is_empty(&self) -> bool {
        self.location.total_entries == 0
    }

    /// Lazily iterate over all entries in Central Directory order
    pub fn entries(&self) -> ZipResult<CentralDirectory> {
        self.parser.central_directory(&self.location)
    }

    /// Find an entry by its exact name
    pub fn by_name(&self, name: &str) -> ZipResult<Option<ZipFileEntry>> {
        for entry in self.entries()? {
            let entry = entry?;
            if entry.file_name == name {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// Read and decode the full contents of an entry.
    ///
    /// The decoded bytes are checked against the size and CRC-32 recorded in
    /// the Central Directory.
    pub fn read(&self, entry: &ZipFileEntry) -> ZipResult<Vec<u8>> {
        if entry.is_directory {
            return Ok(Vec::new());
        }
        if entry.is_encrypted() {
            return Err(ZipError::Encrypted {
                name: entry.file_name.clone(),
            });
        }

        let data_offset = self.parser.get_data_offset(entry)?;
        let end = data_offset.checked_add(entry.compressed_size);
        if end.is_none_or(|end| end > self.parser.size()) {
            return Err(ZipError::InvalidArchive("entry data out of bounds"));
        }

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_exact_at(data_offset, &mut raw)?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let capacity = entry.uncompressed_size.min(MAX_PREALLOCATION) as usize;
                let mut out = Vec::with_capacity(capacity);
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size.saturating_add(1))
                    .read_to_end(&mut out)?;
                out
            }
            CompressionMethod::Unknown(method) => {
                return Err(ZipError::UnsupportedCompression {
                    name: entry.file_name.clone(),
                    method,
                });
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(ZipError::SizeMismatch {
                name: entry.file_name.clone(),
                expected: entry.uncompressed_size,
                found: data.len() as u64,
            });
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(ZipError::ChecksumMismatch {
                name: entry.file_name.clone(),
                expected: entry.crc32,
                found: crc.sum(),
            });
        }

        Ok(data)
    }

    /// Look up an entry by name and read it, `None` if it does not exist
    pub fn read_by_name(&self, name: &str) -> ZipResult<Option<Vec<u8>>> {
        match self.by_name(name)? {
            Some(entry) => self.read(&entry).map(Some),
            None => Ok(None),
        }
    }
}
