//! Test utilities shared across the codebase

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::Crc;
use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};

struct PendingEntry {
    name: String,
    method: u16,
    crc32: u32,
    uncompressed_size: u32,
    payload: Vec<u8>,
}

/// Builds small ZIP archives in memory for tests
#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<PendingEntry>,
    comment: Vec<u8>,
    zip64: bool,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an uncompressed entry
    pub fn stored(mut self, name: &str, data: &[u8]) -> Self {
        self.entries.push(PendingEntry {
            name: name.to_string(),
            method: 0,
            crc32: crc32(data),
            uncompressed_size: data.len() as u32,
            payload: data.to_vec(),
        });
        self
    }

    /// Add a DEFLATE-compressed entry
    pub fn deflated(mut self, name: &str, data: &[u8]) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        let payload = encoder.finish().unwrap();

        self.entries.push(PendingEntry {
            name: name.to_string(),
            method: 8,
            crc32: crc32(data),
            uncompressed_size: data.len() as u32,
            payload,
        });
        self
    }

    /// Add a directory entry (name should end with '/')
    pub fn directory(self, name: &str) -> Self {
        self.stored(name, b"")
    }

    /// Set the archive comment
    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    /// Write ZIP64 records: saturated central directory fields backed by
    /// extra field 0x0001, and a ZIP64 end of central directory record
    /// with its locator
    pub fn zip64(mut self) -> Self {
        self.zip64 = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut offsets = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            offsets.push(out.len() as u32);
            out.write_all(b"PK\x03\x04").unwrap();
            out.write_u16::<LittleEndian>(20).unwrap(); // version needed
            out.write_u16::<LittleEndian>(0).unwrap(); // flags
            out.write_u16::<LittleEndian>(entry.method).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap(); // mod time
            out.write_u16::<LittleEndian>(0x21).unwrap(); // mod date 1980-01-01
            out.write_u32::<LittleEndian>(entry.crc32).unwrap();
            out.write_u32::<LittleEndian>(entry.payload.len() as u32).unwrap();
            out.write_u32::<LittleEndian>(entry.uncompressed_size).unwrap();
            out.write_u16::<LittleEndian>(entry.name.len() as u16).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap(); // extra length
            out.write_all(entry.name.as_bytes()).unwrap();
            out.write_all(&entry.payload).unwrap();
        }

        let cd_offset = out.len() as u64;
        let version = if self.zip64 { 45 } else { 20 };
        for (entry, offset) in self.entries.iter().zip(&offsets) {
            let (compressed, uncompressed, lfh_offset) = if self.zip64 {
                (u32::MAX, u32::MAX, u32::MAX)
            } else {
                (entry.payload.len() as u32, entry.uncompressed_size, *offset)
            };

            out.write_all(b"PK\x01\x02").unwrap();
            out.write_u16::<LittleEndian>(version).unwrap(); // version made by
            out.write_u16::<LittleEndian>(version).unwrap(); // version needed
            out.write_u16::<LittleEndian>(0).unwrap(); // flags
            out.write_u16::<LittleEndian>(entry.method).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap(); // mod time
            out.write_u16::<LittleEndian>(0x21).unwrap(); // mod date
            out.write_u32::<LittleEndian>(entry.crc32).unwrap();
            out.write_u32::<LittleEndian>(compressed).unwrap();
            out.write_u32::<LittleEndian>(uncompressed).unwrap();
            out.write_u16::<LittleEndian>(entry.name.len() as u16).unwrap();
            out.write_u16::<LittleEndian>(if self.zip64 { 28 } else { 0 }).unwrap(); // extra length
            out.write_u16::<LittleEndian>(0).unwrap(); // comment length
            out.write_u16::<LittleEndian>(0).unwrap(); // disk number start
            out.write_u16::<LittleEndian>(0).unwrap(); // internal attrs
            out.write_u32::<LittleEndian>(0).unwrap(); // external attrs
            out.write_u32::<LittleEndian>(lfh_offset).unwrap();
            out.write_all(entry.name.as_bytes()).unwrap();

            if self.zip64 {
                out.write_u16::<LittleEndian>(0x0001).unwrap();
                out.write_u16::<LittleEndian>(24).unwrap();
                out.write_u64::<LittleEndian>(entry.uncompressed_size as u64).unwrap();
                out.write_u64::<LittleEndian>(entry.payload.len() as u64).unwrap();
                out.write_u64::<LittleEndian>(*offset as u64).unwrap();
            }
        }
        let cd_size = out.len() as u64 - cd_offset;
        let count = self.entries.len() as u64;

        if self.zip64 {
            let eocd64_offset = out.len() as u64;
            out.write_all(b"PK\x06\x06").unwrap();
            out.write_u64::<LittleEndian>(44).unwrap(); // size of the remaining record
            out.write_u16::<LittleEndian>(45).unwrap(); // version made by
            out.write_u16::<LittleEndian>(45).unwrap(); // version needed
            out.write_u32::<LittleEndian>(0).unwrap(); // disk number
            out.write_u32::<LittleEndian>(0).unwrap(); // disk with CD
            out.write_u64::<LittleEndian>(count).unwrap();
            out.write_u64::<LittleEndian>(count).unwrap();
            out.write_u64::<LittleEndian>(cd_size).unwrap();
            out.write_u64::<LittleEndian>(cd_offset).unwrap();

            out.write_all(b"PK\x06\x07").unwrap();
            out.write_u32::<LittleEndian>(0).unwrap(); // disk with ZIP64 EOCD
            out.write_u64::<LittleEndian>(eocd64_offset).unwrap();
            out.write_u32::<LittleEndian>(1).unwrap(); // total disks
        }

        let (eocd_count, eocd_size, eocd_offset) = if self.zip64 {
            (u16::MAX, u32::MAX, u32::MAX)
        } else {
            (count as u16, cd_size as u32, cd_offset as u32)
        };
        out.write_all(b"PK\x05\x06").unwrap();
        out.write_u16::<LittleEndian>(0).unwrap(); // disk number
        out.write_u16::<LittleEndian>(0).unwrap(); // disk with CD
        out.write_u16::<LittleEndian>(eocd_count).unwrap();
        out.write_u16::<LittleEndian>(eocd_count).unwrap();
        out.write_u32::<LittleEndian>(eocd_size).unwrap();
        out.write_u32::<LittleEndian>(eocd_offset).unwrap();
        out.write_u16::<LittleEndian>(self.comment.len() as u16).unwrap();
        out.write_all(&self.comment).unwrap();

        out
    }

    /// Build the archive and write it to `dir/file_name`
    pub fn write_to(self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(data);
    crc.sum()
}
