//! File fingerprints
//!
//! A fingerprint is the MD5, SHA-512 and RIPEMD-160 digest of one file's
//! bytes, all three computed from the same read pass.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use distaudit_core::model::ResourceRecord;
use md5::Md5;
use ripemd::Ripemd160;
use sha2::{Digest, Sha512};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 8192;

/// Lowercase hex digests of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub md5: String,
    pub sha: String,
    pub ripemd: String,
}

impl Fingerprint {
    /// Digest everything `reader` yields
    pub fn of_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut md5 = Md5::new();
        let mut sha = Sha512::new();
        let mut ripemd = Ripemd160::new();

        let mut buffer = [0u8; READ_BUFFER_SIZE];
        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let chunk = &buffer[..read];
            md5.update(chunk);
            sha.update(chunk);
            ripemd.update(chunk);
        }

        Ok(Self {
            md5: hex::encode(md5.finalize()),
            sha: hex::encode(sha.finalize()),
            ripemd: hex::encode(ripemd.finalize()),
        })
    }

    /// Digest the file at `path`
    pub fn of_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| io_error("fingerprint", path, e))?;
        Self::of_reader(file).map_err(|e| io_error("fingerprint", path, e))
    }

    /// Build the resource record for this fingerprint
    pub fn into_record(self, directory: impl Into<String>, name: impl Into<String>) -> ResourceRecord {
        ResourceRecord::new(directory, name, self.md5, self.sha, self.ripemd)
    }
}
