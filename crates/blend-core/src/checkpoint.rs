//! Binary checkpoint of a finished screening (BLSC format).
//!
//! Layout:
//!
//! ```text
//! [0..4]  magic "BLSC"
//! [4]     version
//! [5..9]  CRC32 of the body, little endian
//! [9..]   bincode-encoded `Screening`
//! ```
//!
//! Screening a large corpus is the slow half of the pipeline; a checkpoint
//! lets retrieval be rerun with different settings without recounting.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::screening::Screening;

pub const MAGIC: &[u8; 4] = b"BLSC";
pub const VERSION: u8 = 1;
const HEADER_SIZE: usize = 9;

#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected BLSC)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

impl Screening {
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        let body = bincode::serialize(self).map_err(CheckpointError::Serialize)?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        if bytes.len() < 5 {
            return Err(CheckpointError::InvalidHeader);
        }
        if &bytes[..4] != MAGIC {
            return Err(CheckpointError::InvalidMagic);
        }
        if bytes[4] != VERSION {
            return Err(CheckpointError::UnsupportedVersion(bytes[4]));
        }
        if bytes.len() < HEADER_SIZE {
            return Err(CheckpointError::InvalidHeader);
        }

        let mut stored = [0u8; 4];
        stored.copy_from_slice(&bytes[5..HEADER_SIZE]);
        let stored = u32::from_le_bytes(stored);
        let body = &bytes[HEADER_SIZE..];
        let computed = crc32fast::hash(body);
        if stored != computed {
            return Err(CheckpointError::ChecksumMismatch { stored, computed });
        }

        bincode::deserialize(body).map_err(CheckpointError::Deserialize)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "checkpoint saved");
        Ok(())
    }

    pub fn open(path: &Path) -> Result<Self, CheckpointError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        let mmap = unsafe { Mmap::map(&file)? };
        let screening = Self::from_bytes(&mmap)?;
        debug!(
            path = %path.display(),
            candidates = screening.candidates.len(),
            lexicon = screening.lexicon.len(),
            "checkpoint opened"
        );
        Ok(screening)
    }
}
