use std::io::Error as IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Codec failure. Corruption is unrecoverable: the whole parse or serialize
/// call aborts at the first bad byte, reporting where it was detected.
#[derive(Debug, Error)]
pub enum NifError {
    #[error("io error: {0}")]
    Io(#[from] IoError),
    #[error("corrupt data at offset 0x{offset:X} (block {block:?}): {reason}")]
    Corrupt {
        offset: u64,
        block: Option<usize>,
        reason: String,
    },
    #[error("unsupported file version 0x{0:08X}")]
    UnsupportedVersion(u32),
    #[error("unsupported block type '{0}'")]
    UnsupportedBlockType(String),
}

impl NifError {
    pub(crate) fn corrupt(offset: u64, reason: impl Into<String>) -> Self {
        NifError::Corrupt {
            offset,
            block: None,
            reason: reason.into(),
        }
    }

    /// Attributes a failure to a block index, folding truncation (io errors)
    /// into corruption at the given offset. Version and block-type errors
    /// pass through untouched.
    pub(crate) fn at_block(self, offset: u64, block: usize) -> Self {
        match self {
            NifError::Io(err) => NifError::Corrupt {
                offset,
                block: Some(block),
                reason: format!("truncated stream: {err}"),
            },
            NifError::Corrupt {
                offset,
                block: None,
                reason,
            } => NifError::Corrupt {
                offset,
                block: Some(block),
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, NifError>;

/// Skeleton retargeting failure. A missing skeleton file is kept apart from
/// a corrupt one so callers can produce a targeted message. Per-bone lookup
/// misses are not errors; they are logged and summarized in the applied
/// count.
#[derive(Debug, Error)]
pub enum RetargetError {
    #[error("skeleton file is missing or unreadable at '{path}': {source}")]
    MissingSkeleton { path: PathBuf, source: IoError },
    #[error("skeleton file is corrupt: {0}")]
    Skeleton(#[from] NifError),
}

/// Kf export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Codec(#[from] NifError),
    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: IoError },
}
