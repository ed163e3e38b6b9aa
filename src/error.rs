//! Error types for the decode pipeline.

use thiserror::Error;

/// Everything that can go wrong between the byte source and an emitted
/// entity. The first error raised anywhere in the pipeline terminates the
/// stream; see [`crate::Decoder::next`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("blob header size {size} exceeds the 64 KiB limit")]
    HeaderTooLarge { size: u32 },

    #[error("blob size {size} exceeds the 32 MiB limit")]
    BlobTooLarge { size: i32 },

    #[error("unexpected fileblock of type {found:?}")]
    UnexpectedBlockType { found: String },

    #[error("parser does not have {feature} capability")]
    UnsupportedFeature { feature: String },

    #[error(transparent)]
    Proto(#[from] prost::DecodeError),

    #[error("zlib inflate failed")]
    Inflate(#[source] std::io::Error),

    #[error("inflated blob data is {got} bytes but raw_size declares {want}")]
    InflatedSizeMismatch { got: usize, want: usize },

    #[error("{variant} blob compression is not supported")]
    UnsupportedCompression { variant: &'static str },

    #[error("unknown blob data")]
    UnknownBlobData,

    #[error("tag arrays diverge: {keys} keys vs {vals} vals")]
    TagArityMismatch { keys: usize, vals: usize },

    #[error("member arrays diverge: {roles} roles, {memids} ids, {types} types")]
    MemberArityMismatch {
        roles: usize,
        memids: usize,
        types: usize,
    },

    #[error("dense node arrays diverge: {ids} ids, {lats} lats, {lons} lons")]
    DenseArityMismatch {
        ids: usize,
        lats: usize,
        lons: usize,
    },

    #[error("dense tag stream ended before all nodes were consumed")]
    DenseTagsUnderflow,

    #[error("string table index {index} out of range (table holds {len})")]
    StringIndexOutOfRange { index: i64, len: usize },

    #[error("unknown relation member type {value}")]
    UnknownMemberType { value: i32 },

    #[error("decoder has not been started")]
    NotStarted,

    #[error("start may only be called once")]
    AlreadyStarted,
}

pub type Result<T> = std::result::Result<T, Error>;
