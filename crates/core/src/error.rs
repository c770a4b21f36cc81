use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("chunk_len must be greater than zero, got {0}")]
    InvalidChunkLen(usize),

    #[error("overlap_ratio must be in [0, 1), got {0}")]
    InvalidOverlapRatio(f32),

    #[error("overlap of {overlap} chars leaves no forward progress at chunk_len {chunk_len}")]
    OverlapTooLarge { chunk_len: usize, overlap: usize },

    #[error("custom separator {separator:?} failed to compile: {reason}")]
    Separator { separator: String, reason: String },
}
