use thiserror::Error;

/// Errors surfaced by the analysis entry points.
///
/// Malformed content never produces an error; unknown tags, bad fields and
/// dangling references are skipped while the pass continues.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Transcript too large: {size} {unit} exceeds the limit of {limit}")]
    TranscriptTooLarge {
        size: usize,
        limit: usize,
        unit: &'static str,
    },

    #[error("Invalid dex data: {0}")]
    InvalidDex(#[from] serde_json::Error),
}
