//! Engine limits

use crate::error::AnalyzeError;

/// Bounds on the work a single analysis may do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Largest transcript accepted, in bytes
    pub max_transcript_bytes: usize,
    /// Largest number of tokenized messages accepted
    pub max_messages: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_transcript_bytes: 8 * 1024 * 1024,
            max_messages: 250_000,
        }
    }
}

impl AnalyzerConfig {
    pub(crate) fn check_bytes(&self, bytes: usize) -> Result<(), AnalyzeError> {
        if bytes > self.max_transcript_bytes {
            return Err(AnalyzeError::TranscriptTooLarge {
                size: bytes,
                limit: self.max_transcript_bytes,
                unit: "bytes",
            });
        }
        Ok(())
    }

    pub(crate) fn check_messages(&self, messages: usize) -> Result<(), AnalyzeError> {
        if messages > self.max_messages {
            return Err(AnalyzeError::TranscriptTooLarge {
                size: messages,
                limit: self.max_messages,
                unit: "messages",
            });
        }
        Ok(())
    }
}
