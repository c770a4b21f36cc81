use serde::{Deserialize, Serialize};

use crate::error::SplitError;

/// Configuration for the chunking engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Target maximum chunk size in characters (default: 512, sensible up to ~3500).
    pub chunk_len: usize,
    /// Fraction of `chunk_len` carried across chunk boundaries (default: 0.2).
    pub overlap_ratio: f32,
    /// Literal separator strings tried before the built-in ladder, in order.
    pub custom_separators: Vec<String>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_len: 512,
            overlap_ratio: 0.2,
            custom_separators: Vec::new(),
        }
    }
}

impl SplitConfig {
    /// Overlap budget in characters, rounded from `chunk_len * overlap_ratio`.
    pub fn overlap_len(&self) -> usize {
        (self.chunk_len as f32 * self.overlap_ratio).round() as usize
    }

    /// Check the invariants the splitter relies on. Called once at the public
    /// entry point; the algorithm itself assumes a valid config.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.chunk_len == 0 {
            return Err(SplitError::InvalidChunkLen(self.chunk_len));
        }
        if !(self.overlap_ratio >= 0.0 && self.overlap_ratio < 1.0) {
            return Err(SplitError::InvalidOverlapRatio(self.overlap_ratio));
        }
        let overlap = self.overlap_len();
        if overlap >= self.chunk_len {
            return Err(SplitError::OverlapTooLarge {
                chunk_len: self.chunk_len,
                overlap,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SplitConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_len, 512);
        assert_eq!(config.overlap_len(), 102);
    }

    #[test]
    fn zero_chunk_len_rejected() {
        let config = SplitConfig {
            chunk_len: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SplitError::InvalidChunkLen(0))
        ));
    }

    #[test]
    fn overlap_ratio_bounds() {
        for bad in [-0.1_f32, 1.0, 1.5, f32::NAN] {
            let config = SplitConfig {
                overlap_ratio: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "ratio {bad} should be rejected");
        }
        let ok = SplitConfig {
            overlap_ratio: 0.0,
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn overlap_must_leave_progress() {
        // chunk_len 1 with a high ratio rounds to an overlap of 1.
        let config = SplitConfig {
            chunk_len: 1,
            overlap_ratio: 0.9,
            custom_separators: Vec::new(),
        };
        assert!(matches!(
            config.validate(),
            Err(SplitError::OverlapTooLarge { .. })
        ));
    }
}
