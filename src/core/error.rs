use thiserror::Error;

/// Rejected scene configuration (phase tables, timeline segments).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("phase table needs at least one label")]
    NoPhases,
    #[error("expected {expected} phase boundaries, got {got}")]
    BoundaryCount { expected: usize, got: usize },
    #[error("phase boundary {index} ({value}) must lie strictly inside (0, 1) and increase")]
    BoundaryOrder { index: usize, value: f32 },
    #[error("segment {index} has invalid timing (start {start}, duration {duration})")]
    SegmentTiming {
        index: usize,
        start: f32,
        duration: f32,
    },
    #[error("segment {index} target is not finite")]
    SegmentTarget { index: usize },
}
