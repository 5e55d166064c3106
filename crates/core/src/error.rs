use thiserror::Error;

/// Misuse of the capture API. Every variant means the instrumentation is
/// unbalanced and the timing data of the current frame cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfilerError {
    #[error("pop called with an empty profiler stack")]
    UnbalancedPop,
    #[error("frame boundary reached with {open} open span(s), innermost `{innermost}`")]
    UnbalancedFrame { open: usize, innermost: String },
    #[error("span `{name}` pushed before the first frame began")]
    NoActiveFrame { name: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid profiler config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history capacity must be at least one frame")]
    ZeroCapacity,
}
