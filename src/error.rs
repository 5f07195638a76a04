use thiserror::Error;

/// Errors raised by `analyze` and calibration. All are synchronous and
/// deterministic; none are worth retrying internally.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The image bytes could not be decoded (corrupt or unreadable data).
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    /// The caller passed a source kind the loader cannot handle.
    #[error("unsupported image source: {0}")]
    UnsupportedSource(String),

    /// A tunable was out of range (e.g. non-positive calibration scale).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
